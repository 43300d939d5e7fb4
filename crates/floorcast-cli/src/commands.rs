// Subcommand implementations: recommend, board, check.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{bail, Context};
use tabled::{Table, Tabled};
use tracing::{info, warn};

use floorcast_core::draft::pick::{Position, TeamId};
use floorcast_core::optimize::{Recommendation, RecommendedPlayer, RosterOptimizer};
use floorcast_core::players::pool::{best_available, Player};
use floorcast_core::solver::HighsSolver;

use crate::session::Session;

// ---------------------------------------------------------------------------
// Table rows
// ---------------------------------------------------------------------------

#[derive(Tabled)]
struct PlayerRow {
    #[tabled(rename = "Id")]
    id: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Pos")]
    position: &'static str,
    #[tabled(rename = "Team")]
    pro_team: String,
    #[tabled(rename = "Season")]
    season: String,
}

impl From<&RecommendedPlayer> for PlayerRow {
    fn from(p: &RecommendedPlayer) -> Self {
        PlayerRow {
            id: p.id.0,
            name: p.name.clone(),
            position: p.position.display_str(),
            pro_team: p.pro_team.clone(),
            season: format!("{:.1}", p.season_total),
        }
    }
}

impl From<&Player> for PlayerRow {
    fn from(p: &Player) -> Self {
        PlayerRow::from(&RecommendedPlayer::from(p))
    }
}

#[derive(Tabled)]
struct PositionRow {
    #[tabled(rename = "Pos")]
    position: &'static str,
    #[tabled(rename = "Min")]
    min: usize,
    #[tabled(rename = "Max")]
    max: usize,
    #[tabled(rename = "Players")]
    players: usize,
}

fn print_table(title: &str, table: Table) {
    println!("{title}");
    for line in table.to_string().lines() {
        println!("  {line}");
    }
    println!();
}

fn format_floor(floor: Option<f64>) -> String {
    floor.map_or_else(|| "-".to_string(), |f| format!("{f:.1}"))
}

// ---------------------------------------------------------------------------
// recommend
// ---------------------------------------------------------------------------

pub fn recommend(session: &Session, team_number: usize, json: bool) -> anyhow::Result<()> {
    let team = TeamId::from_display_number(team_number).context("team numbers start at 1")?;
    if team.0 >= session.config.league.num_teams {
        bail!(
            "team {} does not exist (league has {} teams)",
            team_number,
            session.config.league.num_teams
        );
    }

    let solver = &session.config.strategy.solver;
    let optimizer = RosterOptimizer::new(Arc::new(HighsSolver::new()))
        .with_budget(session.config.solve_budget())
        .with_integrality_tolerance(solver.integrality_tolerance);

    let state = session.board.state();
    let result = optimizer
        .optimize(team, state, &session.pool, &session.constraints)
        .with_context(|| format!("failed to optimize roster for {team}"))?;
    let rec = Recommendation::from_result(&result, state, &session.pool);

    if json {
        println!("{}", serde_json::to_string_pretty(&rec)?);
        return Ok(());
    }

    println!("{} ({})", rec.team, rec.status);
    println!("Projected weekly floor: {}", format_floor(rec.floor));
    if !rec.weekly_totals.is_empty() {
        let weeks: Vec<String> = rec.weekly_totals.iter().map(|w| format!("{w:.1}")).collect();
        println!("Weekly totals: {}", weeks.join(" "));
    }
    println!();

    if let Some(next) = rec.next_pick() {
        println!("Next pick: {} ({}, {})", next.name, next.position, next.pro_team);
        println!();
    } else if !rec.status.has_roster() {
        println!("No roster completion satisfies the league's position limits.");
        println!();
    }
    if !rec.to_draft.is_empty() {
        print_table("Still to draft", Table::new(rec.to_draft.iter().map(PlayerRow::from)));
    }
    if !rec.current.is_empty() {
        print_table("Current roster", Table::new(rec.current.iter().map(PlayerRow::from)));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// board
// ---------------------------------------------------------------------------

pub fn board(session: &Session, position: Option<&str>, limit: Option<usize>) -> anyhow::Result<()> {
    let position = position
        .map(|label| {
            Position::from_str_pos(label).with_context(|| format!("unknown position {label:?}"))
        })
        .transpose()?;
    let limit = limit.unwrap_or(session.config.strategy.pool.best_available_limit);

    let board = &session.board;
    println!("{}: pick {} of {}", session.config.league.name, board.pick_count(), board.total_picks());
    match board.on_the_clock() {
        Some(clock) => println!(
            "Round {}, pick {}: {} is on the clock",
            clock.round, clock.pick_in_round, clock.team
        ),
        None => println!("Draft complete"),
    }
    if let Some(last) = board.last_pick() {
        let name = session
            .all_players
            .get(last.player_id)
            .map_or_else(|| last.player_id.to_string(), |p| p.name.clone());
        println!("Last pick: {} by {} (round {}, pick {})", name, last.team, last.round, last.pick_in_round);
    }
    println!();

    let available = best_available(&session.pool, board.state().claimed(), position, limit);
    let title = match position {
        Some(p) => format!("Best available {p}"),
        None => "Best available".to_string(),
    };
    print_table(&title, Table::new(available.into_iter().map(PlayerRow::from)));
    Ok(())
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

pub fn check(session: &Session) -> anyhow::Result<()> {
    let config = &session.config;
    let players = &session.all_players;

    println!(
        "League: {} ({} teams, {} players per roster, {} scoring)",
        config.league.name, config.league.num_teams, config.league.roster_size, config.league.scoring
    );
    println!(
        "Projections: {} players over {} weeks ({} playable)",
        players.len(),
        players.num_periods(),
        session.pool.len()
    );
    println!(
        "Draft log: {} of {} picks",
        session.board.pick_count(),
        session.board.total_picks()
    );
    println!();

    let mut by_position: BTreeMap<Position, usize> = BTreeMap::new();
    for p in session.pool.iter() {
        *by_position.entry(p.position).or_insert(0) += 1;
    }
    let rows: Vec<PositionRow> = session
        .constraints
        .position_bounds
        .iter()
        .map(|(position, bounds)| PositionRow {
            position: position.display_str(),
            min: bounds.min,
            max: bounds.max,
            players: by_position.get(position).copied().unwrap_or(0),
        })
        .collect();
    print_table("Roster limits", Table::new(rows));

    session
        .constraints
        .covers(&players.positions())
        .context("projections include a position the league does not configure")?;

    let needed = config.league.num_teams * config.league.roster_size;
    if session.pool.len() < needed {
        warn!(
            "only {} playable players for {} roster spots; late recommendations may be infeasible",
            session.pool.len(),
            needed
        );
    }

    info!("Configuration check passed");
    println!("OK");
    Ok(())
}
