// Integration tests for the config -> projections -> board -> recommendation
// flow, driven the way the CLI drives it.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use floorcast_core::config::{load_config, Config};
use floorcast_core::draft::board::BoardError;
use floorcast_core::draft::pick::{PlayerId, Position, TeamId};
use floorcast_core::optimize::{Recommendation, ResultStatus, RosterOptimizer};
use floorcast_core::players::pool::{best_available, PlayerPool};
use floorcast_core::players::projections::load_player_pool;
use floorcast_core::solver::HighsSolver;

// ===========================================================================
// Test helpers
// ===========================================================================

const FIXTURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn league_toml(num_teams: usize) -> String {
    format!(
        r#"
[league]
name = "Fixture League"
num_teams = {num_teams}
roster_size = 6
scoring = "ppr"

[league.positions]
QB   = {{ min = 1, max = 1 }}
RB   = {{ min = 1, max = 2 }}
WR   = {{ min = 1, max = 2 }}
TE   = {{ min = 1, max = 1 }}
K    = {{ min = 0, max = 1 }}
"D/ST" = {{ min = 0, max = 1 }}
"#
    )
}

fn strategy_toml() -> String {
    format!(
        r#"
[solver]
time_limit_secs = 30.0
mip_rel_gap = 0.0

[pool]
min_season_points = 0.0
best_available_limit = 5

[logging]
level = "warn"
format = "json"

[data_paths]
players_dir = "{FIXTURES}"
"#
    )
}

/// A base dir whose defaults/ holds the fixture league, plus an optional
/// draft.toml written straight into config/.
fn setup(name: &str, num_teams: usize, draft_toml: Option<&str>) -> PathBuf {
    let tmp = std::env::temp_dir().join(name);
    let _ = fs::remove_dir_all(&tmp);
    fs::create_dir_all(tmp.join("defaults")).unwrap();
    fs::write(tmp.join("defaults/league.toml"), league_toml(num_teams)).unwrap();
    fs::write(tmp.join("defaults/strategy.toml"), strategy_toml()).unwrap();
    if let Some(draft) = draft_toml {
        fs::create_dir_all(tmp.join("config")).unwrap();
        fs::write(tmp.join("config/draft.toml"), draft).unwrap();
    }
    tmp
}

fn load_pool(config: &Config) -> PlayerPool {
    load_player_pool(&config.players_path()).unwrap()
}

fn optimizer(config: &Config) -> RosterOptimizer {
    RosterOptimizer::new(Arc::new(HighsSolver::new()))
        .with_budget(config.solve_budget())
        .with_integrality_tolerance(config.strategy.solver.integrality_tolerance)
}

// ===========================================================================
// Test: configuration drives the whole flow
// ===========================================================================

#[test]
fn first_run_copies_defaults_and_loads() {
    let tmp = setup("floorcast_flow_first_run", 3, None);
    let config = load_config(&tmp).unwrap();

    assert!(tmp.join("config/league.toml").exists());
    assert!(tmp.join("config/strategy.toml").exists());
    assert_eq!(config.strategy.logging.format, "json");
    assert_eq!(config.players_path(), Path::new(FIXTURES).join("players_ppr.csv"));

    let c = config.constraint_set();
    assert_eq!(c.bounds(Position::Defense).map(|b| b.max), Some(1));

    let pool = load_pool(&config);
    c.covers(&pool.positions()).unwrap();

    let board = config.draft_board().unwrap();
    assert_eq!(board.pick_count(), 0);
    let clock = board.on_the_clock().unwrap();
    assert_eq!((clock.round, clock.pick_in_round, clock.team), (1, 1, TeamId(0)));

    let _ = fs::remove_dir_all(&tmp);
}

#[test]
fn recommendation_for_team_on_the_clock() {
    let tmp = setup(
        "floorcast_flow_recommend",
        3,
        Some("[draft]\norder_style = \"snake\"\npicks = [303, 101, 203, 102]\n"),
    );
    let config = load_config(&tmp).unwrap();
    let pool = load_pool(&config);
    let board = config.draft_board().unwrap();
    board.validate_against(&pool).unwrap();

    // Snake: picks 0..2 go to teams 1..3, pick 3 to team 3, pick 4 to team 2.
    let clock = board.on_the_clock().unwrap();
    assert_eq!(clock.team, TeamId(1));
    assert_eq!((clock.round, clock.pick_in_round), (2, 2));
    let last = board.last_pick().unwrap();
    assert_eq!((last.team, last.player_id), (TeamId(2), PlayerId(102)));

    let state = board.state();
    let claimed = state.claimed().clone();
    let playable = pool.playable(config.strategy.pool.min_season_points, &claimed);
    let result = optimizer(&config)
        .optimize(clock.team, state, &playable, &config.constraint_set())
        .unwrap();
    assert_eq!(result.status, ResultStatus::Optimal);
    assert!(result.roster.contains(&PlayerId(101)));
    assert!(!result.roster.contains(&PlayerId(999)));

    let rec = Recommendation::from_result(&result, state, &playable);
    assert_eq!(rec.current.len(), 1);
    assert_eq!(rec.current[0].id, PlayerId(101));
    assert_eq!(rec.to_draft.len(), 5);
    for p in &rec.to_draft {
        assert!(!claimed.contains(&p.id));
    }
    // A QB is already on the roster and QB max is 1.
    assert!(rec.to_draft.iter().all(|p| p.position != Position::Quarterback));
    let totals: Vec<f64> = rec.to_draft.iter().map(|p| p.season_total).collect();
    assert!(totals.windows(2).all(|w| w[0] >= w[1]));

    let _ = fs::remove_dir_all(&tmp);
}

#[test]
fn going_back_to_an_earlier_pick() {
    let tmp = setup(
        "floorcast_flow_rewind",
        2,
        Some("[draft]\npicks = [101, 102, 103, 202, 201]\n"),
    );
    let config = load_config(&tmp).unwrap();
    let pool = load_pool(&config);
    let board = config.draft_board().unwrap();

    let earlier = board.rewind(1).unwrap();
    assert_eq!(earlier.pick_count(), 1);
    let clock = earlier.on_the_clock().unwrap();
    assert_eq!(clock.team, TeamId(1));

    let result = optimizer(&config)
        .optimize(clock.team, earlier.state(), &pool, &config.constraint_set())
        .unwrap();
    assert_eq!(result.status, ResultStatus::Optimal);
    // Later picks are undone, so 102 and 103 are available again.
    let qbs: BTreeSet<PlayerId> = result
        .roster
        .iter()
        .copied()
        .filter(|id| pool.get(*id).unwrap().position == Position::Quarterback)
        .collect();
    assert_eq!(qbs.len(), 1);
    assert!(!qbs.contains(&PlayerId(101)));

    let _ = fs::remove_dir_all(&tmp);
}

#[test]
fn best_available_after_picks() {
    let tmp = setup(
        "floorcast_flow_best_available",
        2,
        Some("[draft]\npicks = [101, 303]\n"),
    );
    let config = load_config(&tmp).unwrap();
    let pool = load_pool(&config);
    let board = config.draft_board().unwrap();

    let limit = config.strategy.pool.best_available_limit;
    let top = best_available(&pool, board.state().claimed(), None, limit);
    assert_eq!(top.len(), 5);
    assert!(top.iter().all(|p| p.id != PlayerId(101) && p.id != PlayerId(303)));

    let qbs = best_available(&pool, board.state().claimed(), Some(Position::Quarterback), limit);
    let ids: Vec<u32> = qbs.iter().map(|p| p.id.0).collect();
    // 102: 101 points, 103: 102 points.
    assert_eq!(ids, vec![103, 102]);

    let _ = fs::remove_dir_all(&tmp);
}

#[test]
fn unknown_pick_in_log_is_reported() {
    let tmp = setup("floorcast_flow_unknown_pick", 2, Some("[draft]\npicks = [101, 4242]\n"));
    let config = load_config(&tmp).unwrap();
    let pool = load_pool(&config);
    let board = config.draft_board().unwrap();

    let err = board.validate_against(&pool).unwrap_err();
    assert_eq!(
        err,
        BoardError::UnknownPlayer {
            player_id: PlayerId(4242),
            overall: 1
        }
    );

    let _ = fs::remove_dir_all(&tmp);
}

#[test]
fn duplicate_pick_in_log_is_rejected() {
    let tmp = setup("floorcast_flow_duplicate_pick", 2, Some("[draft]\npicks = [101, 101]\n"));
    let config = load_config(&tmp).unwrap();
    let err = config.draft_board().unwrap_err();
    assert!(matches!(err, BoardError::DuplicatePick { overall: 1, .. }));

    let _ = fs::remove_dir_all(&tmp);
}
