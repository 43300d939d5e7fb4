// Everything a command needs, loaded once from config.

use anyhow::Context;
use tracing::info;

use floorcast_core::config::Config;
use floorcast_core::constraints::ConstraintSet;
use floorcast_core::draft::board::DraftBoard;
use floorcast_core::players::pool::PlayerPool;
use floorcast_core::players::projections::load_player_pool;

pub struct Session {
    pub config: Config,
    /// The full projection file.
    pub all_players: PlayerPool,
    /// Players worth considering: above the season-points cutoff, plus
    /// everyone already drafted.
    pub pool: PlayerPool,
    pub board: DraftBoard,
    pub constraints: ConstraintSet,
}

impl Session {
    /// Load projections and the draft log, optionally rewound to the first
    /// `at_pick` picks.
    pub fn load(config: Config, at_pick: Option<usize>) -> anyhow::Result<Self> {
        let path = config.players_path();
        let all_players = load_player_pool(&path)
            .with_context(|| format!("failed to load projections from {}", path.display()))?;

        let board = config.draft_board().context("invalid draft log")?;
        board
            .validate_against(&all_players)
            .context("draft log does not match the projections")?;
        let board = match at_pick {
            Some(k) => {
                info!("Rewinding draft to pick {} of {}", k.min(board.pick_count()), board.pick_count());
                board.rewind(k).context("failed to rewind draft log")?
            }
            None => board,
        };

        let pool = all_players.playable(config.strategy.pool.min_season_points, board.state().claimed());
        info!(
            "{} of {} players above {} season points",
            pool.len(),
            all_players.len(),
            config.strategy.pool.min_season_points
        );

        let constraints = config.constraint_set();
        Ok(Session {
            config,
            all_players,
            pool,
            board,
            constraints,
        })
    }
}
