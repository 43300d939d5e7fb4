// Command-line interface definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Floorcast - weekly-floor roster recommendations for snake drafts.
#[derive(Parser, Debug)]
#[command(name = "floorcast")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding config/ and defaults/ (defaults to the current directory)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recommend the remaining picks that maximize a team's weekly floor
    Recommend(RecommendArgs),

    /// Show who is on the clock and the best available players
    Board(BoardArgs),

    /// Load and validate config, projections and the draft log
    Check,
}

/// Replay only the first K picks of the draft log.
#[derive(Args, Debug, Clone, Copy)]
pub struct AtPick {
    /// Number of logged picks to replay (defaults to all)
    #[arg(long = "at-pick", value_name = "K")]
    pub at_pick: Option<usize>,
}

#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// Team number, starting at 1
    #[arg(long)]
    pub team: usize,

    #[command(flatten)]
    pub at: AtPick,

    /// Print the recommendation as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct BoardArgs {
    #[command(flatten)]
    pub at: AtPick,

    /// Only list players at this position (QB, RB, WR, TE, K, D/ST)
    #[arg(long)]
    pub position: Option<String>,

    /// How many players to list (defaults to the configured limit)
    #[arg(long)]
    pub limit: Option<usize>,
}
