// Floorcast entry point.
//
// Startup sequence:
// 1. Parse arguments
// 2. Copy missing config files from defaults/ and load config
// 3. Initialize tracing (stderr, so stdout carries only command output)
// 4. Load projections and the draft log
// 5. Run the subcommand

mod cli;
mod commands;
mod session;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use floorcast_core::config::{self, LoggingConfig};

use crate::cli::{Cli, Commands};
use crate::session::Session;

fn main() -> anyhow::Result<()> {
    // 1. Parse arguments
    let cli = Cli::parse();

    // 2. Load config
    let base_dir = match cli.config_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    let copied = config::ensure_config_files(&base_dir).context("failed to initialize config")?;
    let config = config::load_config_from(&base_dir).context("failed to load configuration")?;

    // 3. Initialize tracing
    init_tracing(&config.strategy.logging)?;
    for path in &copied {
        info!("Created {} from defaults", path.display());
    }
    info!(
        "Config loaded: league={}, {} teams, roster size {}",
        config.league.name, config.league.num_teams, config.league.roster_size
    );

    // 4. Load projections and the draft log
    let at_pick = match &cli.command {
        Commands::Recommend(args) => args.at.at_pick,
        Commands::Board(args) => args.at.at_pick,
        Commands::Check => None,
    };
    let session = Session::load(config, at_pick)?;

    // 5. Run the subcommand
    match cli.command {
        Commands::Recommend(args) => commands::recommend(&session, args.team, args.json),
        Commands::Board(args) => commands::board(&session, args.position.as_deref(), args.limit),
        Commands::Check => commands::check(&session),
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .with_context(|| format!("invalid log level {:?}", logging.level))?;

    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true);

    let result = match logging.format.as_str() {
        "json" => tracing::subscriber::set_global_default(builder.json().finish()),
        _ => tracing::subscriber::set_global_default(builder.finish()),
    };
    result.context("failed to set tracing subscriber")?;

    Ok(())
}
