//! netgames CLI - Explore strategic behavior on networks
//!
//! Subcommands:
//! - Analyze link formation incentives under the connections model
//! - Compute favor-exchange utilities
//! - Play best-response games on predefined networks
//! - Run observational learning on random networks

use anyhow::Result;
use clap::{Parser, Subcommand};
use netgames::cli::commands::{favor, formation, game, learn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "netgames")]
#[command(version, about = "Strategic equilibria on graphs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score every link addition and removal of a network
    Formation(formation::FormationArgs),

    /// Favor-exchange utilities of a network
    Favor(favor::FavorArgs),

    /// Best-response game on a predefined network
    Game(game::GameArgs),

    /// Observational learning of a two-armed bandit
    Learn(learn::LearnArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Commands::Formation(args) => args.common.verbose,
            Commands::Favor(args) => args.common.verbose,
            Commands::Game(args) => args.common.verbose,
            Commands::Learn(args) => args.common.verbose,
        }
    }
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.command.verbose());

    match cli.command {
        Commands::Formation(args) => formation::execute(args),
        Commands::Favor(args) => favor::execute(args),
        Commands::Game(args) => game::execute(args),
        Commands::Learn(args) => learn::execute(args),
    }
}
