//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Run the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Converge(args) => commands::converge::execute(&args),
        Commands::Status(args) => commands::status::execute(&args),
        Commands::InitConfig(args) => commands::init_config::execute(&args),
    }
}

/// Install the log subscriber. `RUST_LOG` wins when set; otherwise
/// `--verbose` raises the default level from info to debug.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
