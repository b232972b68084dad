//! SimPak CLI - Command-line interface for building and unpacking packages

pub mod commands;
pub mod progress;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "simpak")]
#[command(about = "SimPak: Sims 4 mod package builder", version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Run the SimPak CLI
///
/// # Errors
/// Returns the error of the command that failed.
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    cli.command.execute()?;

    Ok(())
}
