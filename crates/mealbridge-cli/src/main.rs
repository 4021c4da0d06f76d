mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{LoadCommand, ReportCommand};

/// Mealbridge CLI - food donation analytics over CSV sources
#[derive(Debug, Parser)]
#[command(
    name = "mealbridge",
    version,
    about = "Load food donation CSV sources and run the aggregate report battery"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load the four CSV sources into the database as one atomic batch
    Load(LoadCommand),
    /// Run the thirteen aggregate reports and print each table
    Report(ReportCommand),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Load(cmd) => cmd.execute()?,
        Commands::Report(cmd) => cmd.execute()?,
    };

    std::process::exit(exit_code);
}
