mod commands;
mod console;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jobcal")]
#[command(about = "Keep a calendar event for every row of your job sheet")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set Events (1 Week & 3 Day Reminders)
    Sync {
        #[command(flatten)]
        sheet: SheetArgs,
    },
    /// Show each row's Status and Event ID without changing anything
    Status {
        #[command(flatten)]
        sheet: SheetArgs,
    },
}

/// Overrides for the values in ~/.config/jobcal/config.toml
#[derive(Args, Debug, Default, Clone)]
pub struct SheetArgs {
    /// Folder holding the workbook's sheets as CSV files
    #[arg(short, long, value_name = "DIR")]
    pub workbook: Option<PathBuf>,

    /// Sheet to read job rows from
    #[arg(short, long, value_name = "NAME")]
    pub sheet: Option<String>,

    /// Folder calendar events are written to
    #[arg(short, long, value_name = "DIR")]
    pub calendar: Option<PathBuf>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sync { sheet } => commands::sync::run(&sheet),
        Commands::Status { sheet } => {
            commands::status::run(&sheet)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
