//! Tally CLI - Budget reports over a personal-finance ledger
//!
//! Usage:
//!   tally serve --port 3001        Start the MCP server
//!   tally budget-month 2024-01     Print a month's budget report

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Reports go to stdout, so logs go to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Serve { port, host } => commands::cmd_serve(config, &host, port).await,
        Commands::BudgetMonth { month } => {
            commands::cmd_budget_month(config, month.as_deref()).await
        }
    }
}
