//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Budget reports from your ledger
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Budget month reports over a personal-finance ledger", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Ledger config file (defaults to ~/.local/share/tally/config/ledger.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the MCP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3001")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Print the budget report for a month
    BudgetMonth {
        /// Month in YYYY-MM format (defaults to the current month)
        month: Option<String>,
    },
}
