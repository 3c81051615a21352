//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `ledger` - Shared ledger setup (open_ledger)
//! - `reports` - Report commands (budget-month)
//! - `serve` - MCP server command

pub mod ledger;
pub mod reports;
pub mod serve;

// Re-export command functions for main.rs
pub use ledger::*;
pub use reports::*;
pub use serve::*;
