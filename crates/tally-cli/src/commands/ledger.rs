//! Ledger client setup shared by commands

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::{LedgerApi, LedgerClient, LedgerConfig};
use tracing::debug;

/// Resolve ledger configuration and build the client
pub fn open_ledger(config_path: Option<&Path>) -> Result<LedgerClient> {
    let config = LedgerConfig::load(config_path).context("Failed to load ledger config")?;
    let ledger = LedgerClient::from_config(&config).context("Failed to create ledger client")?;
    debug!(backend = ledger.name(), url = ?config.url, "Ledger client ready");
    Ok(ledger)
}
