//! Server command implementation

use std::path::Path;

use anyhow::Result;
use tally_core::LedgerApi;

use super::open_ledger;

pub async fn cmd_serve(config_path: Option<&Path>, host: &str, port: u16) -> Result<()> {
    let ledger = open_ledger(config_path)?;

    println!("🚀 Starting Tally MCP server...");
    println!("   Ledger backend: {}", ledger.name());
    println!("   MCP endpoint: http://{}:{}/mcp", host, port);
    println!();
    println!("   Press Ctrl+C to stop");

    tally_server::start_mcp_server(ledger, host, port).await
}
