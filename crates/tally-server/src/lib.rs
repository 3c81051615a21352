//! Tally MCP Server
//!
//! Exposes Tally budget reports to LLM clients over the Model Context
//! Protocol. The server is read-only: tools query the ledger, never write.

pub mod mcp;

pub use mcp::{start_mcp_server, TallyMcpServer};
