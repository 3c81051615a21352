//! MCP (Model Context Protocol) Server for Tally
//!
//! Exposes budget reports to LLMs via MCP tools.
//!
//! # Architecture
//!
//! The server uses HTTP/SSE (Streamable HTTP) transport for local network
//! access. Each tool call validates its input, fetches from the ledger and
//! renders markdown; nothing is shared between calls except the client.
//!
//! # Example
//!
//! ```bash
//! tally serve --port 3001
//! ```
//!
//! # Available Tools
//!
//! - `get-budget-month` - Budgeted/spent/balance for every category in a month


use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use serde_json::json;
use tracing::{info, warn};

use tally_core::budget_month::{parse_args, report_for_month, GetBudgetMonthArgs};
use tally_core::{Error, ErrorKind, LedgerApi, LedgerClient};

/// Tally MCP Server state
#[derive(Clone)]
pub struct TallyMcpServer {
    /// Ledger backend (immutable, shared by every call)
    ledger: LedgerClient,
    /// Tool router for MCP operations
    tool_router: ToolRouter<Self>,
}

impl TallyMcpServer {
    /// Create a new MCP server backed by the given ledger
    pub fn new(ledger: LedgerClient) -> Self {
        Self {
            ledger,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_handler]
impl ServerHandler for TallyMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "tally".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("Tally Budget Reports".to_string()),
                website_url: None,
                icons: None,
            },
            instructions: Some(
                "Tally reads a personal budget ledger. Use get-budget-month with a YYYY-MM \
                 month to see budgeted, spent and balance figures by category group."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl TallyMcpServer {
    /// Budget report for one month, grouped by category group
    #[tool(
        name = "get-budget-month",
        description = "Get detailed budget information for a specific month, including budgeted amounts, spent amounts, and balances for all categories organized by category groups."
    )]
    async fn get_budget_month(
        &self,
        Parameters(args): Parameters<GetBudgetMonthArgs>,
    ) -> Result<CallToolResult, McpError> {
        let result = match parse_args(&args) {
            Ok(month) => {
                info!(month = %month, backend = self.ledger.name(), "get-budget-month");
                report_for_month(&self.ledger, &month).await
            }
            Err(e) => Err(e),
        };
        into_tool_result(result)
    }
}

/// Map the core's error kinds onto MCP responses.
///
/// Validation problems are protocol-level `invalid_params`; ledger failures
/// are reported as a tool error result so the model sees the message.
fn into_tool_result(result: tally_core::Result<String>) -> Result<CallToolResult, McpError> {
    let err = match result {
        Ok(markdown) => return Ok(CallToolResult::success(vec![Content::text(markdown)])),
        Err(e) => e,
    };

    match err.kind() {
        ErrorKind::Validation => {
            let data = match &err {
                Error::Validation { field, .. } => Some(json!({ "field": field })),
                _ => None,
            };
            Err(McpError::invalid_params(err.to_string(), data))
        }
        ErrorKind::Upstream => {
            warn!(error = %err, "Ledger fetch failed");
            Ok(CallToolResult::error(vec![Content::text(err.to_string())]))
        }
        ErrorKind::Unexpected => Err(McpError::internal_error(err.to_string(), None)),
    }
}

/// Start the MCP server on the given port
pub async fn start_mcp_server(ledger: LedgerClient, host: &str, port: u16) -> anyhow::Result<()> {
    use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
    use rmcp::transport::streamable_http_server::StreamableHttpService;

    info!(backend = ledger.name(), "Starting MCP server at http://{}:{}/mcp", host, port);

    let service = StreamableHttpService::new(
        move || Ok(TallyMcpServer::new(ledger.clone())),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let router = axum::Router::new().nest_service("/mcp", service);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("MCP server ready at http://{}/mcp", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            // Wait for shutdown signal
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}
