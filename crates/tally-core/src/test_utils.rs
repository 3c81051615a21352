//! Test utilities for tally-core
//!
//! This module provides testing infrastructure including a mock ledger REST
//! server that can be used for development and integration tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::sync::oneshot;

/// Raw JSON the mock server hands out, keyed the way the real API is
#[derive(Debug, Clone, Default)]
pub struct LedgerFixture {
    pub budget_id: String,
    pub api_key: Option<String>,
    /// Month aggregate payloads by `YYYY-MM`
    pub months: HashMap<String, Value>,
    pub categories: Value,
    pub category_groups: Value,
}

impl LedgerFixture {
    /// The one-group, one-category budget used across the test suite
    pub fn food() -> Self {
        let mut months = HashMap::new();
        months.insert(
            "2024-01".to_string(),
            json!({
                "month": "2024-01",
                "incomeAvailable": 500000,
                "lastMonthOverspent": 0,
                "forNextMonth": 0,
                "totalBudgeted": 400000,
                "toBudget": 100000,
                "fromLastMonth": 0,
                "totalIncome": 500000,
                "totalSpent": 350000,
                "totalBalance": 50000,
                "categoryGroups": [
                    {
                        "id": "group1",
                        "name": "Food",
                        "budgeted": 999999,
                        "categories": [
                            {"id": "cat1", "name": "Groceries", "budgeted": 200000, "spent": 150000, "balance": 50000}
                        ]
                    }
                ]
            }),
        );

        Self {
            budget_id: "test-budget".to_string(),
            api_key: None,
            months,
            categories: json!([
                {"id": "group1", "name": "Food", "is_income": false},
                {"id": "cat1", "name": "Groceries", "group_id": "group1", "is_income": false}
            ]),
            category_groups: json!([{"id": "group1", "name": "Food"}]),
        }
    }

    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }
}

/// Mock ledger REST server for testing and development
pub struct MockLedgerServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockLedgerServer {
    /// Start the mock server on an available port
    pub async fn start(fixture: LedgerFixture) -> Self {
        let app = Router::new()
            .route("/budgets/:budget_id/months/:month", get(handle_month))
            .route("/budgets/:budget_id/categories", get(handle_categories))
            .route("/budgets/:budget_id/categorygroups", get(handle_groups))
            .with_state(Arc::new(fixture));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockLedgerServer {
    fn drop(&mut self) {
        self.stop();
    }
}

type Fixture = State<Arc<LedgerFixture>>;

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Check the budget id and API key the way the real API does
fn authorize(fixture: &LedgerFixture, budget_id: &str, headers: &HeaderMap) -> Option<Response> {
    if let Some(ref key) = fixture.api_key {
        let sent = headers.get("x-api-key").and_then(|v| v.to_str().ok());
        if sent != Some(key.as_str()) {
            return Some(error(StatusCode::UNAUTHORIZED, "Invalid API key"));
        }
    }
    if budget_id != fixture.budget_id {
        return Some(error(StatusCode::NOT_FOUND, "Budget file not found"));
    }
    None
}

async fn handle_month(
    State(fixture): Fixture,
    Path((budget_id, month)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    if let Some(rejection) = authorize(&fixture, &budget_id, &headers) {
        return rejection;
    }
    match fixture.months.get(&month) {
        Some(data) => Json(json!({ "data": data })).into_response(),
        None => error(StatusCode::NOT_FOUND, "Budget data not found"),
    }
}

async fn handle_categories(
    State(fixture): Fixture,
    Path(budget_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Some(rejection) = authorize(&fixture, &budget_id, &headers) {
        return rejection;
    }
    Json(json!({ "data": fixture.categories })).into_response()
}

async fn handle_groups(
    State(fixture): Fixture,
    Path(budget_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Some(rejection) = authorize(&fixture, &budget_id, &headers) {
        return rejection;
    }
    Json(json!({ "data": fixture.category_groups })).into_response()
}
