//! Ledger REST API backend
//!
//! HTTP client for an Actual-style REST wrapper. Every endpoint is scoped to
//! one budget and wraps its payload as `{"data": ...}`:
//!
//! - `GET {url}/budgets/{budget_id}/months/{month}`
//! - `GET {url}/budgets/{budget_id}/categories`
//! - `GET {url}/budgets/{budget_id}/categorygroups`

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::LedgerConfig;
use crate::error::{Error, Result};
use crate::models::{Category, CategoryGroup, MonthBudget, MonthToken};

use super::LedgerApi;

#[derive(Clone)]
pub struct HttpLedger {
    http_client: Client,
    base_url: String,
    budget_id: String,
    api_key: Option<String>,
}

impl HttpLedger {
    /// Create a new backend with a default client
    pub fn new(base_url: &str, budget_id: &str, api_key: Option<&str>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            budget_id: budget_id.to_string(),
            api_key: api_key.map(str::to_string),
        }
    }

    /// Create from resolved configuration (applies the transport timeout)
    pub fn from_config(config: &LedgerConfig) -> Result<Self> {
        let (url, budget_id) = config.http_target()?;
        let http_client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http_client,
            ..Self::new(url, budget_id, config.api_key.as_deref())
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}/budgets/{}/{}", self.base_url, self.budget_id, path);
        debug!(url = %url, "Ledger request");

        let mut request = self.http_client.get(&url);
        if let Some(ref key) = self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(upstream_message(status, &body)));
        }

        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.data)
    }
}

/// Response wrapper used by every endpoint
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Error body shapes the API is known to send
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Prefer the API's own message; fall back to the status line
fn upstream_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.or(b.message))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Ledger API returned {}", status))
}

/// The categories endpoint can mix group records into the list; only
/// records carrying a group reference are categories.
fn categories_from_records(records: Vec<serde_json::Value>) -> Result<Vec<Category>> {
    records
        .into_iter()
        .filter(|r| r.get("group_id").is_some() || r.get("groupId").is_some())
        .map(|r| serde_json::from_value(r).map_err(Error::from))
        .collect()
}

#[async_trait]
impl LedgerApi for HttpLedger {
    async fn fetch_month_aggregate(&self, month: &MonthToken) -> Result<MonthBudget> {
        self.get(&format!("months/{}", month)).await
    }

    async fn fetch_all_categories(&self) -> Result<Vec<Category>> {
        let records: Vec<serde_json::Value> = self.get("categories").await?;
        categories_from_records(records)
    }

    async fn fetch_all_category_groups(&self) -> Result<Vec<CategoryGroup>> {
        self.get("categorygroups").await
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let ledger = HttpLedger::new("http://localhost:5007/v1/", "b", None);
        assert_eq!(ledger.base_url(), "http://localhost:5007/v1");
    }

    #[test]
    fn test_upstream_message_prefers_body() {
        assert_eq!(
            upstream_message(StatusCode::NOT_FOUND, r#"{"error": "Budget data not found"}"#),
            "Budget data not found"
        );
        assert_eq!(
            upstream_message(StatusCode::BAD_REQUEST, r#"{"message": "bad month"}"#),
            "bad month"
        );
    }

    #[test]
    fn test_upstream_message_falls_back_to_status() {
        let msg = upstream_message(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(msg, "Ledger API returned 502 Bad Gateway");

        let msg = upstream_message(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error": ""}"#);
        assert!(msg.contains("500"));
    }

    #[test]
    fn test_categories_from_records_drops_groups() {
        let records = vec![
            json!({"id": "g1", "name": "Food", "is_income": false}),
            json!({"id": "c1", "name": "Groceries", "group_id": "g1"}),
            json!({"id": "c2", "name": "Loose", "group_id": null}),
        ];

        let categories = categories_from_records(records).unwrap();
        let ids: Vec<_> = categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2"]);
        assert_eq!(categories[1].group_id, None);
    }

    #[test]
    fn test_categories_from_records_rejects_malformed() {
        let records = vec![json!({"id": 7, "group_id": "g1"})];
        let err = categories_from_records(records).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
