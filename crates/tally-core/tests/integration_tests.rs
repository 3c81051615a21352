//! Integration tests for tally-core
//!
//! These tests exercise the full validate -> fetch -> join -> render workflow
//! against the HTTP backend talking to a mock ledger REST server.

use std::time::Duration;

use serde_json::json;
use tally_core::{
    build_budget_month_report,
    test_utils::{LedgerFixture, MockLedgerServer},
    BackendKind, Error, ErrorKind, HttpLedger, LedgerApi, LedgerClient, LedgerConfig, MonthToken,
};

fn config_for(server: &MockLedgerServer, fixture: &LedgerFixture) -> LedgerConfig {
    LedgerConfig {
        backend: BackendKind::Http,
        url: Some(format!("{}/", server.url())),
        api_key: fixture.api_key.clone(),
        budget_id: Some(fixture.budget_id.clone()),
        timeout: Duration::from_secs(5),
    }
}

// =============================================================================
// HTTP Backend Tests
// =============================================================================

#[tokio::test]
async fn test_fetch_categories_filters_group_records() {
    let fixture = LedgerFixture::food();
    let server = MockLedgerServer::start(fixture.clone()).await;
    let ledger = HttpLedger::from_config(&config_for(&server, &fixture)).unwrap();

    let categories = ledger.fetch_all_categories().await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Groceries");
    assert_eq!(categories[0].group_id.as_deref(), Some("group1"));

    let groups = ledger.fetch_all_category_groups().await.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].name, "Food");
}

#[tokio::test]
async fn test_fetch_month_aggregate() {
    let fixture = LedgerFixture::food();
    let server = MockLedgerServer::start(fixture.clone()).await;
    let ledger = HttpLedger::from_config(&config_for(&server, &fixture)).unwrap();

    let month = MonthToken::parse("2024-01").unwrap();
    let budget = ledger.fetch_month_aggregate(&month).await.unwrap();
    assert_eq!(budget.month, "2024-01");
    assert_eq!(budget.total_budgeted.cents(), 400000);
    assert_eq!(budget.category_groups[0].categories[0].id, "cat1");
}

#[tokio::test]
async fn test_missing_month_is_upstream_error() {
    let fixture = LedgerFixture::food();
    let server = MockLedgerServer::start(fixture.clone()).await;
    let ledger = HttpLedger::from_config(&config_for(&server, &fixture)).unwrap();

    let month = MonthToken::parse("1999-12").unwrap();
    let err = ledger.fetch_month_aggregate(&month).await.unwrap_err();
    assert!(matches!(err, Error::Upstream(ref m) if m == "Budget data not found"));
}

#[tokio::test]
async fn test_api_key_is_sent() {
    let fixture = LedgerFixture::food().with_api_key("s3cret");
    let server = MockLedgerServer::start(fixture.clone()).await;

    let ledger = HttpLedger::from_config(&config_for(&server, &fixture)).unwrap();
    assert!(ledger.fetch_all_category_groups().await.is_ok());

    let mut wrong = config_for(&server, &fixture);
    wrong.api_key = Some("guess".into());
    let ledger = HttpLedger::from_config(&wrong).unwrap();
    let err = ledger.fetch_all_category_groups().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Upstream);
    assert_eq!(err.to_string(), "Invalid API key");
}

#[tokio::test]
async fn test_connection_failure_is_upstream() {
    let fixture = LedgerFixture::food();
    let mut server = MockLedgerServer::start(fixture.clone()).await;
    let config = config_for(&server, &fixture);
    server.stop();
    drop(server);
    tokio::time::sleep(Duration::from_millis(50)).await;

    let ledger = HttpLedger::from_config(&config).unwrap();
    let err = ledger.fetch_all_categories().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Upstream);
}

// =============================================================================
// Full Pipeline Tests
// =============================================================================

#[tokio::test]
async fn test_full_report_over_http() {
    let fixture = LedgerFixture::food();
    let server = MockLedgerServer::start(fixture.clone()).await;
    let ledger = LedgerClient::from_config(&config_for(&server, &fixture)).unwrap();

    let text = build_budget_month_report(&ledger, &json!({ "month": "2024-01" }))
        .await
        .unwrap();

    assert!(text.contains("# Budget for 2024-01"));
    assert!(text.contains("- Total Budgeted: $4000.00"));
    assert!(text.contains("- Income Available: $5000.00"));
    assert!(text.contains("### Food"));
    // Group totals come from matched categories, not the ledger's own figure
    assert!(text.contains("**Group Total**: Budgeted $2000.00 | Spent $1500.00 | Balance $500.00"));
    assert!(text.contains("- **Groceries**: Budgeted $2000.00 | Spent $1500.00 | Balance $500.00"));
}

#[tokio::test]
async fn test_full_report_missing_month_over_http() {
    let fixture = LedgerFixture::food();
    let server = MockLedgerServer::start(fixture.clone()).await;
    let ledger = LedgerClient::from_config(&config_for(&server, &fixture)).unwrap();

    let err = build_budget_month_report(&ledger, &json!({ "month": "2030-02" }))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Upstream);
    assert!(err.to_string().contains("Budget data not found"));
}

#[tokio::test]
async fn test_lenient_amounts_over_http() {
    let mut fixture = LedgerFixture::food();
    fixture.months.insert(
        "2024-02".to_string(),
        json!({
            "month": "2024-02",
            "totalBudgeted": 1000,
            "categoryGroups": [
                {"id": "group1", "categories": [{"id": "cat1", "budgeted": 1000, "spent": null}]},
                {"id": "group-unlisted", "categories": [{"id": "cat1", "budgeted": 5}]}
            ]
        }),
    );
    let server = MockLedgerServer::start(fixture.clone()).await;
    let ledger = LedgerClient::from_config(&config_for(&server, &fixture)).unwrap();

    let text = build_budget_month_report(&ledger, &json!({ "month": "2024-02" }))
        .await
        .unwrap();

    assert!(text.contains("- **Groceries**: Budgeted $10.00 | Spent $0.00 | Balance $0.00"));
    assert!(text.contains("- Total Spent: $0.00"));
}

#[tokio::test]
async fn test_degraded_summary_over_http() {
    let mut fixture = LedgerFixture::food();
    fixture.months.insert(
        "2024-03".to_string(),
        json!({
            "totalBudgeted": null,
            "totalSpent": 1500.4,
            "categoryGroups": [
                {"id": "group1", "categories": [{"id": "cat1", "budgeted": 200000, "spent": 150000, "balance": 50000}]}
            ]
        }),
    );
    let server = MockLedgerServer::start(fixture.clone()).await;
    let ledger = LedgerClient::from_config(&config_for(&server, &fixture)).unwrap();

    let text = build_budget_month_report(&ledger, &json!({ "month": "2024-03" }))
        .await
        .unwrap();

    // Missing month is taken from the request
    assert!(text.starts_with("# Budget for 2024-03\n"));
    assert!(text.contains("- Total Budgeted: $0.00"));
    assert!(text.contains("- Total Spent: $15.00"));
    assert!(text.contains("- **Groceries**: Budgeted $2000.00 | Spent $1500.00 | Balance $500.00"));
}
