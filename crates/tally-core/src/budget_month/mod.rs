//! `get-budget-month` tool pipeline
//!
//! validate -> fetch -> join -> render. Only the fetch performs I/O; the join
//! and render stages never fail.
//!
//! ```rust,ignore
//! let ledger = LedgerClient::from_config(&LedgerConfig::load(None)?)?;
//! let markdown = build_budget_month_report(&ledger, &json!({"month": "2024-01"})).await?;
//! ```

pub mod fetcher;
pub mod input;
pub mod report;

pub use fetcher::{fetch_all, FetchedData};
pub use input::{parse_args, parse_value, GetBudgetMonthArgs};
pub use report::{build_report, render, BudgetSummary, ReportCategory, ReportGroup, ReportModel};

use serde_json::Value;

use crate::error::Result;
use crate::ledger::LedgerApi;
use crate::models::MonthToken;

/// Validate raw tool input and produce the month report
pub async fn build_budget_month_report<L>(ledger: &L, raw_input: &Value) -> Result<String>
where
    L: LedgerApi + ?Sized,
{
    let month = parse_value(raw_input)?;
    report_for_month(ledger, &month).await
}

/// Produce the month report for an already validated month
pub async fn report_for_month<L>(ledger: &L, month: &MonthToken) -> Result<String>
where
    L: LedgerApi + ?Sized,
{
    let data = fetch_all(ledger, month).await?;
    Ok(render(&build_report(&data)))
}
