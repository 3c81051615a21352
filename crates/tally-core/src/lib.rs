//! Tally Core Library
//!
//! Budget reporting over a personal-finance ledger:
//! - Ledger API backends (REST over HTTP, in-memory mock)
//! - Ledger connection configuration
//! - The `get-budget-month` pipeline (validate, fetch, join, render)

pub mod budget_month;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;

/// Test utilities including a mock ledger REST server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use budget_month::{build_budget_month_report, report_for_month, GetBudgetMonthArgs};
pub use config::{BackendKind, LedgerConfig};
pub use error::{Error, ErrorKind, Result};
pub use ledger::{Endpoint, HttpLedger, LedgerApi, LedgerClient, MockLedger};
pub use models::{Category, CategoryGroup, Money, MonthBudget, MonthToken};
