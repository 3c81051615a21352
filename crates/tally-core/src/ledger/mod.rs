//! Ledger API backend abstraction
//!
//! The budget report pipeline never talks to the ledger directly; it goes
//! through the `LedgerApi` trait so the data source can be swapped.
//!
//! # Architecture
//!
//! - `LedgerApi` trait: the three reads the report pipeline needs
//! - `LedgerClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `HttpLedger`, `MockLedger`
//!
//! # Usage
//!
//! ```rust,ignore
//! let config = LedgerConfig::load(None)?;
//! let ledger = LedgerClient::from_config(&config)?;
//! let groups = ledger.fetch_all_category_groups().await?;
//! ```

mod http;
mod mock;

pub use http::HttpLedger;
pub use mock::{Endpoint, MockLedger};

use async_trait::async_trait;

use crate::config::{BackendKind, LedgerConfig};
use crate::error::Result;
use crate::models::{Category, CategoryGroup, MonthBudget, MonthToken};

/// Read access to a budget ledger
///
/// Backends should be Send + Sync so one client can serve concurrent requests.
#[async_trait]
pub trait LedgerApi: Send + Sync {
    /// Month-level aggregate figures for one month
    async fn fetch_month_aggregate(&self, month: &MonthToken) -> Result<MonthBudget>;

    /// Every category, regardless of month
    async fn fetch_all_categories(&self) -> Result<Vec<Category>>;

    /// Every category group
    async fn fetch_all_category_groups(&self) -> Result<Vec<CategoryGroup>>;

    /// Backend name (for logging)
    fn name(&self) -> &'static str;
}

/// Concrete ledger client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum LedgerClient {
    /// Ledger REST API
    Http(HttpLedger),
    /// Fixture data for testing
    Mock(MockLedger),
}

impl LedgerClient {
    /// Create a ledger client from resolved configuration
    pub fn from_config(config: &LedgerConfig) -> Result<Self> {
        match config.backend {
            BackendKind::Http => HttpLedger::from_config(config).map(LedgerClient::Http),
            BackendKind::Mock => Ok(LedgerClient::Mock(MockLedger::sample())),
        }
    }

    /// Create a mock backend for testing
    pub fn mock(ledger: MockLedger) -> Self {
        LedgerClient::Mock(ledger)
    }
}

// Implement LedgerApi for LedgerClient by delegating to the inner backend
#[async_trait]
impl LedgerApi for LedgerClient {
    async fn fetch_month_aggregate(&self, month: &MonthToken) -> Result<MonthBudget> {
        match self {
            LedgerClient::Http(b) => b.fetch_month_aggregate(month).await,
            LedgerClient::Mock(b) => b.fetch_month_aggregate(month).await,
        }
    }

    async fn fetch_all_categories(&self) -> Result<Vec<Category>> {
        match self {
            LedgerClient::Http(b) => b.fetch_all_categories().await,
            LedgerClient::Mock(b) => b.fetch_all_categories().await,
        }
    }

    async fn fetch_all_category_groups(&self) -> Result<Vec<CategoryGroup>> {
        match self {
            LedgerClient::Http(b) => b.fetch_all_category_groups().await,
            LedgerClient::Mock(b) => b.fetch_all_category_groups().await,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            LedgerClient::Http(b) => b.name(),
            LedgerClient::Mock(b) => b.name(),
        }
    }
}
