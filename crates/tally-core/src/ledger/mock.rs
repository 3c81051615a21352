//! Mock backend for testing
//!
//! Serves fixed datasets from memory. Individual endpoints can be made to
//! fail, and calls are counted so tests can assert no I/O happened.
//! Also backs `LEDGER_BACKEND=mock` for development without a ledger server.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Barrier;

use crate::error::{Error, Result};
use crate::models::{
    Category, CategoryBudget, CategoryGroup, GroupBudget, Money, MonthBudget, MonthToken,
};

use super::LedgerApi;

/// The three reads a ledger serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    MonthAggregate,
    Categories,
    CategoryGroups,
}

#[derive(Clone, Default)]
pub struct MockLedger {
    pub month: MonthBudget,
    pub categories: Vec<Category>,
    pub category_groups: Vec<CategoryGroup>,
    failures: Vec<(Endpoint, String)>,
    calls: Arc<AtomicUsize>,
    rendezvous: Option<Arc<Barrier>>,
}

impl MockLedger {
    /// Create a mock serving the given datasets
    pub fn new(
        month: MonthBudget,
        categories: Vec<Category>,
        category_groups: Vec<CategoryGroup>,
    ) -> Self {
        Self {
            month,
            categories,
            category_groups,
            ..Default::default()
        }
    }

    /// A small household budget used for `LEDGER_BACKEND=mock`
    pub fn sample() -> Self {
        let groups = vec![
            group("grp-bills", "Bills"),
            group("grp-food", "Food"),
            group("grp-fun", "Fun"),
        ];
        let categories = vec![
            category("cat-rent", "Rent", "grp-bills"),
            category("cat-power", "Electric", "grp-bills"),
            category("cat-groceries", "Groceries", "grp-food"),
            category("cat-dining", "Restaurants", "grp-food"),
            category("cat-hobbies", "Hobbies", "grp-fun"),
        ];
        let month = MonthBudget {
            month: String::new(),
            income_available: Money::from_cents(520000),
            total_income: Money::from_cents(520000),
            total_budgeted: Money::from_cents(310000),
            total_spent: Money::from_cents(268450),
            total_balance: Money::from_cents(41550),
            to_budget: Money::from_cents(210000),
            category_groups: vec![
                GroupBudget {
                    id: "grp-bills".into(),
                    categories: vec![
                        budget("cat-rent", 180000, 180000, 0),
                        budget("cat-power", 15000, 12450, 2550),
                    ],
                },
                GroupBudget {
                    id: "grp-food".into(),
                    categories: vec![
                        budget("cat-groceries", 80000, 61000, 19000),
                        budget("cat-dining", 25000, 15000, 10000),
                    ],
                },
                GroupBudget {
                    id: "grp-fun".into(),
                    categories: vec![budget("cat-hobbies", 10000, 0, 10000)],
                },
            ],
            ..Default::default()
        };
        Self::new(month, categories, groups)
    }

    /// Make one endpoint fail with an upstream error
    pub fn failing(mut self, endpoint: Endpoint, message: &str) -> Self {
        self.failures.push((endpoint, message.to_string()));
        self
    }

    /// Make every endpoint wait until all three are in flight at once
    pub fn with_rendezvous(mut self) -> Self {
        self.rendezvous = Some(Arc::new(Barrier::new(3)));
        self
    }

    /// Total calls served across all endpoints (and clones)
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Endpoints configured to fail
    pub fn failing_endpoints(&self) -> HashSet<Endpoint> {
        self.failures.iter().map(|(e, _)| *e).collect()
    }

    async fn enter(&self, endpoint: Endpoint) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(ref barrier) = self.rendezvous {
            barrier.wait().await;
        }
        match self.failures.iter().find(|(e, _)| *e == endpoint) {
            Some((_, message)) => Err(Error::Upstream(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl LedgerApi for MockLedger {
    async fn fetch_month_aggregate(&self, month: &MonthToken) -> Result<MonthBudget> {
        self.enter(Endpoint::MonthAggregate).await?;
        Ok(MonthBudget {
            month: month.to_string(),
            ..self.month.clone()
        })
    }

    async fn fetch_all_categories(&self) -> Result<Vec<Category>> {
        self.enter(Endpoint::Categories).await?;
        Ok(self.categories.clone())
    }

    async fn fetch_all_category_groups(&self) -> Result<Vec<CategoryGroup>> {
        self.enter(Endpoint::CategoryGroups).await?;
        Ok(self.category_groups.clone())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

fn group(id: &str, name: &str) -> CategoryGroup {
    CategoryGroup {
        id: id.to_string(),
        name: name.to_string(),
    }
}

fn category(id: &str, name: &str, group_id: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        group_id: Some(group_id.to_string()),
    }
}

fn budget(id: &str, budgeted: i64, spent: i64, balance: i64) -> CategoryBudget {
    CategoryBudget {
        id: id.to_string(),
        budgeted: Some(Money::from_cents(budgeted)),
        spent: Some(Money::from_cents(spent)),
        balance: Some(Money::from_cents(balance)),
    }
}
