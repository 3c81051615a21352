//! Concurrent retrieval of the datasets a month report needs

use tracing::debug;

use crate::error::Result;
use crate::ledger::LedgerApi;
use crate::models::{Category, CategoryGroup, MonthBudget, MonthToken};

/// Raw datasets for one report, untransformed
#[derive(Debug, Clone)]
pub struct FetchedData {
    pub budget: MonthBudget,
    pub categories: Vec<Category>,
    pub category_groups: Vec<CategoryGroup>,
}

/// Fetch the month aggregate, categories and groups together.
///
/// The first failure aborts the whole fetch; the remaining requests are dropped.
pub async fn fetch_all<L>(ledger: &L, month: &MonthToken) -> Result<FetchedData>
where
    L: LedgerApi + ?Sized,
{
    debug!(backend = ledger.name(), month = %month, "Fetching budget month data");

    let (mut budget, categories, category_groups) = tokio::try_join!(
        ledger.fetch_month_aggregate(month),
        ledger.fetch_all_categories(),
        ledger.fetch_all_category_groups(),
    )?;

    if budget.month.is_empty() {
        budget.month = month.to_string();
    }

    debug!(
        month = %month,
        groups = category_groups.len(),
        categories = categories.len(),
        budget_groups = budget.category_groups.len(),
        "Fetched budget month data"
    );

    Ok(FetchedData {
        budget,
        categories,
        category_groups,
    })
}
