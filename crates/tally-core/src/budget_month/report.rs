//! Budget month report: join fetched datasets and render them as markdown

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Category, Money, MonthBudget};

use super::fetcher::FetchedData;

/// Month-level totals, copied verbatim from the ledger aggregate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetSummary {
    pub total_budgeted: Money,
    pub total_spent: Money,
    pub total_balance: Money,
    pub to_budget: Money,
    pub income_available: Money,
}

impl From<&MonthBudget> for BudgetSummary {
    fn from(budget: &MonthBudget) -> Self {
        Self {
            total_budgeted: budget.total_budgeted,
            total_spent: budget.total_spent,
            total_balance: budget.total_balance,
            to_budget: budget.to_budget,
            income_available: budget.income_available,
        }
    }
}

/// One category's figures for the month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportCategory {
    pub id: String,
    pub name: String,
    pub budgeted: Money,
    pub spent: Money,
    pub balance: Money,
}

/// A category group with its matched categories
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportGroup {
    pub id: String,
    pub name: String,
    pub categories: Vec<ReportCategory>,
    /// Sum of `categories`, never taken from the ledger
    pub total_budgeted: Money,
    pub total_spent: Money,
    pub total_balance: Money,
}

impl ReportGroup {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            categories: Vec::new(),
            total_budgeted: Money::zero(),
            total_spent: Money::zero(),
            total_balance: Money::zero(),
        }
    }

    pub fn add_category(&mut self, category: ReportCategory) {
        self.total_budgeted += category.budgeted;
        self.total_spent += category.spent;
        self.total_balance += category.balance;
        self.categories.push(category);
    }
}

/// Everything the renderer needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportModel {
    pub month: String,
    pub summary: BudgetSummary,
    /// Only groups with at least one category, in category-group-list order
    pub groups: Vec<ReportGroup>,
}

/// Join the month aggregate with category and group names.
///
/// Best effort: aggregate entries whose category or group id is unknown are
/// skipped, absent amounts count as zero, and empty groups are dropped.
pub fn build_report(data: &FetchedData) -> ReportModel {
    let mut groups: Vec<ReportGroup> = Vec::with_capacity(data.category_groups.len());
    let mut group_index: HashMap<&str, usize> = HashMap::new();
    for group in &data.category_groups {
        match group_index.get(group.id.as_str()) {
            // A repeated id replaces the earlier record but keeps its position
            Some(&idx) => groups[idx] = ReportGroup::new(&group.id, &group.name),
            None => {
                group_index.insert(group.id.as_str(), groups.len());
                groups.push(ReportGroup::new(&group.id, &group.name));
            }
        }
    }

    let mut categories: HashMap<&str, &Category> = HashMap::new();
    for category in &data.categories {
        categories.entry(category.id.as_str()).or_insert(category);
    }

    for group_budget in &data.budget.category_groups {
        for entry in &group_budget.categories {
            let Some(category) = categories.get(entry.id.as_str()) else {
                continue;
            };
            let Some(&idx) = group_index.get(group_budget.id.as_str()) else {
                continue;
            };

            groups[idx].add_category(ReportCategory {
                id: category.id.clone(),
                name: category.name.clone(),
                budgeted: entry.budgeted.unwrap_or_default(),
                spent: entry.spent.unwrap_or_default(),
                balance: entry.balance.unwrap_or_default(),
            });
        }
    }

    groups.retain(|g| !g.categories.is_empty());

    ReportModel {
        month: data.budget.month.clone(),
        summary: BudgetSummary::from(&data.budget),
        groups,
    }
}

/// Render a report model as markdown. Output depends only on the model.
pub fn render(model: &ReportModel) -> String {
    let summary = &model.summary;
    let mut lines = vec![
        format!("# Budget for {}", model.month),
        String::new(),
        "## Summary".to_string(),
        format!("- Total Budgeted: {}", summary.total_budgeted),
        format!("- Total Spent: {}", summary.total_spent),
        format!("- Total Balance: {}", summary.total_balance),
        format!("- To Budget: {}", summary.to_budget),
        format!("- Income Available: {}", summary.income_available),
    ];

    if !model.groups.is_empty() {
        lines.push(String::new());
        lines.push("## Category Groups".to_string());

        for group in &model.groups {
            lines.push(String::new());
            lines.push(format!("### {}", group.name));
            lines.push(format!(
                "**Group Total**: {}",
                figures(group.total_budgeted, group.total_spent, group.total_balance)
            ));
            lines.push(String::new());
            for category in &group.categories {
                lines.push(format!(
                    "- **{}**: {}",
                    category.name,
                    figures(category.budgeted, category.spent, category.balance)
                ));
            }
        }
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn figures(budgeted: Money, spent: Money, balance: Money) -> String {
    format!(
        "Budgeted {} | Spent {} | Balance {}",
        budgeted, spent, balance
    )
}
