//! Domain models for Tally

use std::ops::{Add, AddAssign};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

static MONTH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}$").expect("valid regex"));

/// A validated budget month in `YYYY-MM` form
///
/// Only the shape is checked: `2024-13` is a valid token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MonthToken(String);

impl MonthToken {
    pub fn parse(s: &str) -> Result<Self> {
        if MONTH_PATTERN.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(Error::validation(
                "month",
                format!("'{}' does not match YYYY-MM", s),
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MonthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A currency amount in minor units (cents)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Renders as `$1234.56` / `-$0.05`; no grouping separators
impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// A named partition of categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub id: String,
    pub name: String,
}

/// A budget category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default, alias = "groupId")]
    pub group_id: Option<String>,
}

/// Per-category figures inside a month aggregate
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryBudget {
    pub id: String,
    #[serde(default, deserialize_with = "lenient_money")]
    pub budgeted: Option<Money>,
    #[serde(default, deserialize_with = "lenient_money")]
    pub spent: Option<Money>,
    #[serde(default, deserialize_with = "lenient_money")]
    pub balance: Option<Money>,
}

/// Per-group entry inside a month aggregate
///
/// Any group-level totals the ledger sends are ignored; report totals are
/// always summed from matched categories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupBudget {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub categories: Vec<CategoryBudget>,
}

/// Month-level aggregate computed by the ledger
///
/// Summary figures read leniently like category figures: a missing, null or
/// non-numeric total is 0. A missing `month` is left empty and filled in from
/// the requested month by the fetcher.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthBudget {
    #[serde(default, deserialize_with = "lenient_string")]
    pub month: String,
    #[serde(default, deserialize_with = "lenient_total")]
    pub income_available: Money,
    #[serde(default, deserialize_with = "lenient_total")]
    pub last_month_overspent: Money,
    #[serde(default, deserialize_with = "lenient_total")]
    pub for_next_month: Money,
    #[serde(default, deserialize_with = "lenient_total")]
    pub total_budgeted: Money,
    #[serde(default, deserialize_with = "lenient_total")]
    pub to_budget: Money,
    #[serde(default, deserialize_with = "lenient_total")]
    pub from_last_month: Money,
    #[serde(default, deserialize_with = "lenient_total")]
    pub total_income: Money,
    #[serde(default, deserialize_with = "lenient_total")]
    pub total_spent: Money,
    #[serde(default, deserialize_with = "lenient_total")]
    pub total_balance: Money,
    #[serde(default, alias = "groups", deserialize_with = "null_as_empty")]
    pub category_groups: Vec<GroupBudget>,
}

/// Accept integers and floats (rounded); anything else reads as absent.
fn lenient_money<'de, D>(deserializer: D) -> std::result::Result<Option<Money>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64))
            .map(Money::from_cents),
        _ => None,
    })
}

fn lenient_total<'de, D>(deserializer: D) -> std::result::Result<Money, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_money(deserializer)?.unwrap_or_default())
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        _ => String::new(),
    })
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
