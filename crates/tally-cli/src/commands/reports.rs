//! Report command implementations

use std::path::Path;

use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};
use serde_json::json;
use tally_core::{build_budget_month_report, ErrorKind, LedgerApi};

use super::open_ledger;

/// Month used when none is given on the command line
pub fn default_month(today: NaiveDate) -> String {
    today.format("%Y-%m").to_string()
}

/// Build the markdown report for `month`, or for the month containing `today`
pub async fn budget_month_report<L>(
    ledger: &L,
    month: Option<&str>,
    today: NaiveDate,
) -> Result<String>
where
    L: LedgerApi + ?Sized,
{
    let month = month.map(str::to_string).unwrap_or_else(|| default_month(today));

    match build_budget_month_report(ledger, &json!({ "month": month })).await {
        Ok(report) => Ok(report),
        Err(e) => match e.kind() {
            ErrorKind::Validation => bail!("{} (expected YYYY-MM, e.g. 2024-01)", e),
            ErrorKind::Upstream => bail!("Ledger request failed: {}", e),
            ErrorKind::Unexpected => Err(e.into()),
        },
    }
}

pub async fn cmd_budget_month(config_path: Option<&Path>, month: Option<&str>) -> Result<()> {
    let ledger = open_ledger(config_path)?;
    let report = budget_month_report(&ledger, month, Local::now().date_naive()).await?;
    print!("{}", report);
    Ok(())
}
