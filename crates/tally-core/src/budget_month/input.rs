//! Tool input parsing for `get-budget-month`

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::MonthToken;

#[derive(Debug, Default, Clone, Deserialize, Serialize, schemars::JsonSchema)]
pub struct GetBudgetMonthArgs {
    /// Budget month (YYYY-MM)
    #[schemars(description = "Budget month in YYYY-MM format, e.g. 2024-01 (required)")]
    #[serde(default)]
    pub month: Option<String>,
}

/// Validate typed tool arguments
pub fn parse_args(args: &GetBudgetMonthArgs) -> Result<MonthToken> {
    match args.month.as_deref() {
        Some(month) => MonthToken::parse(month),
        None => Err(missing_month()),
    }
}

/// Validate a free-form input object
pub fn parse_value(raw: &Value) -> Result<MonthToken> {
    let Some(fields) = raw.as_object() else {
        return Err(Error::validation(
            "month",
            "input must be an object with a 'month' field",
        ));
    };

    match fields.get("month") {
        None | Some(Value::Null) => Err(missing_month()),
        Some(Value::String(month)) => MonthToken::parse(month),
        Some(other) => Err(Error::validation(
            "month",
            format!("expected a YYYY-MM string, got {}", other),
        )),
    }
}

fn missing_month() -> Error {
    Error::validation("month", "is required (YYYY-MM)")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn assert_month_error(result: Result<MonthToken>) {
        match result {
            Err(Error::Validation { field, .. }) => assert_eq!(field, "month"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_valid_months() {
        for month in ["2024-01", "2023-12", "2025-06", "2020-11"] {
            let token = parse_value(&json!({ "month": month })).unwrap();
            assert_eq!(token.as_str(), month);
        }
    }

    #[test]
    fn test_month_value_is_not_range_checked() {
        let token = parse_value(&json!({ "month": "2024-13" })).unwrap();
        assert_eq!(token.as_str(), "2024-13");
    }

    #[test]
    fn test_invalid_formats() {
        for month in ["2024-1", "24-01", "2024/01", "202401", "January 2024"] {
            assert_month_error(parse_value(&json!({ "month": month })));
        }
    }

    #[test]
    fn test_missing_month() {
        assert_month_error(parse_value(&json!({})));
        assert_month_error(parse_value(&json!({ "month": null })));
        assert_month_error(parse_args(&GetBudgetMonthArgs::default()));
    }

    #[test]
    fn test_non_string_month() {
        assert_month_error(parse_value(&json!({ "month": 202401 })));
        assert_month_error(parse_value(&json!({ "month": ["2024-01"] })));
    }

    #[test]
    fn test_non_object_input() {
        assert_month_error(parse_value(&json!("2024-01")));
        assert_month_error(parse_value(&Value::Null));
    }

    #[test]
    fn test_extra_fields_ignored() {
        let token = parse_value(&json!({ "month": "2024-02", "verbose": true })).unwrap();
        assert_eq!(token.as_str(), "2024-02");
    }

    #[test]
    fn test_parse_args() {
        let args = GetBudgetMonthArgs {
            month: Some("2024-03".into()),
        };
        assert_eq!(parse_args(&args).unwrap().as_str(), "2024-03");

        let args = GetBudgetMonthArgs {
            month: Some("March".into()),
        };
        assert_month_error(parse_args(&args));
    }
}
