use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Statement type requested from the data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementType {
    IncomeStatement,
    BalanceSheet,
    CashFlow,
}

impl StatementType {
    /// Provider-side function name for this statement type.
    pub fn function(&self) -> &'static str {
        match self {
            StatementType::IncomeStatement => "INCOME_STATEMENT",
            StatementType::BalanceSheet => "BALANCE_SHEET",
            StatementType::CashFlow => "CASH_FLOW",
        }
    }

    /// Human-readable name, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            StatementType::IncomeStatement => "income statement",
            StatementType::BalanceSheet => "balance sheet",
            StatementType::CashFlow => "cash flow",
        }
    }
}

/// One fiscal year of a single financial statement, as returned by the
/// provider. Field values arrive as JSON strings ("123456789" or "None"),
/// occasionally as raw numbers, so everything is kept loose and parsed on
/// access.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnualRecord {
    #[serde(rename = "fiscalDateEnding", default)]
    pub fiscal_date_ending: Option<String>,

    #[serde(flatten)]
    pub fields: HashMap<String, serde_json::Value>,
}

impl AnnualRecord {
    /// Parse a field as f64. Missing fields, "None" placeholders, and
    /// anything else non-numeric all come back as None.
    pub fn field(&self, name: &str) -> Option<f64> {
        match self.fields.get(name)? {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Field value for additive contexts, where an absent figure counts
    /// as zero (e.g. a depreciation add-back).
    pub fn field_or_zero(&self, name: &str) -> f64 {
        self.field(name).unwrap_or(0.0)
    }
}

/// Per-category scores plus the weighted composite for one symbol.
/// All score fields are rounded to 2 decimal places.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub symbol: String,
    pub generated_at: DateTime<Utc>,
    /// Fiscal years of data backing the score (min across the three
    /// statement series).
    pub years_used: usize,
    pub profitability: f64,
    pub efficiency_returns: f64,
    pub capital_structure: f64,
    pub shareholder_behavior: f64,
    pub growth_sustainability: f64,
    pub liquidity_quality: f64,
    pub cash_flow_quality: f64,
    /// Unweighted bonus metric, reported alongside the composite but not
    /// folded into it.
    pub consistency_bonus: f64,
    pub composite: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_parses_string_numbers() {
        let record: AnnualRecord = serde_json::from_value(json!({
            "fiscalDateEnding": "2023-12-31",
            "netIncome": "96995000000",
            "totalRevenue": 383285000000.0,
            "interestExpense": "None"
        }))
        .unwrap();

        assert_eq!(record.field("netIncome"), Some(96995000000.0));
        assert_eq!(record.field("totalRevenue"), Some(383285000000.0));
        assert_eq!(record.field("interestExpense"), None);
        assert_eq!(record.field("capitalExpenditures"), None);
        assert_eq!(record.fiscal_date_ending.as_deref(), Some("2023-12-31"));
    }

    #[test]
    fn test_field_or_zero_defaults_missing() {
        let record = AnnualRecord::default();
        assert_eq!(record.field_or_zero("depreciation"), 0.0);
    }

    #[test]
    fn test_statement_function_names() {
        assert_eq!(StatementType::IncomeStatement.function(), "INCOME_STATEMENT");
        assert_eq!(StatementType::BalanceSheet.function(), "BALANCE_SHEET");
        assert_eq!(StatementType::CashFlow.function(), "CASH_FLOW");
    }
}
