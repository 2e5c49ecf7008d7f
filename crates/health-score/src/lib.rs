//! Composite financial health scoring over multi-year annual statements.
//!
//! One evaluation takes three statement series (income, balance, cash flow),
//! derives ~25 normalized sub-scores, averages them into eight categories and
//! combines seven of those with fixed weights into a single 0-100 composite.
//! Individual metrics that cannot be computed degrade to a neutral 50; only
//! an entirely missing statement series fails the evaluation.

pub mod categories;
pub mod metrics;

use chrono::Utc;
use scoring_core::{
    round2, AnnualRecord, HealthReport, ScoreConfig, ScoreError, StatementSource, StatementType,
};

pub struct HealthScoreEngine {
    config: ScoreConfig,
}

impl HealthScoreEngine {
    pub fn new(config: ScoreConfig) -> Self {
        Self { config }
    }

    /// Fetch the three statement series for a symbol and score them.
    pub async fn evaluate_symbol(
        &self,
        source: &impl StatementSource,
        symbol: &str,
    ) -> Result<HealthReport, ScoreError> {
        let income = source
            .annual_reports(symbol, StatementType::IncomeStatement)
            .await?;
        let balance = source
            .annual_reports(symbol, StatementType::BalanceSheet)
            .await?;
        let cashflow = source
            .annual_reports(symbol, StatementType::CashFlow)
            .await?;
        self.evaluate(symbol, &income, &balance, &cashflow)
    }

    /// Score already-fetched statement series. Fails only when a whole
    /// series is empty; every per-metric anomaly degrades to neutral.
    pub fn evaluate(
        &self,
        symbol: &str,
        income: &[AnnualRecord],
        balance: &[AnnualRecord],
        cashflow: &[AnnualRecord],
    ) -> Result<HealthReport, ScoreError> {
        for (statement, series) in [
            (StatementType::IncomeStatement, income),
            (StatementType::BalanceSheet, balance),
            (StatementType::CashFlow, cashflow),
        ] {
            if series.is_empty() {
                return Err(ScoreError::MissingData(format!(
                    "no {} data for {}",
                    statement.name(),
                    symbol
                )));
            }
        }

        let years_used = income.len().min(balance.len()).min(cashflow.len());

        // Trend and growth metrics need chronological order; the provider
        // may deliver either direction, so orient each series oldest-first
        // by its fiscal dates before anything positional happens.
        let income = oriented(income);
        let balance = oriented(balance);
        let cashflow = oriented(cashflow);

        let config = &self.config;
        let fcf = metrics::fcf_metrics(&cashflow, &income);
        let fcf_slope_score = fcf
            .slope
            .map(|s| s / 1e6)
            .stretch(&config.profitability.fcf_slope);
        let fcf_margin_score = fcf
            .margin
            .map(|m| m * 100.0)
            .stretch(&config.efficiency_returns.fcf_margin);

        let category_scores = [
            categories::profitability(&income, &fcf, fcf_slope_score, config),
            categories::efficiency_returns(&income, &balance, fcf_margin_score, config),
            categories::capital_structure(&income, &balance, config),
            categories::shareholder_behavior(&balance, &cashflow, config),
            categories::growth_sustainability(&income, &cashflow, config),
            categories::liquidity_quality(&balance, &cashflow, config),
            categories::cash_flow_quality(&income, &balance, &cashflow, config),
        ];
        let consistency = categories::consistency_bonus(&income, &balance, fcf_slope_score);
        let composite = categories::composite(&category_scores);

        tracing::debug!(symbol, years_used, composite, "evaluated health score");

        Ok(HealthReport {
            symbol: symbol.to_string(),
            generated_at: Utc::now(),
            years_used,
            profitability: round2(category_scores[0]),
            efficiency_returns: round2(category_scores[1]),
            capital_structure: round2(category_scores[2]),
            shareholder_behavior: round2(category_scores[3]),
            growth_sustainability: round2(category_scores[4]),
            liquidity_quality: round2(category_scores[5]),
            cash_flow_quality: round2(category_scores[6]),
            consistency_bonus: round2(consistency),
            composite: round2(composite),
        })
    }
}

/// Copy of a series in oldest-first order. Fiscal dates are ISO strings, so
/// a lexicographic compare of the endpoints decides direction; series
/// without dates are taken as-is.
fn oriented(records: &[AnnualRecord]) -> Vec<AnnualRecord> {
    let needs_reverse = match (
        records.first().and_then(|r| r.fiscal_date_ending.as_ref()),
        records.last().and_then(|r| r.fiscal_date_ending.as_ref()),
    ) {
        (Some(first), Some(last)) => first > last,
        _ => false,
    };

    if needs_reverse {
        records.iter().rev().cloned().collect()
    } else {
        records.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use scoring_core::NEUTRAL_SCORE;
    use serde_json::json;
    use std::collections::HashMap;

    fn test_config() -> ScoreConfig {
        ScoreConfig::from_json(include_str!("../../../score_settings.json")).unwrap()
    }

    fn year(date: &str, fields: &[(&str, f64)]) -> AnnualRecord {
        let mut value = serde_json::Map::new();
        value.insert("fiscalDateEnding".into(), json!(date));
        for (name, v) in fields {
            value.insert((*name).into(), json!(v.to_string()));
        }
        serde_json::from_value(serde_json::Value::Object(value)).unwrap()
    }

    /// Four years of a steadily improving business, oldest first.
    fn strong_statements() -> (Vec<AnnualRecord>, Vec<AnnualRecord>, Vec<AnnualRecord>) {
        let dates = ["2020-12-31", "2021-12-31", "2022-12-31", "2023-12-31"];
        let mut income = Vec::new();
        let mut balance = Vec::new();
        let mut cashflow = Vec::new();
        for (i, date) in dates.iter().enumerate() {
            let growth = 1.0 + 0.15 * i as f64;
            income.push(year(
                date,
                &[
                    ("totalRevenue", 1_000_000_000.0 * growth),
                    ("grossProfit", 500_000_000.0 * growth),
                    ("operatingIncome", 250_000_000.0 * growth),
                    ("netIncome", 200_000_000.0 * growth),
                    ("eps", 2.0 * growth),
                    ("interestExpense", 10_000_000.0),
                    ("ebit", 250_000_000.0 * growth),
                    ("depreciation", 50_000_000.0 * growth),
                    ("researchAndDevelopment", 80_000_000.0 * growth),
                ],
            ));
            balance.push(year(
                date,
                &[
                    ("totalAssets", 2_000_000_000.0 * growth),
                    ("totalLiabilities", 800_000_000.0 * growth),
                    ("totalShareholderEquity", 1_200_000_000.0 * growth),
                    ("totalCurrentAssets", 900_000_000.0 * growth),
                    ("totalCurrentLiabilities", 400_000_000.0 * growth),
                    ("cashAndCashEquivalentsAtCarryingValue", 300_000_000.0 * growth),
                    ("shortTermInvestments", 100_000_000.0 * growth),
                    ("commonStockSharesOutstanding", 100_000_000.0 - 1_000_000.0 * i as f64),
                ],
            ));
            cashflow.push(year(
                date,
                &[
                    ("operatingCashflow", 300_000_000.0 * growth),
                    ("capitalExpenditures", 60_000_000.0 * growth),
                    ("repurchaseOfStock", 50_000_000.0 * growth),
                ],
            ));
        }
        (income, balance, cashflow)
    }

    #[test]
    fn test_missing_balance_fails_outright() {
        let (income, _, cashflow) = strong_statements();
        let engine = HealthScoreEngine::new(test_config());
        let err = engine
            .evaluate("TEST", &income, &[], &cashflow)
            .unwrap_err();
        assert!(matches!(err, ScoreError::MissingData(_)));
        assert!(err.to_string().contains("balance sheet"));
    }

    #[test]
    fn test_strong_company_scores_well() {
        let (income, balance, cashflow) = strong_statements();
        let engine = HealthScoreEngine::new(test_config());
        let report = engine
            .evaluate("TEST", &income, &balance, &cashflow)
            .unwrap();

        assert_eq!(report.years_used, 4);
        assert_eq!(report.symbol, "TEST");
        assert!(report.composite > 50.0, "composite {}", report.composite);
        assert!(report.composite <= 100.0);
        // Positive, strictly increasing FCF pushes profitability up.
        assert!(report.profitability > 60.0);
    }

    #[test]
    fn test_composite_matches_weighted_categories() {
        let (income, balance, cashflow) = strong_statements();
        let engine = HealthScoreEngine::new(test_config());
        let report = engine
            .evaluate("TEST", &income, &balance, &cashflow)
            .unwrap();

        let dot = categories::composite(&[
            report.profitability,
            report.efficiency_returns,
            report.capital_structure,
            report.shareholder_behavior,
            report.growth_sustainability,
            report.liquidity_quality,
            report.cash_flow_quality,
        ]);
        // Categories are rounded independently of the composite, so allow
        // the rounding slack, not more.
        assert!((report.composite - dot).abs() < 0.05);
    }

    #[test]
    fn test_newest_first_input_matches_oldest_first() {
        let (income, balance, cashflow) = strong_statements();
        let rev = |v: &[AnnualRecord]| v.iter().rev().cloned().collect::<Vec<_>>();
        let engine = HealthScoreEngine::new(test_config());

        let forward = engine
            .evaluate("TEST", &income, &balance, &cashflow)
            .unwrap();
        let backward = engine
            .evaluate("TEST", &rev(&income), &rev(&balance), &rev(&cashflow))
            .unwrap();

        assert_eq!(forward.composite, backward.composite);
        assert_eq!(forward.profitability, backward.profitability);
        assert_eq!(forward.consistency_bonus, backward.consistency_bonus);
    }

    #[test]
    fn test_sparse_records_degrade_to_neutral() {
        // Records exist but carry no usable fields: every metric is
        // undefined, every category sits at the midpoint.
        let empty: Vec<AnnualRecord> = (0..3)
            .map(|i| year(&format!("202{}-12-31", i), &[]))
            .collect();
        let engine = HealthScoreEngine::new(test_config());
        let report = engine.evaluate("TEST", &empty, &empty, &empty).unwrap();

        assert_eq!(report.profitability, NEUTRAL_SCORE);
        assert_eq!(report.capital_structure, NEUTRAL_SCORE);
        assert_eq!(report.composite, NEUTRAL_SCORE);
        assert_eq!(report.consistency_bonus, NEUTRAL_SCORE);
    }

    #[tokio::test]
    async fn test_evaluate_symbol_fetches_all_three() {
        struct FakeSource {
            data: HashMap<&'static str, Vec<AnnualRecord>>,
        }

        #[async_trait]
        impl StatementSource for FakeSource {
            async fn annual_reports(
                &self,
                _symbol: &str,
                statement: StatementType,
            ) -> Result<Vec<AnnualRecord>, ScoreError> {
                Ok(self.data[statement.function()].clone())
            }
        }

        let (income, balance, cashflow) = strong_statements();
        let source = FakeSource {
            data: HashMap::from([
                ("INCOME_STATEMENT", income),
                ("BALANCE_SHEET", balance),
                ("CASH_FLOW", cashflow),
            ]),
        };

        let engine = HealthScoreEngine::new(test_config());
        let report = engine.evaluate_symbol(&source, "TEST").await.unwrap();
        assert_eq!(report.years_used, 4);
    }
}
