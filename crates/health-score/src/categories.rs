//! Category aggregators: each category is the unweighted mean of a fixed
//! list of sub-scores, and the composite is a fixed-weight combination of
//! the seven weighted categories. Neutral (50) members dilute a category
//! toward the midpoint; they are never excluded from the mean.

use crate::metrics::{self, FcfMetrics};
use scoring_core::{clamp_score, AnnualRecord, MetricValue, ScoreConfig, NEUTRAL_SCORE};

// Relative emphasis per category. The nominal values total 1.05, so each
// weight is normalized by that total: the composite must stay on the same
// 0-100 scale as the categories, with an all-neutral company at exactly 50.
const EMPHASIS_TOTAL: f64 = 0.30 + 0.25 + 0.15 + 0.10 + 0.15 + 0.05 + 0.05;

pub const WEIGHT_PROFITABILITY: f64 = 0.30 / EMPHASIS_TOTAL;
pub const WEIGHT_EFFICIENCY_RETURNS: f64 = 0.25 / EMPHASIS_TOTAL;
pub const WEIGHT_CAPITAL_STRUCTURE: f64 = 0.15 / EMPHASIS_TOTAL;
pub const WEIGHT_SHAREHOLDER_BEHAVIOR: f64 = 0.10 / EMPHASIS_TOTAL;
pub const WEIGHT_GROWTH_SUSTAINABILITY: f64 = 0.15 / EMPHASIS_TOTAL;
pub const WEIGHT_LIQUIDITY_QUALITY: f64 = 0.05 / EMPHASIS_TOTAL;
pub const WEIGHT_CASH_FLOW_QUALITY: f64 = 0.05 / EMPHASIS_TOTAL;

/// Category weights in report order. Sum to 1.0; the consistency bonus
/// is reported alongside and carries no weight.
pub const CATEGORY_WEIGHTS: [f64; 7] = [
    WEIGHT_PROFITABILITY,
    WEIGHT_EFFICIENCY_RETURNS,
    WEIGHT_CAPITAL_STRUCTURE,
    WEIGHT_SHAREHOLDER_BEHAVIOR,
    WEIGHT_GROWTH_SUSTAINABILITY,
    WEIGHT_LIQUIDITY_QUALITY,
    WEIGHT_CASH_FLOW_QUALITY,
];

/// Unweighted arithmetic mean of a category's member sub-scores.
pub fn category_mean(scores: &[f64]) -> f64 {
    match metrics::mean(scores) {
        Some(avg) => avg,
        None => NEUTRAL_SCORE,
    }
}

/// Weighted composite over the seven category scores, in report order.
pub fn composite(category_scores: &[f64; 7]) -> f64 {
    category_scores
        .iter()
        .zip(CATEGORY_WEIGHTS.iter())
        .map(|(score, weight)| score * weight)
        .sum()
}

pub fn profitability(
    income: &[AnnualRecord],
    fcf: &FcfMetrics,
    fcf_slope_score: f64,
    config: &ScoreConfig,
) -> f64 {
    let cfg = &config.profitability;
    category_mean(&[
        fcf.level_score,
        fcf_slope_score,
        metrics::growth(income, "netIncome")
            .map(|g| g * 100.0)
            .stretch(&cfg.net_income_growth),
        metrics::ratio(income, "grossProfit", "totalRevenue").stretch(&cfg.gross_margin),
        metrics::ratio(income, "operatingIncome", "totalRevenue").stretch(&cfg.operating_margin),
    ])
}

pub fn efficiency_returns(
    income: &[AnnualRecord],
    balance: &[AnnualRecord],
    fcf_margin_score: f64,
    config: &ScoreConfig,
) -> f64 {
    let cfg = &config.efficiency_returns;
    category_mean(&[
        metrics::paired_ratio(income, "netIncome", balance, "totalShareholderEquity")
            .stretch(&cfg.return_on_equity),
        metrics::paired_ratio(income, "netIncome", balance, "totalAssets")
            .stretch(&cfg.return_on_assets),
        fcf_margin_score,
    ])
}

pub fn capital_structure(
    income: &[AnnualRecord],
    balance: &[AnnualRecord],
    config: &ScoreConfig,
) -> f64 {
    let cfg = &config.capital_structure;
    category_mean(&[
        metrics::ratio(balance, "totalLiabilities", "totalShareholderEquity")
            .stretch(&cfg.debt_to_equity),
        metrics::ratio(income, "operatingIncome", "interestExpense")
            .stretch(&cfg.interest_coverage),
        metrics::net_debt_to_ebitda(balance, income).stretch(&cfg.net_debt_to_ebitda),
    ])
}

pub fn shareholder_behavior(
    balance: &[AnnualRecord],
    cashflow: &[AnnualRecord],
    config: &ScoreConfig,
) -> f64 {
    let cfg = &config.shareholder_behavior;
    category_mean(&[
        metrics::trend(&metrics::field_series(balance, "commonStockSharesOutstanding"))
            .stretch(&cfg.shares_outstanding_slope),
        metrics::trend(&metrics::field_series(cashflow, "repurchaseOfStock"))
            .stretch(&cfg.share_buybacks),
    ])
}

pub fn growth_sustainability(
    income: &[AnnualRecord],
    cashflow: &[AnnualRecord],
    config: &ScoreConfig,
) -> f64 {
    let cfg = &config.growth_sustainability;
    // Capex is reported as an outflow; negate so shrinking spend trends up.
    let negated_capex: Vec<f64> = metrics::field_series(cashflow, "capitalExpenditures")
        .iter()
        .map(|v| -v)
        .collect();
    category_mean(&[
        metrics::growth(income, "totalRevenue")
            .map(|g| g * 100.0)
            .stretch(&cfg.revenue_growth),
        metrics::growth(income, "eps")
            .map(|g| g * 100.0)
            .stretch(&cfg.eps_growth),
        metrics::trend(&negated_capex).stretch(&cfg.capex_trend),
        metrics::ratio(income, "researchAndDevelopment", "totalRevenue").stretch(&cfg.rnd_ratio),
    ])
}

pub fn liquidity_quality(
    balance: &[AnnualRecord],
    cashflow: &[AnnualRecord],
    config: &ScoreConfig,
) -> f64 {
    let cfg = &config.liquidity_quality;
    category_mean(&[
        metrics::ratio(balance, "totalCurrentAssets", "totalCurrentLiabilities")
            .stretch(&cfg.current_ratio),
        metrics::ratio_of(
            balance,
            |r| {
                r.field_or_zero("cashAndCashEquivalentsAtCarryingValue")
                    + r.field_or_zero("shortTermInvestments")
            },
            "totalCurrentLiabilities",
        )
        .stretch(&cfg.quick_ratio),
        metrics::paired_ratio(cashflow, "operatingCashflow", balance, "totalCurrentLiabilities")
            .stretch(&cfg.ocf_to_liabilities),
    ])
}

pub fn cash_flow_quality(
    income: &[AnnualRecord],
    balance: &[AnnualRecord],
    cashflow: &[AnnualRecord],
    config: &ScoreConfig,
) -> f64 {
    let cfg = &config.cash_flow_quality;
    category_mean(&[
        metrics::paired_ratio(cashflow, "operatingCashflow", income, "netIncome")
            .stretch(&cfg.ni_vs_ocf),
        metrics::accrual_ratio(income, cashflow, balance).stretch(&cfg.accrual_ratio),
    ])
}

/// Consistency bonus: stability of returns and earnings, scored with the
/// fixed-clamp policy rather than configured thresholds. Reported alongside
/// the composite, never folded into it.
pub fn consistency_bonus(
    income: &[AnnualRecord],
    balance: &[AnnualRecord],
    fcf_slope_score: f64,
) -> f64 {
    let roe_series =
        metrics::paired_ratio_series(income, "netIncome", balance, "totalShareholderEquity");
    let roe_stability: MetricValue = metrics::sample_std_dev(&roe_series).into();

    let eps_series = metrics::field_series(income, "eps");
    let eps_z_score = match (
        metrics::mean(&eps_series),
        metrics::sample_std_dev(&eps_series),
    ) {
        (Some(avg), Some(sd)) if sd != 0.0 => MetricValue::Defined(avg / sd),
        _ => MetricValue::Undefined,
    };

    let roic_score = match metrics::roic_mean(income, balance) {
        MetricValue::Defined(avg) => clamp_score((avg - 0.08) * 100.0 + 50.0),
        MetricValue::Undefined => NEUTRAL_SCORE,
    };

    category_mean(&[
        fcf_slope_score,
        roe_stability.clamp_linear(100.0, -100.0),
        roic_score,
        eps_z_score.clamp_linear(0.0, 10.0),
    ])
}
