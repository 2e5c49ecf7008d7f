use crate::error::ScoreError;
use serde::Deserialize;
use std::path::Path;

/// Threshold parameters for one stretch-normalized metric.
#[derive(Debug, Clone, Deserialize)]
pub struct Thresholds {
    pub low: f64,
    #[serde(default)]
    pub mid: Option<f64>,
    pub high: f64,
    #[serde(default)]
    pub reverse: bool,
}

/// Per-metric threshold settings, loaded once at startup from a JSON file
/// keyed by category name then metric name. Passed by reference into every
/// evaluation; never mutated afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreConfig {
    #[serde(rename = "Profitability")]
    pub profitability: ProfitabilityConfig,
    #[serde(rename = "Efficiency & Returns")]
    pub efficiency_returns: EfficiencyReturnsConfig,
    #[serde(rename = "Capital Structure")]
    pub capital_structure: CapitalStructureConfig,
    #[serde(rename = "Shareholder Behavior")]
    pub shareholder_behavior: ShareholderBehaviorConfig,
    #[serde(rename = "Growth & Sustainability")]
    pub growth_sustainability: GrowthSustainabilityConfig,
    #[serde(rename = "Liquidity & Quality")]
    pub liquidity_quality: LiquidityQualityConfig,
    #[serde(rename = "Cash Flow Quality")]
    pub cash_flow_quality: CashFlowQualityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfitabilityConfig {
    #[serde(rename = "Free Cash Flow Slope")]
    pub fcf_slope: Thresholds,
    #[serde(rename = "Net Income Growth")]
    pub net_income_growth: Thresholds,
    #[serde(rename = "Gross Margin")]
    pub gross_margin: Thresholds,
    #[serde(rename = "Operating Margin")]
    pub operating_margin: Thresholds,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EfficiencyReturnsConfig {
    #[serde(rename = "Return on Equity")]
    pub return_on_equity: Thresholds,
    #[serde(rename = "Return on Assets")]
    pub return_on_assets: Thresholds,
    #[serde(rename = "FCF Margin")]
    pub fcf_margin: Thresholds,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CapitalStructureConfig {
    #[serde(rename = "Debt-to-Equity Ratio")]
    pub debt_to_equity: Thresholds,
    #[serde(rename = "Interest Coverage Ratio")]
    pub interest_coverage: Thresholds,
    #[serde(rename = "Net Debt to EBITDA")]
    pub net_debt_to_ebitda: Thresholds,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShareholderBehaviorConfig {
    #[serde(rename = "Shares Outstanding Slope")]
    pub shares_outstanding_slope: Thresholds,
    #[serde(rename = "Share Buybacks (Average $)")]
    pub share_buybacks: Thresholds,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GrowthSustainabilityConfig {
    #[serde(rename = "Revenue Growth Rate")]
    pub revenue_growth: Thresholds,
    #[serde(rename = "EPS Growth Rate")]
    pub eps_growth: Thresholds,
    #[serde(rename = "CapEx Trend (Positive Slope)")]
    pub capex_trend: Thresholds,
    #[serde(rename = "R&D as % of Revenue")]
    pub rnd_ratio: Thresholds,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LiquidityQualityConfig {
    #[serde(rename = "Current Ratio")]
    pub current_ratio: Thresholds,
    #[serde(rename = "Quick Ratio")]
    pub quick_ratio: Thresholds,
    #[serde(rename = "OCF to Liabilities")]
    pub ocf_to_liabilities: Thresholds,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CashFlowQualityConfig {
    #[serde(rename = "Net Income vs OCF Ratio")]
    pub ni_vs_ocf: Thresholds,
    #[serde(rename = "Accrual Ratio")]
    pub accrual_ratio: Thresholds,
}

impl ScoreConfig {
    /// Load and validate the settings file. Unknown metrics are tolerated,
    /// missing ones are a hard error before any evaluation runs.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScoreError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ScoreError> {
        serde_json::from_str(raw).map_err(|e| ScoreError::InvalidConfig(e.to_string()))
    }
}
