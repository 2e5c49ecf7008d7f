//! finhealth: composite financial health score for a ticker symbol.
//!
//! Usage:
//!   finhealth AAPL
//!   finhealth AAPL --settings my_settings.json
//!
//! The Alpha Vantage credential comes from ALPHAVANTAGE_API_KEY (a .env
//! file is honored).

use alphavantage_client::AlphaVantageClient;
use anyhow::{bail, Context};
use health_score::HealthScoreEngine;
use scoring_core::ScoreConfig;

const DEFAULT_SETTINGS_PATH: &str = "score_settings.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finhealth_cli=info,health_score=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let symbol = match args.get(1) {
        Some(s) if !s.starts_with("--") => s.to_uppercase(),
        _ => bail!("usage: finhealth <SYMBOL> [--settings <path>]"),
    };
    let settings_path = match settings_path(&args) {
        Some(path) => path,
        None => bail!("usage: finhealth <SYMBOL> [--settings <path>]"),
    };

    let api_key = std::env::var("ALPHAVANTAGE_API_KEY")
        .context("ALPHAVANTAGE_API_KEY is not set")?;

    let config = ScoreConfig::from_path(settings_path)
        .with_context(|| format!("failed to load settings from {}", settings_path))?;

    let client = AlphaVantageClient::new(api_key);
    let engine = HealthScoreEngine::new(config);

    tracing::info!(%symbol, "fetching annual statements");
    let report = engine.evaluate_symbol(&client, &symbol).await?;

    println!("Financial Health Breakdown for {}:", report.symbol);
    println!("Years of Historic Financial Data Used: {}", report.years_used);
    println!("Composite Score: {}", report.composite);
    println!("Profitability: {}", report.profitability);
    println!("Efficiency & Returns: {}", report.efficiency_returns);
    println!("Capital Structure: {}", report.capital_structure);
    println!("Shareholder Behavior: {}", report.shareholder_behavior);
    println!("Growth & Sustainability: {}", report.growth_sustainability);
    println!("Liquidity & Quality: {}", report.liquidity_quality);
    println!("Cash Flow Quality: {}", report.cash_flow_quality);
    println!("Consistency (Bonus): {}", report.consistency_bonus);

    Ok(())
}

/// Resolve the settings path from the argument list. `None` means a
/// `--settings` flag with no value, which is a usage error.
fn settings_path(args: &[String]) -> Option<&str> {
    match args.iter().position(|a| a == "--settings") {
        Some(i) => args.get(i + 1).map(String::as_str),
        None => Some(DEFAULT_SETTINGS_PATH),
    }
}
