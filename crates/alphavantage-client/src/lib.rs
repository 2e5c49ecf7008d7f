use async_trait::async_trait;
use reqwest::Client;
use scoring_core::{AnnualRecord, ScoreError, StatementSource, StatementType};
use serde::Deserialize;
use std::time::Duration;

const BASE_URL: &str = "https://www.alphavantage.co/query";

/// Annual-statement payload. The provider wraps each statement in an
/// `annualReports` array ordered newest-to-oldest; error and throttle
/// responses omit the key entirely, which deserializes to an empty vector
/// and is surfaced upstream as missing data.
#[derive(Debug, Deserialize)]
struct StatementResponse {
    #[serde(rename = "annualReports", default)]
    annual_reports: Vec<AnnualRecord>,
}

#[derive(Clone)]
pub struct AlphaVantageClient {
    api_key: String,
    client: Client,
}

impl AlphaVantageClient {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { api_key, client }
    }

    /// Fetch one statement series for a symbol.
    pub async fn get_annual_reports(
        &self,
        symbol: &str,
        statement: StatementType,
    ) -> Result<Vec<AnnualRecord>, ScoreError> {
        let response = self
            .client
            .get(BASE_URL)
            .query(&[
                ("function", statement.function()),
                ("symbol", symbol),
                ("apikey", &self.api_key),
            ])
            .send()
            .await
            .map_err(|e| ScoreError::ApiError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ScoreError::ApiError(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let parsed: StatementResponse = response
            .json()
            .await
            .map_err(|e| ScoreError::ApiError(e.to_string()))?;

        tracing::debug!(
            symbol,
            statement = statement.function(),
            years = parsed.annual_reports.len(),
            "fetched annual reports"
        );

        Ok(parsed.annual_reports)
    }
}

#[async_trait]
impl StatementSource for AlphaVantageClient {
    async fn annual_reports(
        &self,
        symbol: &str,
        statement: StatementType,
    ) -> Result<Vec<AnnualRecord>, ScoreError> {
        self.get_annual_reports(symbol, statement).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_annual_reports_payload() {
        let raw = r#"{
            "symbol": "AAPL",
            "annualReports": [
                {
                    "fiscalDateEnding": "2023-09-30",
                    "reportedCurrency": "USD",
                    "totalRevenue": "383285000000",
                    "netIncome": "96995000000",
                    "interestExpense": "None"
                },
                {
                    "fiscalDateEnding": "2022-09-30",
                    "totalRevenue": "394328000000",
                    "netIncome": "99803000000"
                }
            ]
        }"#;

        let parsed: StatementResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.annual_reports.len(), 2);
        assert_eq!(
            parsed.annual_reports[0].field("totalRevenue"),
            Some(383285000000.0)
        );
        assert_eq!(parsed.annual_reports[0].field("interestExpense"), None);
    }

    #[test]
    fn test_throttle_response_is_empty_series() {
        // Rate-limit notes come back with 200 OK and no annualReports key.
        let raw = r#"{"Note": "Thank you for using Alpha Vantage!"}"#;
        let parsed: StatementResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.annual_reports.is_empty());
    }
}
