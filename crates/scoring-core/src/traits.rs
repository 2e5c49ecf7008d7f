use crate::{AnnualRecord, ScoreError, StatementType};
use async_trait::async_trait;

/// Trait for annual statement providers. An empty vector means the provider
/// has no data for that statement type.
#[async_trait]
pub trait StatementSource: Send + Sync {
    async fn annual_reports(
        &self,
        symbol: &str,
        statement: StatementType,
    ) -> Result<Vec<AnnualRecord>, ScoreError>;
}
