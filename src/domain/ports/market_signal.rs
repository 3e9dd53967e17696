use crate::domain::error::DomainError;
use async_trait::async_trait;

/// A market-data derived signal for one symbol.
///
/// Implementations return a score in [0,1]. Errors are absorbed by the
/// detector, which substitutes its neutral score and keeps going.
#[async_trait]
pub trait MarketSignal: Send + Sync {
    /// Signal name for logging.
    fn name(&self) -> &str;

    async fn score(&self, symbol: &str) -> Result<f64, DomainError>;
}
