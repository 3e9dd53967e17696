use crate::domain::error::DomainError;
use crate::domain::ports::market_signal::MarketSignal;

/// Constant signal used when market data is disabled.
pub struct NeutralSignal {
    name: String,
    value: f64,
}

impl NeutralSignal {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[async_trait::async_trait]
impl MarketSignal for NeutralSignal {
    fn name(&self) -> &str {
        &self.name
    }

    async fn score(&self, _symbol: &str) -> Result<f64, DomainError> {
        Ok(self.value)
    }
}
