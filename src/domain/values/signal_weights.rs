use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const SUM_TOLERANCE: f64 = 1e-6;

/// Blend weights for the four signals. Non-negative and summing to 1.0, so a
/// composite of [0,1] inputs stays in [0,1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalWeights {
    mention: f64,
    volume: f64,
    price: f64,
    sentiment: f64,
}

impl SignalWeights {
    pub fn new(mention: f64, volume: f64, price: f64, sentiment: f64) -> Result<Self, DomainError> {
        let all = [mention, volume, price, sentiment];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(DomainError::InvalidInput(format!(
                "Signal weights must be finite and non-negative, got {all:?}"
            )));
        }
        let sum: f64 = all.iter().sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(DomainError::InvalidInput(format!(
                "Signal weights must sum to 1.0, got {sum}"
            )));
        }
        Ok(Self {
            mention,
            volume,
            price,
            sentiment,
        })
    }

    pub fn mention(&self) -> f64 {
        self.mention
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn sentiment(&self) -> f64 {
        self.sentiment
    }
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            mention: 0.4,
            volume: 0.3,
            price: 0.2,
            sentiment: 0.1,
        }
    }
}

/// Parses `mention,volume,price,sentiment`.
impl FromStr for SignalWeights {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<f64> = s
            .split(',')
            .map(|p| {
                p.trim()
                    .parse::<f64>()
                    .map_err(|e| DomainError::Parse(format!("Invalid weight '{p}': {e}")))
            })
            .collect::<Result<_, _>>()?;
        match parts.as_slice() {
            [m, v, p, st] => Self::new(*m, *v, *p, *st),
            _ => Err(DomainError::InvalidInput(format!(
                "Expected 4 comma-separated weights, got {}",
                parts.len()
            ))),
        }
    }
}
