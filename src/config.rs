//! Runtime configuration read from the environment (and an optional `.env`).

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::error::DomainError;
use crate::domain::values::detector_config::{DetectorConfig, MAX_BASELINE_DAYS};
use crate::domain::values::signal_weights::SignalWeights;
use crate::domain::values::watchlist::Watchlist;
use crate::infrastructure::corpus::csv_source::DEFAULT_CORPUS_PREFIX;

pub const DEFAULT_OUTPUT_PREFIX: &str = "processed-data/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketDataMode {
    Yahoo,
    Disabled,
}

impl fmt::Display for MarketDataMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yahoo => write!(f, "yahoo"),
            Self::Disabled => write!(f, "none"),
        }
    }
}

impl FromStr for MarketDataMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yahoo" => Ok(Self::Yahoo),
            "none" | "off" | "disabled" => Ok(Self::Disabled),
            _ => Err(format!("Unknown market data provider: {s}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Root directory of the local blob store (TRENDWATCH_DATA_DIR)
    pub data_dir: PathBuf,
    /// Key prefix of collector mention files (TRENDWATCH_CORPUS_PREFIX)
    pub corpus_prefix: String,
    /// Key prefix for saved results (TRENDWATCH_OUTPUT_PREFIX)
    pub output_prefix: String,
    /// RUST_LOG, falling back to LOG_LEVEL
    pub log_level: String,
    /// TRENDWATCH_MARKET_DATA: yahoo | none
    pub market_data: MarketDataMode,
    /// Opportunities shown in the summary (TRENDWATCH_TOP_N)
    pub top_n: usize,
    pub detector: DetectorConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, DomainError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut detector = DetectorConfig::default();
        if let Some(list) = get("TRENDWATCH_WATCHLIST") {
            detector.watchlist = Watchlist::from_symbols(
                list.split(',')
                    .map(|s| s.trim().to_uppercase())
                    .filter(|s| !s.is_empty()),
            )?;
        }
        if let Some(weights) = get("TRENDWATCH_WEIGHTS") {
            detector.weights = weights.parse::<SignalWeights>()?;
        }
        if let Some(raw) = get("TRENDWATCH_BASELINE_DAYS") {
            let days: i64 = parse_num("TRENDWATCH_BASELINE_DAYS", &raw)?;
            let covers_recent = days
                .checked_mul(24)
                .is_some_and(|hours| hours > detector.recent_window_hours);
            if !covers_recent || days > MAX_BASELINE_DAYS {
                return Err(DomainError::Config(format!(
                    "TRENDWATCH_BASELINE_DAYS must cover more than the 24h recent window \
                     and at most {MAX_BASELINE_DAYS} days, got {days}"
                )));
            }
            detector.baseline_days = days;
        }

        let market_data = match get("TRENDWATCH_MARKET_DATA") {
            Some(v) => v.parse::<MarketDataMode>().map_err(DomainError::Config)?,
            None => MarketDataMode::Yahoo,
        };

        Ok(Self {
            data_dir: PathBuf::from(get("TRENDWATCH_DATA_DIR").unwrap_or_else(|| "./data".into())),
            corpus_prefix: get("TRENDWATCH_CORPUS_PREFIX")
                .unwrap_or_else(|| DEFAULT_CORPUS_PREFIX.to_string()),
            output_prefix: get("TRENDWATCH_OUTPUT_PREFIX")
                .unwrap_or_else(|| DEFAULT_OUTPUT_PREFIX.to_string()),
            log_level: get("RUST_LOG")
                .or_else(|| get("LOG_LEVEL"))
                .unwrap_or_else(|| "info".to_string()),
            market_data,
            top_n: match get("TRENDWATCH_TOP_N") {
                Some(v) => parse_num("TRENDWATCH_TOP_N", &v)?,
                None => 5,
            },
            detector,
        })
    }
}

fn parse_num<T: FromStr>(key: &str, value: &str) -> Result<T, DomainError> {
    value
        .trim()
        .parse()
        .map_err(|_| DomainError::Config(format!("{key} must be a number, got '{value}'")))
}
