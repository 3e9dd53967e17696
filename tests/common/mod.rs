//! Shared test helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use trendwatch::domain::entities::mention_record::MentionRecord;
use trendwatch::domain::error::DomainError;
use trendwatch::domain::ports::blob_store::BlobStore;
use trendwatch::domain::ports::market_signal::MarketSignal;
use trendwatch::domain::ports::mention_source::{CorpusLoad, MentionSource};
use trendwatch::domain::values::detector_config::DetectorConfig;
use trendwatch::domain::values::sentiment_label::SentimentLabel;
use trendwatch::domain::values::watchlist::Watchlist;
use trendwatch::infrastructure::storage::local::LocalBlobStore;
use trendwatch::TrendWatch;

/// Fixed detection time so date grouping is stable.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap()
}

/// `per_day` mentions of `symbol` on each of the `days` dates before the
/// recent window.
pub fn history(symbol: &str, per_day: usize, days: i64) -> Vec<MentionRecord> {
    let mut out = Vec::new();
    for d in 1..=days {
        for i in 0..per_day {
            let ts = now() - Duration::days(d) - Duration::hours(2);
            out.push(MentionRecord::new(
                format!("{symbol}-h{d}-{i}"),
                ts,
                format!("Thoughts on {symbol}?"),
                "",
                None,
            ));
        }
    }
    out
}

/// `n` mentions of `symbol` inside the last 24h.
pub fn recent(symbol: &str, n: usize) -> Vec<MentionRecord> {
    (0..n)
        .map(|i| {
            MentionRecord::new(
                format!("{symbol}-r{i}"),
                now() - Duration::minutes(30 + i as i64),
                "",
                format!("${symbol} is moving"),
                None,
            )
        })
        .collect()
}

pub fn labelled(id: &str, symbol: &str, hours_ago: i64, label: SentimentLabel) -> MentionRecord {
    MentionRecord::new(id, now() - Duration::hours(hours_ago), symbol, "", Some(label))
}

pub fn config(symbols: &[&str]) -> DetectorConfig {
    DetectorConfig {
        watchlist: Watchlist::from_symbols(symbols).unwrap(),
        ..Default::default()
    }
}

/// In-memory mention source.
pub struct StaticSource(pub Vec<MentionRecord>);

#[async_trait]
impl MentionSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn load(&self, since: DateTime<Utc>) -> CorpusLoad {
        CorpusLoad {
            records: self.0.iter().filter(|r| r.timestamp >= since).cloned().collect(),
            ..Default::default()
        }
    }
}

/// Deterministic market signal: fixed per-symbol values, a default, and
/// symbols that always fail.
#[derive(Default)]
pub struct StaticSignal {
    pub scores: HashMap<String, f64>,
    pub default: f64,
    pub failing: Vec<String>,
    pub calls: AtomicUsize,
}

impl StaticSignal {
    pub fn constant(value: f64) -> Self {
        Self {
            default: value,
            ..Default::default()
        }
    }

    pub fn with(mut self, symbol: &str, value: f64) -> Self {
        self.scores.insert(symbol.to_string(), value);
        self
    }

    pub fn failing_for(mut self, symbol: &str) -> Self {
        self.failing.push(symbol.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketSignal for StaticSignal {
    fn name(&self) -> &str {
        "static"
    }

    async fn score(&self, symbol: &str) -> Result<f64, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.iter().any(|s| s == symbol) {
            return Err(DomainError::MarketData(format!("no data for {symbol}")));
        }
        Ok(self.scores.get(symbol).copied().unwrap_or(self.default))
    }
}

pub struct Harness {
    pub tw: TrendWatch,
    pub store: Arc<LocalBlobStore>,
    pub dir: TempDir,
}

pub fn harness(
    records: Vec<MentionRecord>,
    volume: Arc<dyn MarketSignal>,
    price: Arc<dyn MarketSignal>,
    detector: DetectorConfig,
) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(LocalBlobStore::new(dir.path()));
    let tw = TrendWatch::with_providers(
        Arc::new(StaticSource(records)),
        store.clone(),
        volume,
        price,
        detector,
        "processed-data/".to_string(),
    );
    Harness { tw, store, dir }
}

pub fn zero_market() -> (Arc<dyn MarketSignal>, Arc<dyn MarketSignal>) {
    (
        Arc::new(StaticSignal::constant(0.0)),
        Arc::new(StaticSignal::constant(0.0)),
    )
}

pub async fn read_blob(store: &LocalBlobStore, key: &str) -> Vec<u8> {
    store.get(key).await.unwrap()
}
