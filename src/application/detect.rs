//! Trending detection use case: load the corpus, find mention spikes, score
//! each spike on every signal, classify, and rank.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::application::baseline::{MentionIndex, MentionWindows};
use crate::application::extractor::SymbolExtractor;
use crate::application::ranking::rank;
use crate::application::signals::{market_score_or_neutral, mention_score, sentiment_shift_score};
use crate::application::spikes::SpikeDetector;
use crate::domain::entities::mention_record::MentionRecord;
use crate::domain::entities::opportunity::{Opportunity, SignalScoreSet};
use crate::domain::ports::market_signal::MarketSignal;
use crate::domain::ports::mention_source::{CorpusLoad, MentionSource};
use crate::domain::values::detector_config::DetectorConfig;

/// Result of one detection run.
#[derive(Debug, Clone, Serialize)]
pub struct TrendScan {
    pub scanned_at: DateTime<Utc>,
    pub records_scanned: usize,
    pub rows_skipped: usize,
    pub blobs_failed: usize,
    pub symbols_tracked: usize,
    pub spikes_detected: usize,
    /// Market-data lookups that fell back to the neutral score.
    pub signal_failures: usize,
    pub total_opportunities: usize,
    pub opportunities: Vec<Opportunity>,
}

/// Mention history for one symbol, as seen by the detector.
#[derive(Debug, Clone, Serialize)]
pub struct BaselineReport {
    pub symbol: String,
    pub baseline_mentions: f64,
    pub recent_mentions: usize,
    pub daily_counts: Vec<(NaiveDate, usize)>,
}

#[derive(Debug, Clone, Copy)]
struct MarketScores {
    volume: f64,
    price: f64,
    failures: usize,
}

pub struct DetectTrendingUseCase {
    source: Arc<dyn MentionSource>,
    volume: Arc<dyn MarketSignal>,
    price: Arc<dyn MarketSignal>,
    config: DetectorConfig,
    extractor: SymbolExtractor,
    spikes: SpikeDetector,
}

impl DetectTrendingUseCase {
    pub fn new(
        source: Arc<dyn MentionSource>,
        volume: Arc<dyn MarketSignal>,
        price: Arc<dyn MarketSignal>,
        config: DetectorConfig,
    ) -> Self {
        Self {
            source,
            volume,
            price,
            extractor: SymbolExtractor::new(&config.watchlist),
            spikes: SpikeDetector::new(&config),
            config,
        }
    }

    pub fn extractor(&self) -> &SymbolExtractor {
        &self.extractor
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    fn windows(&self, now: DateTime<Utc>) -> MentionWindows {
        MentionWindows::new(now, self.config.recent_window(), self.config.baseline_window())
    }

    async fn load(&self, now: DateTime<Utc>) -> CorpusLoad {
        let since = now - self.config.baseline_window();
        let load = self.source.load(since).await;
        info!(
            source = self.source.name(),
            records = load.records.len(),
            rows_skipped = load.rows_skipped,
            blobs_read = load.blobs_read,
            blobs_failed = load.blobs_failed,
            "loaded mention corpus"
        );
        load
    }

    /// Full run against the configured mention source.
    pub async fn execute(&self, now: DateTime<Utc>) -> TrendScan {
        let load = self.load(now).await;
        let mut scan = self.analyze(&load.records, now).await;
        scan.rows_skipped = load.rows_skipped;
        scan.blobs_failed = load.blobs_failed;
        scan
    }

    /// Detection over an in-memory corpus. Never fails: missing data yields
    /// an empty scan, failing market signals yield neutral scores.
    pub async fn analyze(&self, records: &[MentionRecord], now: DateTime<Utc>) -> TrendScan {
        let windows = self.windows(now);
        let tagged = self.extractor.tag(records);
        let spikes = self.spikes.detect(&tagged, &windows);
        info!(records = records.len(), spikes = spikes.len(), "mention spikes detected");

        let market = self.score_market(spikes.iter().map(|s| s.symbol.clone()).collect()).await;

        let mut signal_failures = 0usize;
        let mut opportunities = Vec::with_capacity(spikes.len());
        for spike in &spikes {
            let m = market.get(&spike.symbol).copied().unwrap_or(MarketScores {
                volume: self.config.neutral_score,
                price: self.config.neutral_score,
                failures: 2,
            });
            signal_failures += m.failures;

            let sentiment = sentiment_shift_score(
                &tagged,
                &spike.symbol,
                &windows,
                self.config.min_sentiment_samples,
            );
            let scores = SignalScoreSet::new(mention_score(spike), m.volume, m.price, sentiment);
            opportunities.push(Opportunity::from_spike(spike, scores, &self.config.weights));
        }

        let ranked = rank(&opportunities);
        TrendScan {
            scanned_at: now,
            records_scanned: records.len(),
            rows_skipped: 0,
            blobs_failed: 0,
            symbols_tracked: self.config.watchlist.len(),
            spikes_detected: spikes.len(),
            signal_failures,
            total_opportunities: ranked.len(),
            opportunities: ranked,
        }
    }

    /// Volume and price lookups for every symbol, run concurrently. Returns
    /// only once all of them have finished.
    async fn score_market(&self, symbols: Vec<String>) -> HashMap<String, MarketScores> {
        let neutral = self.config.neutral_score;
        let mut tasks = JoinSet::new();
        for symbol in symbols {
            let volume = Arc::clone(&self.volume);
            let price = Arc::clone(&self.price);
            tasks.spawn(async move {
                let ((v, v_failed), (p, p_failed)) = tokio::join!(
                    market_score_or_neutral(volume.as_ref(), &symbol, neutral),
                    market_score_or_neutral(price.as_ref(), &symbol, neutral),
                );
                let scores = MarketScores {
                    volume: v,
                    price: p,
                    failures: v_failed as usize + p_failed as usize,
                };
                (symbol, scores)
            });
        }

        let mut out = HashMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((symbol, scores)) => {
                    out.insert(symbol, scores);
                }
                Err(e) => warn!(error = %e, "market scoring task aborted"),
            }
        }
        out
    }

    pub async fn baseline(&self, symbol: &str, now: DateTime<Utc>) -> BaselineReport {
        let load = self.load(now).await;
        self.baseline_in(&load.records, symbol, now)
    }

    pub fn baseline_in(&self, records: &[MentionRecord], symbol: &str, now: DateTime<Utc>) -> BaselineReport {
        let symbol = symbol.to_uppercase();
        let windows = self.windows(now);
        let tagged = self.extractor.tag(records);
        let index = MentionIndex::build(&tagged, &windows);
        BaselineReport {
            baseline_mentions: index.baseline(&symbol),
            recent_mentions: index.recent(&symbol),
            daily_counts: index.daily_counts(&symbol),
            symbol,
        }
    }
}
