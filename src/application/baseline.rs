//! Historical mention baselines.
//!
//! The recent window is `[now - recent, now)`. The historical window is
//! `[now - baseline, now - recent)`: the activity being scored never feeds
//! its own baseline. A baseline is the mean per-date count over the UTC
//! calendar dates that have at least one mention.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::application::extractor::TaggedRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MentionWindows {
    pub now: DateTime<Utc>,
    pub recent_start: DateTime<Utc>,
    pub history_start: DateTime<Utc>,
}

impl MentionWindows {
    pub fn new(now: DateTime<Utc>, recent: Duration, baseline: Duration) -> Self {
        Self {
            now,
            recent_start: now - recent,
            history_start: now - baseline,
        }
    }

    pub fn is_recent(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.recent_start && ts < self.now
    }

    pub fn is_historical(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.history_start && ts < self.recent_start
    }
}

/// Per-symbol daily history and recent counts, built in one pass.
#[derive(Debug, Default)]
pub struct MentionIndex {
    daily: HashMap<String, BTreeMap<NaiveDate, usize>>,
    recent: HashMap<String, usize>,
}

impl MentionIndex {
    pub fn build(corpus: &[TaggedRecord<'_>], windows: &MentionWindows) -> Self {
        let mut index = Self::default();
        for tagged in corpus {
            let ts = tagged.record.timestamp;
            if windows.is_recent(ts) {
                for symbol in &tagged.symbols {
                    *index.recent.entry(symbol.clone()).or_default() += 1;
                }
            } else if windows.is_historical(ts) {
                let date = ts.date_naive();
                for symbol in &tagged.symbols {
                    *index
                        .daily
                        .entry(symbol.clone())
                        .or_default()
                        .entry(date)
                        .or_default() += 1;
                }
            }
        }
        index
    }

    /// Average mentions per active date; 0.0 when the symbol has no history.
    pub fn baseline(&self, symbol: &str) -> f64 {
        match self.daily.get(symbol) {
            Some(days) if !days.is_empty() => {
                let total: usize = days.values().sum();
                total as f64 / days.len() as f64
            }
            _ => 0.0,
        }
    }

    pub fn recent(&self, symbol: &str) -> usize {
        self.recent.get(symbol).copied().unwrap_or(0)
    }

    pub fn daily_counts(&self, symbol: &str) -> Vec<(NaiveDate, usize)> {
        self.daily
            .get(symbol)
            .map(|days| days.iter().map(|(d, c)| (*d, *c)).collect())
            .unwrap_or_default()
    }
}
