use crate::domain::values::signal_weights::SignalWeights;
use crate::domain::values::watchlist::Watchlist;
use chrono::Duration;

/// Longest historical window a run will look back over.
pub const MAX_BASELINE_DAYS: i64 = 3650;

/// Fixed parameters of a detection run. Passed into the detector at
/// construction; nothing here is read from globals.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub watchlist: Watchlist,
    pub weights: SignalWeights,
    /// Minimum `recent / baseline` ratio for a symbol to count as spiking.
    pub spike_threshold: f64,
    pub recent_window_hours: i64,
    pub baseline_days: i64,
    /// Denominator floor for the spike ratio.
    pub baseline_floor: f64,
    /// Mentions a symbol needs before the sentiment shift is computed.
    pub min_sentiment_samples: usize,
    /// Score substituted when a market-data signal fails.
    pub neutral_score: f64,
}

impl DetectorConfig {
    pub fn recent_window(&self) -> Duration {
        Duration::hours(self.recent_window_hours)
    }

    /// Historical window, capped at `MAX_BASELINE_DAYS`.
    pub fn baseline_window(&self) -> Duration {
        Duration::days(self.baseline_days.clamp(0, MAX_BASELINE_DAYS))
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            watchlist: Watchlist::default(),
            weights: SignalWeights::default(),
            spike_threshold: 3.0,
            recent_window_hours: 24,
            baseline_days: 30,
            baseline_floor: 0.1,
            min_sentiment_samples: 5,
            neutral_score: 0.0,
        }
    }
}
