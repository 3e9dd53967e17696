//! Derived detection entities: spikes, per-signal scores, and the ranked
//! opportunities handed to persistence.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::values::alert_level::AlertLevel;
use crate::domain::values::signal_weights::SignalWeights;

/// Abnormal recent mention activity for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MentionSpike {
    pub symbol: String,
    pub recent_mentions: usize,
    pub baseline_mentions: f64,
    /// `recent_mentions / max(baseline_mentions, floor)`.
    pub spike_ratio: f64,
    /// `min(spike_ratio / 10, 1.0)`.
    pub normalized_reddit_score: f64,
    pub detected_at: DateTime<Utc>,
}

impl MentionSpike {
    pub fn new(
        symbol: impl Into<String>,
        recent_mentions: usize,
        baseline_mentions: f64,
        baseline_floor: f64,
        detected_at: DateTime<Utc>,
    ) -> Self {
        let spike_ratio = recent_mentions as f64 / baseline_mentions.max(baseline_floor);
        Self {
            symbol: symbol.into(),
            recent_mentions,
            baseline_mentions,
            spike_ratio,
            normalized_reddit_score: (spike_ratio / 10.0).min(1.0),
            detected_at,
        }
    }
}

/// The four normalized signal scores, each in [0,1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SignalScoreSet {
    pub reddit_score: f64,
    pub volume_score: f64,
    pub price_score: f64,
    pub sentiment_score: f64,
}

impl SignalScoreSet {
    /// Inputs are clamped into [0,1]; a negative sentiment shift counts as 0.
    pub fn new(reddit: f64, volume: f64, price: f64, sentiment: f64) -> Self {
        Self {
            reddit_score: unit(reddit),
            volume_score: unit(volume),
            price_score: unit(price),
            sentiment_score: unit(sentiment),
        }
    }

    /// Weighted blend, clamped to [0,1].
    pub fn composite(&self, weights: &SignalWeights) -> f64 {
        let raw = self.reddit_score * weights.mention()
            + self.volume_score * weights.volume()
            + self.price_score * weights.price()
            + self.sentiment_score * weights.sentiment();
        raw.clamp(0.0, 1.0)
    }
}

fn unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// A scored, classified trending symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Opportunity {
    pub symbol: String,
    pub composite_score: f64,
    pub alert_level: AlertLevel,
    pub risk_warning: String,
    pub individual_scores: SignalScoreSet,
    pub spike_ratio: f64,
    pub recent_mentions: usize,
    pub baseline_mentions: f64,
    pub detected_at: DateTime<Utc>,
    pub reason: String,
}

impl Opportunity {
    pub fn from_spike(spike: &MentionSpike, scores: SignalScoreSet, weights: &SignalWeights) -> Self {
        let composite_score = scores.composite(weights);
        let alert_level = AlertLevel::from_score(composite_score);
        Self {
            symbol: spike.symbol.clone(),
            composite_score,
            alert_level,
            risk_warning: alert_level.risk_warning().to_string(),
            individual_scores: scores,
            spike_ratio: spike.spike_ratio,
            recent_mentions: spike.recent_mentions,
            baseline_mentions: spike.baseline_mentions,
            detected_at: spike.detected_at,
            reason: format!(
                "{:.1}x mention spike ({} mentions vs {:.1} baseline)",
                spike.spike_ratio, spike.recent_mentions, spike.baseline_mentions
            ),
        }
    }
}
