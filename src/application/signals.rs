//! Per-symbol signal scorers. Each returns a value in [0,1] and knows nothing
//! about how the others are computed.

use tracing::warn;

use crate::application::baseline::MentionWindows;
use crate::application::extractor::TaggedRecord;
use crate::domain::entities::opportunity::MentionSpike;
use crate::domain::ports::market_signal::MarketSignal;

/// Mention score: `min(spike_ratio / 10, 1.0)`, carried on the spike.
pub fn mention_score(spike: &MentionSpike) -> f64 {
    spike.normalized_reddit_score
}

/// Rise in the bullish fraction (4–5 stars) of records mentioning `symbol`,
/// recent window against the historical window.
///
/// Returns 0 when fewer than `min_samples` records mention the symbol across
/// both windows, when either window is empty, or when sentiment cooled.
/// Records without a label count as not bullish.
pub fn sentiment_shift_score(
    corpus: &[TaggedRecord<'_>],
    symbol: &str,
    windows: &MentionWindows,
    min_samples: usize,
) -> f64 {
    let mut recent = (0usize, 0usize);
    let mut historical = (0usize, 0usize);

    for tagged in corpus.iter().filter(|t| t.mentions(symbol)) {
        let ts = tagged.record.timestamp;
        let bullish = tagged
            .record
            .sentiment_label
            .map(|l| l.is_bullish())
            .unwrap_or(false) as usize;
        if windows.is_recent(ts) {
            recent.0 += bullish;
            recent.1 += 1;
        } else if windows.is_historical(ts) {
            historical.0 += bullish;
            historical.1 += 1;
        }
    }

    if recent.1 + historical.1 < min_samples || recent.1 == 0 || historical.1 == 0 {
        return 0.0;
    }

    let recent_frac = recent.0 as f64 / recent.1 as f64;
    let historical_frac = historical.0 as f64 / historical.1 as f64;
    (recent_frac - historical_frac).max(0.0)
}

/// Score from a market-data signal, or `neutral` if the lookup fails or
/// returns something outside [0,1]. The bool reports whether it fell back.
pub async fn market_score_or_neutral(signal: &dyn MarketSignal, symbol: &str, neutral: f64) -> (f64, bool) {
    match signal.score(symbol).await {
        Ok(v) if v.is_finite() => (v.clamp(0.0, 1.0), false),
        Ok(v) => {
            warn!(signal = signal.name(), symbol, value = v, "non-finite market score, using neutral");
            (neutral, true)
        }
        Err(e) => {
            warn!(signal = signal.name(), symbol, error = %e, "market signal failed, using neutral");
            (neutral, true)
        }
    }
}
