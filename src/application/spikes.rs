//! Mention spike detection.

use tracing::debug;

use crate::application::baseline::{MentionIndex, MentionWindows};
use crate::application::extractor::TaggedRecord;
use crate::domain::entities::opportunity::MentionSpike;
use crate::domain::values::detector_config::DetectorConfig;
use crate::domain::values::watchlist::Watchlist;

pub struct SpikeDetector {
    watchlist: Watchlist,
    threshold: f64,
    floor: f64,
}

impl SpikeDetector {
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            watchlist: config.watchlist.clone(),
            threshold: config.spike_threshold,
            floor: config.baseline_floor,
        }
    }

    /// One spike per watch-list symbol whose recent/baseline ratio reaches
    /// the threshold. Symbols with no history are skipped outright.
    pub fn detect(&self, corpus: &[TaggedRecord<'_>], windows: &MentionWindows) -> Vec<MentionSpike> {
        let index = MentionIndex::build(corpus, windows);
        self.detect_indexed(&index, windows)
    }

    pub fn detect_indexed(&self, index: &MentionIndex, windows: &MentionWindows) -> Vec<MentionSpike> {
        let mut spikes = Vec::new();
        for symbol in self.watchlist.symbols() {
            let baseline = index.baseline(symbol);
            if baseline == 0.0 {
                continue;
            }
            let spike = MentionSpike::new(symbol, index.recent(symbol), baseline, self.floor, windows.now);
            debug!(
                symbol,
                recent = spike.recent_mentions,
                baseline,
                ratio = spike.spike_ratio,
                "mention ratio"
            );
            if spike.spike_ratio >= self.threshold {
                spikes.push(spike);
            }
        }
        spikes
    }
}
