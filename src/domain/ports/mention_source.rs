use crate::domain::entities::mention_record::MentionRecord;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Outcome of loading the mention corpus. Load problems are reported in the
/// counters, never as an error: an unreadable store yields an empty corpus.
#[derive(Debug, Clone, Default)]
pub struct CorpusLoad {
    pub records: Vec<MentionRecord>,
    pub rows_skipped: usize,
    pub blobs_read: usize,
    pub blobs_failed: usize,
}

#[async_trait]
pub trait MentionSource: Send + Sync {
    fn name(&self) -> &str;

    /// Records collected at or after `since`.
    async fn load(&self, since: DateTime<Utc>) -> CorpusLoad;
}
