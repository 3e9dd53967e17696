//! Mention corpus read from collector CSV files in a blob store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{debug, warn};

use crate::domain::entities::mention_record::MentionRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::blob_store::BlobStore;
use crate::domain::ports::mention_source::{CorpusLoad, MentionSource};

pub const DEFAULT_CORPUS_PREFIX: &str = "raw-data/reddit_financial_";

/// Reads every CSV blob under a key prefix. Required columns are `id` and
/// `timestamp`; `title`, `content` and `sentiment_label` are optional and any
/// other column is ignored.
pub struct CsvMentionSource {
    store: Arc<dyn BlobStore>,
    prefix: String,
}

impl CsvMentionSource {
    pub fn new(store: Arc<dyn BlobStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }
}

#[async_trait]
impl MentionSource for CsvMentionSource {
    fn name(&self) -> &str {
        "csv_blob_store"
    }

    async fn load(&self, since: DateTime<Utc>) -> CorpusLoad {
        let mut load = CorpusLoad::default();

        let blobs = match self.store.list(&self.prefix).await {
            Ok(blobs) => blobs,
            Err(e) => {
                warn!(prefix = %self.prefix, error = %e, "could not list mention corpus");
                return load;
            }
        };

        for blob in blobs.iter().filter(|b| b.last_modified >= since) {
            let bytes = match self.store.get(&blob.key).await {
                Ok(b) => b,
                Err(e) => {
                    warn!(key = %blob.key, error = %e, "could not read corpus blob");
                    load.blobs_failed += 1;
                    continue;
                }
            };
            match parse_records(&bytes) {
                Ok((records, skipped)) => {
                    debug!(key = %blob.key, records = records.len(), skipped, "parsed corpus blob");
                    load.records.extend(records);
                    load.rows_skipped += skipped;
                    load.blobs_read += 1;
                }
                Err(e) => {
                    warn!(key = %blob.key, error = %e, "could not parse corpus blob");
                    load.blobs_failed += 1;
                }
            }
        }

        load.records.retain(|r| r.timestamp >= since);
        load
    }
}

struct Columns {
    id: usize,
    timestamp: usize,
    title: Option<usize>,
    content: Option<usize>,
    sentiment: Option<usize>,
}

/// Parse one CSV file. Rows missing an id or a readable timestamp are
/// skipped and counted; a file without the required columns is an error.
pub fn parse_records(bytes: &[u8]) -> Result<(Vec<MentionRecord>, usize), DomainError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);
    let headers = reader.headers()?.clone();
    let find = |name: &str| headers.iter().position(|h| h.trim() == name);

    let cols = Columns {
        id: find("id").ok_or_else(|| DomainError::Parse("missing 'id' column".into()))?,
        timestamp: find("timestamp")
            .ok_or_else(|| DomainError::Parse("missing 'timestamp' column".into()))?,
        title: find("title"),
        content: find("content"),
        sentiment: find("sentiment_label"),
    };

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for row in reader.records() {
        let row = match row {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "unreadable corpus row");
                skipped += 1;
                continue;
            }
        };
        let field = |idx: Option<usize>| idx.and_then(|i| row.get(i)).map(str::trim).unwrap_or("");

        let id = field(Some(cols.id));
        let raw_ts = field(Some(cols.timestamp));
        let timestamp = match parse_timestamp(raw_ts) {
            Some(ts) if !id.is_empty() => ts,
            _ => {
                debug!(id, timestamp = raw_ts, "skipping malformed corpus row");
                skipped += 1;
                continue;
            }
        };

        records.push(MentionRecord {
            id: id.to_string(),
            timestamp,
            title: clean_text(field(cols.title)),
            content: clean_text(field(cols.content)),
            sentiment_label: field(cols.sentiment).parse().ok(),
        });
    }

    Ok((records, skipped))
}

/// Accepts RFC 3339 and the naive `YYYY-MM-DD HH:MM:SS[.f]` / `T`-separated
/// forms dataframe exports produce. Naive timestamps are UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|n| n.and_utc())
}

/// Dataframe exports write missing text as `nan`.
fn clean_text(s: &str) -> String {
    if s.eq_ignore_ascii_case("nan") {
        String::new()
    } else {
        s.to_string()
    }
}
