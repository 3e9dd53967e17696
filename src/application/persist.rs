//! Serialises ranked opportunities to CSV and stores them.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::entities::opportunity::Opportunity;
use crate::domain::error::DomainError;
use crate::domain::ports::blob_store::BlobStore;

pub const CSV_COLUMNS: [&str; 12] = [
    "symbol",
    "composite_score",
    "alert_level",
    "risk_warning",
    "recent_mentions",
    "spike_ratio",
    "reddit_score",
    "volume_score",
    "price_score",
    "sentiment_score",
    "detected_at",
    "reason",
];

pub fn to_csv(opportunities: &[Opportunity]) -> Result<Vec<u8>, DomainError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_COLUMNS)?;
    for opp in opportunities {
        let s = &opp.individual_scores;
        writer.write_record([
            opp.symbol.clone(),
            opp.composite_score.to_string(),
            opp.alert_level.to_string(),
            opp.risk_warning.clone(),
            opp.recent_mentions.to_string(),
            opp.spike_ratio.to_string(),
            s.reddit_score.to_string(),
            s.volume_score.to_string(),
            s.price_score.to_string(),
            s.sentiment_score.to_string(),
            opp.detected_at.to_rfc3339(),
            opp.reason.clone(),
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| DomainError::Storage(format!("CSV flush failed: {e}")))
}

pub fn output_key(prefix: &str, at: DateTime<Utc>) -> String {
    format!("{prefix}trending_opportunities_{}.csv", at.format("%Y%m%d_%H%M%S"))
}

pub struct SaveOpportunitiesUseCase {
    store: Arc<dyn BlobStore>,
    prefix: String,
}

impl SaveOpportunitiesUseCase {
    pub fn new(store: Arc<dyn BlobStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    /// Store the ranked list; returns the key written, or `None` for an
    /// empty list.
    pub async fn execute(
        &self,
        ranked: &[Opportunity],
        at: DateTime<Utc>,
    ) -> Result<Option<String>, DomainError> {
        if ranked.is_empty() {
            info!("no trending opportunities to save");
            return Ok(None);
        }
        let body = to_csv(ranked)?;
        let key = output_key(&self.prefix, at);
        self.store.put(&key, &body, "text/csv").await?;
        info!(key = %key, count = ranked.len(), "saved trending opportunities");
        Ok(Some(key))
    }
}
