use crate::domain::error::DomainError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Listing entry for a stored object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlobMeta {
    pub key: String,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
}

/// Key-value object storage shared with the collectors. Keys are
/// `/`-separated relative paths.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// All objects whose key starts with `prefix`, sorted by key.
    async fn list(&self, prefix: &str) -> Result<Vec<BlobMeta>, DomainError>;

    async fn get(&self, key: &str) -> Result<Vec<u8>, DomainError>;

    async fn put(&self, key: &str, body: &[u8], content_type: &str) -> Result<(), DomainError>;
}
