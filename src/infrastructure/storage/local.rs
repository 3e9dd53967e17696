use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::error::DomainError;
use crate::domain::ports::blob_store::{BlobMeta, BlobStore};

/// Blob store backed by a local directory. Keys are paths relative to the
/// root, always `/`-separated.
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, DomainError> {
        if key.is_empty() || key.contains('\\') {
            return Err(DomainError::InvalidInput(format!("Invalid blob key: '{key}'")));
        }
        let rel = Path::new(key);
        if !rel.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(DomainError::InvalidInput(format!(
                "Blob key must be a relative path without '..': '{key}'"
            )));
        }
        Ok(self.root.join(rel))
    }

    fn key_for(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<&str> = rel
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<_>>()?;
        Some(parts.join("/"))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn list(&self, prefix: &str) -> Result<Vec<BlobMeta>, DomainError> {
        let mut out = Vec::new();
        if !tokio::fs::try_exists(&self.root).await? {
            return Ok(out);
        }

        let mut pending = vec![self.root.clone()];
        while let Some(dir) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                let meta = entry.metadata().await?;
                if meta.is_dir() {
                    pending.push(path);
                    continue;
                }
                let Some(key) = self.key_for(&path) else {
                    continue;
                };
                if !key.starts_with(prefix) {
                    continue;
                }
                let last_modified: DateTime<Utc> = meta.modified()?.into();
                out.push(BlobMeta {
                    key,
                    size: meta.len(),
                    last_modified,
                });
            }
        }

        out.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(out)
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, DomainError> {
        let path = self.path_for(key)?;
        tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DomainError::NotFound(format!("Blob '{key}'")),
            _ => DomainError::Storage(format!("Read '{key}': {e}")),
        })
    }

    async fn put(&self, key: &str, body: &[u8], _content_type: &str) -> Result<(), DomainError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, body)
            .await
            .map_err(|e| DomainError::Storage(format!("Write '{key}': {e}")))
    }
}
