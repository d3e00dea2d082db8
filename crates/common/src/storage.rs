//! Blob storage abstraction for uploaded images and logos.
//!
//! The core never touches the filesystem directly; it talks to a
//! [`BlobStorage`] collaborator keyed by relative paths.

use std::path::PathBuf;

use crate::{AppError, AppResult};

/// Metadata for a stored blob.
#[derive(Debug, Clone)]
pub struct StoredBlob {
    /// Storage key (relative path).
    pub key: String,
    /// Public URL to access the blob.
    pub url: String,
    /// Blob size in bytes.
    pub size: u64,
}

/// Storage backend trait.
#[async_trait::async_trait]
pub trait BlobStorage: Send + Sync {
    /// Store a blob under the given key.
    async fn put(&self, key: &str, data: &[u8]) -> AppResult<StoredBlob>;

    /// Delete a blob. Returns `false` if the key did not exist.
    async fn delete(&self, key: &str) -> AppResult<bool>;

    /// Get the public URL for a key.
    fn public_url(&self, key: &str) -> String;

    /// Check if a blob exists.
    async fn exists(&self, key: &str) -> AppResult<bool>;
}

/// Local filesystem storage backend.
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new local storage backend.
    #[must_use]
    pub const fn new(base_path: PathBuf, base_url: String) -> Self {
        Self {
            base_path,
            base_url,
        }
    }
}

#[async_trait::async_trait]
impl BlobStorage for LocalStorage {
    async fn put(&self, key: &str, data: &[u8]) -> AppResult<StoredBlob> {
        let path = self.base_path.join(key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Storage(format!("Failed to create directory: {e}")))?;
        }

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write file: {e}")))?;

        Ok(StoredBlob {
            key: key.to_string(),
            url: self.public_url(key),
            size: data.len() as u64,
        })
    }

    async fn delete(&self, key: &str) -> AppResult<bool> {
        let path = self.base_path.join(key);
        if !path.exists() {
            return Ok(false);
        }
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to delete file: {e}")))?;
        Ok(true)
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.base_path.join(key).exists())
    }
}

/// Generate a unique storage key for an uploaded file.
///
/// Keys are prefixed by purpose (`submissions`, `locations`, `profile`) and
/// dated so the store stays browsable:
/// `submissions/2026/08/1724380000123_<uuid>.jpg`.
#[must_use]
pub fn generate_blob_key(prefix: &str, original_name: &str) -> String {
    use chrono::Utc;

    let now = Utc::now();
    let date_path = now.format("%Y/%m").to_string();
    let timestamp = now.timestamp_millis();

    let extension = original_name
        .rfind('.')
        .filter(|&pos| pos > 0 && pos < original_name.len() - 1)
        .map(|pos| &original_name[pos + 1..])
        .filter(|ext| ext.len() <= 10 && !ext.is_empty())
        .unwrap_or("bin");

    format!(
        "{}/{}/{}_{}.{}",
        prefix,
        date_path,
        timestamp,
        uuid::Uuid::new_v4(),
        extension
    )
}
