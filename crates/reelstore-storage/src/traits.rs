//! Storage abstraction trait
//!
//! This module defines the ObjectStorage trait that all storage backends must
//! implement.

use async_trait::async_trait;
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Object-storage capability.
///
/// All backends (S3, local filesystem) implement this trait so the ingestion
/// pipeline can store assets without coupling to a provider. Keys are derived
/// by the caller (see the `keys` module); a put to an existing key overwrites
/// it, which is what gives full-pipeline retries their idempotence.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `data` under `key` with the given content type and return the
    /// public URL for the object.
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<String>;

    /// Store the contents of `reader` under `key` without buffering the whole
    /// object in memory. The reader is consumed until EOF.
    async fn put_stream(
        &self,
        key: &str,
        content_type: &str,
        reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<String>;

    /// Delete the object at `key`.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Public URL for a key, without touching the backend.
    fn url_for(&self, key: &str) -> String;
}

/// Reject keys that could escape the backend's namespace.
pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() || key.contains("..") || key.starts_with('/') {
        return Err(StorageError::InvalidKey(format!(
            "Storage key contains invalid characters: {}",
            key
        )));
    }
    Ok(())
}
