//! Storage abstraction trait
//!
//! This module defines the read-only interface the handler uses to reach
//! uploaded objects.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),
}

impl StorageError {
    /// Whether a later attempt might succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StorageError::NotFound(_) | StorageError::DownloadFailed(_))
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Object storage abstraction
///
/// Buckets are passed per call because every notification names its own
/// bucket.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Download an object's bytes
    async fn download(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>>;

    /// Check if an object exists and is readable
    async fn exists(&self, bucket: &str, key: &str) -> StorageResult<bool>;
}
