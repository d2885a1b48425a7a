//! Storage abstraction trait
//!
//! The upload pipeline and the history sweep talk to storage through this
//! trait so tests can substitute an in-memory fake.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Save failed: {0}")]
    SaveFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// Keys are flat filenames of the form `{timestamp}_{sanitized-name}`; keys
/// containing `..`, path separators, or a leading `/` are rejected by every
/// implementation.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Save a file under the given key.
    async fn save(&self, key: &str, data: Vec<u8>) -> StorageResult<()>;

    /// Read a file by its storage key.
    async fn read(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Delete a file by its storage key. Deleting a missing key is not an
    /// error.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check whether a key exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;
}
