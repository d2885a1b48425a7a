//! Storage fakes for failure-path tests.

#![allow(dead_code)]

use async_trait::async_trait;
use florascan_storage::{LocalStorage, Storage, StorageError, StorageResult};

/// Writes the file like the real storage, then reports the save as failed —
/// simulating a write that dies partway through. Tests use it to assert the
/// pipeline never leaves a partial file behind.
pub struct PartialWriteStorage {
    inner: LocalStorage,
}

impl PartialWriteStorage {
    pub fn new(inner: LocalStorage) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Storage for PartialWriteStorage {
    async fn save(&self, key: &str, data: Vec<u8>) -> StorageResult<()> {
        self.inner.save(key, data).await?;
        Err(StorageError::SaveFailed(format!(
            "simulated mid-write failure for {key}"
        )))
    }

    async fn read(&self, key: &str) -> StorageResult<Vec<u8>> {
        self.inner.read(key).await
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        self.inner.exists(key).await
    }
}
