//! In-memory blob store - used when no media root is configured, and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use lostfound_core::domain::BlobHandle;
use lostfound_core::ports::{BlobError, BlobStore};

/// Blob store using a HashMap with async RwLock.
/// Note: Data is lost on process restart.
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
        }
    }

    /// Number of live blobs.
    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn contains(&self, handle: &BlobHandle) -> bool {
        self.blobs.read().await.contains_key(handle.as_str())
    }
}

impl Default for InMemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(&self, data: &[u8]) -> Result<BlobHandle, BlobError> {
        let key = Uuid::new_v4().simple().to_string();
        self.blobs.write().await.insert(key.clone(), data.to_vec());
        Ok(BlobHandle::new(key))
    }

    async fn get(&self, handle: &BlobHandle) -> Result<Vec<u8>, BlobError> {
        self.blobs
            .read()
            .await
            .get(handle.as_str())
            .cloned()
            .ok_or_else(|| BlobError::NotFound(handle.clone()))
    }

    async fn delete(&self, handle: &BlobHandle) -> Result<(), BlobError> {
        match self.blobs.write().await.remove(handle.as_str()) {
            Some(_) => Ok(()),
            None => Err(BlobError::NotFound(handle.clone())),
        }
    }
}
