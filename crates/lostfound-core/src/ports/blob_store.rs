//! Blob storage port - opaque storage for post images.

use async_trait::async_trait;

use crate::domain::BlobHandle;

/// Blob store trait - abstraction over image storage backends (filesystem, in-memory).
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes and return a fresh handle.
    async fn put(&self, data: &[u8]) -> Result<BlobHandle, BlobError>;

    /// Read the bytes behind a handle.
    async fn get(&self, handle: &BlobHandle) -> Result<Vec<u8>, BlobError>;

    /// Delete a blob. Returns `BlobError::NotFound` if it does not exist.
    async fn delete(&self, handle: &BlobHandle) -> Result<(), BlobError>;
}

/// Blob storage errors.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    #[error("Blob not found: {0}")]
    NotFound(BlobHandle),

    #[error("Invalid blob handle: {0}")]
    InvalidHandle(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Backend error: {0}")]
    Backend(String),
}
