//! Image attachment management.
//!
//! A post owns at most one image blob. A new blob is always stored before
//! the post record that references it is committed, and the blob it
//! displaces is released only after that commit.

use std::future::Future;
use std::sync::Arc;

use crate::domain::BlobHandle;
use crate::error::DomainError;
use crate::ports::{BlobError, BlobStore};

/// Outcome of a record commit that may have displaced an older image.
#[derive(Debug)]
pub struct Committed<T> {
    pub value: T,
    pub displaced: Option<BlobHandle>,
}

impl<T> Committed<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            displaced: None,
        }
    }

    pub fn displacing(value: T, displaced: Option<BlobHandle>) -> Self {
        Self { value, displaced }
    }
}

/// Owns the rule that a post references exactly one live image blob.
#[derive(Clone)]
pub struct ImageAttachmentManager {
    blobs: Arc<dyn BlobStore>,
}

impl ImageAttachmentManager {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    /// Store `bytes`, then run `commit` with the new handle.
    ///
    /// If `commit` fails the new blob is released and nothing else changes.
    /// If it succeeds, the handle it reports as displaced is released.
    pub async fn replace<T, F, Fut>(&self, bytes: &[u8], commit: F) -> Result<T, DomainError>
    where
        F: FnOnce(BlobHandle) -> Fut,
        Fut: Future<Output = Result<Committed<T>, DomainError>>,
    {
        let handle = self.blobs.put(bytes).await?;
        tracing::debug!(handle = %handle, size = bytes.len(), "Stored image blob");

        match commit(handle.clone()).await {
            Ok(committed) => {
                if let Some(previous) = committed.displaced.as_ref().filter(|p| **p != handle) {
                    self.discard(previous).await;
                }
                Ok(committed.value)
            }
            Err(err) => {
                self.discard(&handle).await;
                Err(err)
            }
        }
    }

    /// Delete a blob. Absent handles and already-deleted blobs are a no-op.
    pub async fn release(&self, handle: Option<&BlobHandle>) -> Result<(), BlobError> {
        let Some(handle) = handle else {
            return Ok(());
        };

        match self.blobs.delete(handle).await {
            Ok(()) | Err(BlobError::NotFound(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Release after the owning record has moved on. Failure only leaks the blob.
    pub async fn discard(&self, handle: &BlobHandle) {
        if let Err(e) = self.release(Some(handle)).await {
            tracing::warn!(handle = %handle, error = %e, "Failed to release image blob, leaving it orphaned");
        }
    }
}
