//! Filesystem blob store.
//!
//! Blobs live under `{root}/{first-2-hex}/{uuid}.bin`. Handles are bare
//! UUIDs, so a handle can never name a path outside the root.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use lostfound_core::domain::BlobHandle;
use lostfound_core::ports::{BlobError, BlobStore};

pub struct FilesystemBlobStore {
    root: PathBuf,
}

impl FilesystemBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the root directory if needed.
    pub async fn init(&self) -> Result<(), BlobError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| BlobError::Io(format!("create_dir_all({}): {e}", self.root.display())))
    }

    fn path_for(&self, handle: &BlobHandle) -> Result<PathBuf, BlobError> {
        let id = Uuid::try_parse(handle.as_str())
            .map_err(|_| BlobError::InvalidHandle(handle.to_string()))?;
        let name = id.simple().to_string();
        Ok(self.root.join(&name[..2]).join(format!("{name}.bin")))
    }

    fn io_error(handle: &BlobHandle, e: std::io::Error) -> BlobError {
        if e.kind() == ErrorKind::NotFound {
            BlobError::NotFound(handle.clone())
        } else {
            BlobError::Io(e.to_string())
        }
    }
}

/// Write through a sibling temp file and rename, so readers never see a
/// partial blob. The temp file is removed if any step fails.
async fn write_atomic(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let temp_path = path.with_extension("tmp");

    let result = write_then_rename(&temp_path, path, data).await;
    if result.is_err() {
        if let Err(e) = fs::remove_file(&temp_path).await {
            if e.kind() != ErrorKind::NotFound {
                tracing::warn!(path = %temp_path.display(), error = %e, "blob_store: temp cleanup failed");
            }
        }
    }
    result
}

async fn write_then_rename(temp_path: &Path, path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(temp_path).await?;
    file.write_all(data).await?;
    file.sync_all().await?;
    drop(file);

    fs::rename(temp_path, path).await
}

#[async_trait]
impl BlobStore for FilesystemBlobStore {
    async fn put(&self, data: &[u8]) -> Result<BlobHandle, BlobError> {
        let handle = BlobHandle::new(Uuid::new_v4().simple().to_string());
        let path = self.path_for(&handle)?;
        tracing::debug!(handle = %handle, size = data.len(), "blob_store: write");

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| BlobError::Io(e.to_string()))?;
        }

        write_atomic(&path, data)
            .await
            .map_err(|e| BlobError::Io(e.to_string()))?;

        Ok(handle)
    }

    async fn get(&self, handle: &BlobHandle) -> Result<Vec<u8>, BlobError> {
        let path = self.path_for(handle)?;
        fs::read(&path).await.map_err(|e| Self::io_error(handle, e))
    }

    async fn delete(&self, handle: &BlobHandle) -> Result<(), BlobError> {
        let path = self.path_for(handle)?;
        tracing::debug!(handle = %handle, "blob_store: delete");
        fs::remove_file(&path)
            .await
            .map_err(|e| Self::io_error(handle, e))
    }
}
