//! Application state - shared across all handlers.

use std::sync::Arc;

use lostfound_core::ports::{BlobStore, PostRepository};
use lostfound_core::services::{PostLifecycle, PostSearch};
use lostfound_infra::{FilesystemBlobStore, InMemoryBlobStore, InMemoryPostRepository};

#[cfg(feature = "postgres")]
use lostfound_infra::{DatabaseConnections, PostgresPostRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub lifecycle: PostLifecycle,
    pub search: PostSearch,
    pub blobs: Arc<dyn BlobStore>,
    pub storage_mode: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let (posts, storage_mode) = Self::post_repository(config).await;
        let blobs = Self::blob_store(config).await;

        tracing::info!(storage = storage_mode, "Application state initialized");

        Self::from_parts(posts, blobs, storage_mode)
    }

    /// State backed entirely by in-memory adapters.
    pub fn in_memory() -> Self {
        Self::from_parts(
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(InMemoryBlobStore::new()),
            "memory",
        )
    }

    fn from_parts(
        posts: Arc<dyn PostRepository>,
        blobs: Arc<dyn BlobStore>,
        storage_mode: &'static str,
    ) -> Self {
        Self {
            lifecycle: PostLifecycle::new(posts.clone(), blobs.clone()),
            search: PostSearch::new(posts),
            blobs,
            storage_mode,
        }
    }

    #[cfg(feature = "postgres")]
    async fn post_repository(config: &AppConfig) -> (Arc<dyn PostRepository>, &'static str) {
        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return (Arc::new(InMemoryPostRepository::new()), "memory");
        };

        match DatabaseConnections::init(db_config).await {
            Ok(connections) => (
                Arc::new(PostgresPostRepository::new(connections.main)),
                "postgres",
            ),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                (Arc::new(InMemoryPostRepository::new()), "memory")
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn post_repository(_config: &AppConfig) -> (Arc<dyn PostRepository>, &'static str) {
        tracing::info!("Running without postgres feature - using in-memory repository");
        (Arc::new(InMemoryPostRepository::new()), "memory")
    }

    async fn blob_store(config: &AppConfig) -> Arc<dyn BlobStore> {
        let Some(root) = &config.media_root else {
            tracing::warn!("MEDIA_ROOT not set. Images are kept in memory.");
            return Arc::new(InMemoryBlobStore::new());
        };

        let store = FilesystemBlobStore::new(root);
        match store.init().await {
            Ok(()) => {
                tracing::info!(root = %root.display(), "Filesystem blob store ready");
                Arc::new(store)
            }
            Err(e) => {
                tracing::error!("Media root unusable: {}. Using in-memory fallback.", e);
                Arc::new(InMemoryBlobStore::new())
            }
        }
    }
}
