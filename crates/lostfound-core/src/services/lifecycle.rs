//! Post lifecycle - create, update, delete and mark-found orchestration.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::images::{Committed, ImageAttachmentManager};
use super::ownership::ensure_owner;
use crate::domain::{BlobHandle, Post, PostFields, PostPatch};
use crate::error::DomainError;
use crate::ports::{BlobStore, PostMutation, PostRepository};

/// Coordinates post persistence, ownership checks and image attachments.
#[derive(Clone)]
pub struct PostLifecycle {
    posts: Arc<dyn PostRepository>,
    images: ImageAttachmentManager,
}

impl PostLifecycle {
    pub fn new(posts: Arc<dyn PostRepository>, blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            posts,
            images: ImageAttachmentManager::new(blobs),
        }
    }

    /// Fetch a single post regardless of status.
    pub async fn get(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    /// Create an active post owned by `actor`.
    pub async fn create(
        &self,
        actor: Uuid,
        fields: PostFields,
        image: Option<&[u8]>,
    ) -> Result<Post, DomainError> {
        let draft = fields.into_new_post()?;

        let post = match image {
            None => self.posts.create(Post::new(actor, draft, None)).await?,
            Some(bytes) => {
                self.images
                    .replace(bytes, |handle| async move {
                        let post = self.posts.create(Post::new(actor, draft, Some(handle))).await?;
                        Ok(Committed::new(post))
                    })
                    .await?
            }
        };

        tracing::info!(post_id = %post.id, owner_id = %actor, "Post created");
        Ok(post)
    }

    /// Apply a partial update, optionally replacing the image.
    pub async fn update(
        &self,
        actor: Uuid,
        id: Uuid,
        fields: PostFields,
        image: Option<&[u8]>,
    ) -> Result<Post, DomainError> {
        let patch = fields.into_patch()?;

        // Reject early so refused requests never upload a blob. The locked
        // mutation below re-checks against the committed state.
        let current = self.get(id).await?;
        ensure_owner(actor, &current)?;
        current.ensure_active()?;

        let post = match image {
            None => {
                self.posts
                    .modify(id, edit(actor, patch, None))
                    .await?
                    .after
            }
            Some(bytes) => {
                self.images
                    .replace(bytes, |handle| async move {
                        let change = self.posts.modify(id, edit(actor, patch, Some(handle))).await?;
                        Ok(Committed::displacing(change.after, change.before.image))
                    })
                    .await?
            }
        };

        tracing::info!(post_id = %id, "Post updated");
        Ok(post)
    }

    /// Delete a post and release its image.
    pub async fn delete(&self, actor: Uuid, id: Uuid) -> Result<(), DomainError> {
        let removed = self
            .posts
            .remove(id, Box::new(move |post: &Post| ensure_owner(actor, post)))
            .await?;

        // The record is already gone; a failed release only leaks the blob.
        if let Err(e) = self.images.release(removed.image.as_ref()).await {
            tracing::warn!(
                post_id = %id,
                handle = ?removed.image,
                error = %e,
                leaked = true,
                "Post deleted but its image blob could not be released"
            );
        }

        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }

    /// Transition an active post to resolved.
    pub async fn mark_found(&self, actor: Uuid, id: Uuid) -> Result<Post, DomainError> {
        let change = self
            .posts
            .modify(
                id,
                Box::new(move |post: &mut Post| {
                    ensure_owner(actor, post)?;
                    post.resolve(Utc::now())
                }),
            )
            .await?;

        tracing::info!(post_id = %id, "Post marked as found");
        Ok(change.after)
    }
}

fn edit(actor: Uuid, patch: PostPatch, image: Option<BlobHandle>) -> PostMutation {
    Box::new(move |post: &mut Post| {
        ensure_owner(actor, post)?;
        post.apply(patch, image)
    })
}
