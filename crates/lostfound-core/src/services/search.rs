//! Read-side queries over posts.

use std::sync::Arc;

use crate::domain::{Post, PostStatus};
use crate::error::DomainError;
use crate::ports::PostRepository;

#[derive(Clone)]
pub struct PostSearch {
    posts: Arc<dyn PostRepository>,
}

impl PostSearch {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// Every active post, oldest first.
    pub async fn list_active(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.list_by_status(PostStatus::Active).await?)
    }

    /// Substring search over title and body.
    ///
    /// A missing or blank term lists active posts only, while a real term
    /// matches posts of any status.
    pub async fn search(&self, term: Option<&str>) -> Result<Vec<Post>, DomainError> {
        match term.map(str::trim).filter(|t| !t.is_empty()) {
            None => self.list_active().await,
            Some(term) => {
                let posts = self.posts.search_by_text(term).await?;
                tracing::debug!(term, hits = posts.len(), "Post search");
                Ok(posts)
            }
        }
    }
}
