//! In-memory post repository - used when no database is configured, and in tests.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use lostfound_core::domain::{Post, PostStatus};
use lostfound_core::error::{DomainError, RepoError};
use lostfound_core::ports::{BaseRepository, PostChange, PostCheck, PostMutation, PostRepository};

/// In-memory post store backed by a `Vec` behind an async RwLock.
///
/// Mutations hold the write lock for their whole check-then-set sequence,
/// which gives the same serialization as a row lock.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
        }
    }

    fn sorted(mut posts: Vec<Post>) -> Vec<Post> {
        posts.sort_by_key(|p| p.created_at);
        posts
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, entity: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;

        if posts.iter().any(|p| p.id == entity.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        posts.push(entity.clone());
        Ok(entity)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_by_status(&self, status: PostStatus) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;
        let matching = posts.iter().filter(|p| p.status == status).cloned().collect();
        Ok(Self::sorted(matching))
    }

    async fn search_by_text(&self, term: &str) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;
        let matching = posts.iter().filter(|p| p.matches(term)).cloned().collect();
        Ok(Self::sorted(matching))
    }

    async fn modify(&self, id: Uuid, mutation: PostMutation) -> Result<PostChange, DomainError> {
        let mut posts = self.posts.write().await;

        let slot = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DomainError::post_not_found(id))?;

        let before = slot.clone();
        let mut after = before.clone();
        mutation(&mut after)?;
        *slot = after.clone();

        Ok(PostChange { before, after })
    }

    async fn remove(&self, id: Uuid, check: PostCheck) -> Result<Post, DomainError> {
        let mut posts = self.posts.write().await;

        let index = posts
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| DomainError::post_not_found(id))?;

        check(&posts[index])?;
        Ok(posts.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lostfound_core::domain::PostFields;

    fn post(title: &str, body: &str) -> Post {
        let draft = PostFields {
            title: Some(title.to_string()),
            body_text: Some(body.to_string()),
            category: Some("lost".to_string()),
            ..Default::default()
        }
        .into_new_post()
        .unwrap();
        Post::new(Uuid::new_v4(), draft, None)
    }

    fn allow() -> PostCheck {
        Box::new(|_: &Post| -> Result<(), DomainError> { Ok(()) })
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryPostRepository::new();
        let saved = repo.create(post("Umbrella", "blue")).await.unwrap();

        let found = repo.find_by_id(saved.id).await.unwrap();
        assert_eq!(found, Some(saved.clone()));

        assert!(matches!(
            repo.create(saved).await,
            Err(RepoError::Constraint(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_post_untouched() {
        let repo = InMemoryPostRepository::new();
        let saved = repo.create(post("Umbrella", "blue")).await.unwrap();

        let result = repo
            .modify(
                saved.id,
                Box::new(|p: &mut Post| -> Result<(), DomainError> {
                    p.title = "changed".to_string();
                    Err(DomainError::Forbidden("no".to_string()))
                }),
            )
            .await;

        assert!(matches!(result, Err(DomainError::Forbidden(_))));
        let stored = repo.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Umbrella");
    }

    #[tokio::test]
    async fn test_remove_checks_before_deleting() {
        let repo = InMemoryPostRepository::new();
        let saved = repo.create(post("Umbrella", "blue")).await.unwrap();

        let denied = repo
            .remove(
                saved.id,
                Box::new(|_: &Post| -> Result<(), DomainError> {
                    Err(DomainError::Forbidden("no".to_string()))
                }),
            )
            .await;
        assert!(denied.is_err());
        assert!(repo.find_by_id(saved.id).await.unwrap().is_some());

        let removed = repo.remove(saved.id, allow()).await.unwrap();
        assert_eq!(removed.id, saved.id);
        assert!(repo.find_by_id(saved.id).await.unwrap().is_none());

        assert!(matches!(
            repo.remove(saved.id, allow()).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
