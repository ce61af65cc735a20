use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostStatus};
use crate::error::{DomainError, RepoError};

/// Generic repository trait defining the shared read/insert operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn create(&self, entity: T) -> Result<T, RepoError>;
}

/// Mutation applied to a post while its record is locked. Returning an
/// error aborts the transaction and leaves the record untouched.
pub type PostMutation = Box<dyn FnOnce(&mut Post) -> Result<(), DomainError> + Send>;

/// Precondition checked against a locked post before it is removed.
pub type PostCheck = Box<dyn FnOnce(&Post) -> Result<(), DomainError> + Send>;

/// Committed result of a locked mutation.
#[derive(Debug, Clone)]
pub struct PostChange {
    pub before: Post,
    pub after: Post,
}

/// Post repository.
///
/// `modify` and `remove` run their read-check-write sequence as a single
/// transaction holding an exclusive lock on the post, so concurrent callers
/// observe each other's committed state.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All posts with the given status, oldest first.
    async fn list_by_status(&self, status: PostStatus) -> Result<Vec<Post>, RepoError>;

    /// Posts whose title or body contains `term`, ignoring case and status.
    async fn search_by_text(&self, term: &str) -> Result<Vec<Post>, RepoError>;

    /// Lock, mutate and persist a post.
    async fn modify(&self, id: Uuid, mutation: PostMutation) -> Result<PostChange, DomainError>;

    /// Lock, check and delete a post, returning the deleted record.
    async fn remove(&self, id: Uuid, check: PostCheck) -> Result<Post, DomainError>;
}
