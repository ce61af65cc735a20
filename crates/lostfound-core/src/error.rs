//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

use crate::ports::BlobError;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Storage failure: {0}")]
    Storage(#[from] BlobError),

    #[error("Repository failure: {0}")]
    Repository(#[from] RepoError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn post_not_found(id: Uuid) -> Self {
        DomainError::NotFound {
            entity_type: "Post",
            id,
        }
    }

    /// Stable machine-readable kind, used in API problem documents.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::NotFound { .. } => "not-found",
            DomainError::Validation(_) => "validation",
            DomainError::Forbidden(_) => "forbidden",
            DomainError::InvalidState(_) => "invalid-state",
            DomainError::Storage(_) => "storage",
            DomainError::Repository(_) | DomainError::Internal(_) => "internal",
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
