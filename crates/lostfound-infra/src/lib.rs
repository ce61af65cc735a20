//! # Lostfound Infrastructure
//!
//! Concrete implementations of the ports defined in `lostfound-core`.
//! This crate contains post persistence, image blob storage and token
//! validation.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM
//! - `auth` - JWT token validation

pub mod database;
pub mod storage;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use database::{DatabaseConfig, InMemoryPostRepository};
pub use storage::{FilesystemBlobStore, InMemoryBlobStore};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConnections, PostgresPostRepository};

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenService};
