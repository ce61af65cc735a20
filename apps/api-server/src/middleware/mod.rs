//! Request extractors and error mapping.

pub mod auth;
pub mod error;

pub use auth::Identity;
pub use error::{AppError, AppResult};
