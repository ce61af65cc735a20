//! # Lostfound Core
//!
//! The domain layer of the lost & found listings service.
//! This crate contains the post lifecycle and search logic with zero
//! infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
