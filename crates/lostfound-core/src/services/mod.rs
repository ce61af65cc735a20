//! Application services built on the ports.

pub mod images;
pub mod lifecycle;
pub mod ownership;
pub mod search;

pub use images::{Committed, ImageAttachmentManager};
pub use lifecycle::PostLifecycle;
pub use search::PostSearch;
