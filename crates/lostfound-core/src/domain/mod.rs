//! Domain entities - the core business objects.

mod blob;
mod location;
mod post;

pub use blob::BlobHandle;
pub use location::Location;
pub use post::{NewPost, Post, PostFields, PostPatch, PostStatus};
