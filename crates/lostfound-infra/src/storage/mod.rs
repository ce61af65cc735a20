//! Image blob stores - local filesystem and in-memory fallback.

mod filesystem;
mod memory;

pub use filesystem::FilesystemBlobStore;
pub use memory::InMemoryBlobStore;
