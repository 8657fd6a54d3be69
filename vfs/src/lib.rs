//! Named blob storage for polywire.
//!
//! Codecs turn values into byte buffers; this crate decides where those
//! buffers live. Everything goes through the [`BlobStore`] trait.
//!
//! # Stores
//!
//! - [`FileSystemStore`]: files under a root directory (read-write or read-only)
//! - [`MemoryStore`]: shared in-memory map for tests (read-write or read-only)
//!
//! # Read-Only vs Read-Write
//!
//! All stores implement read operations. Writes default to returning
//! [`VfsError::ReadOnly`]. Use [`BlobStore::is_read_only()`] to check
//! capability.

mod error;
mod filesystem;
mod memory;
pub mod path;
mod store;

pub use error::VfsError;
pub use filesystem::FileSystemStore;
pub use memory::MemoryStore;
pub use store::BlobStore;
