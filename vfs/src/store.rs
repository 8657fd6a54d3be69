use crate::VfsError;

/// A named blob store.
///
/// Stores map names to whole byte buffers. Every call acquires and releases
/// whatever handle the backend needs before returning, so nothing stays open
/// between calls.
///
/// # Read vs Write
///
/// All stores implement `read` and `exists`. `write` defaults to returning
/// [`VfsError::ReadOnly`]; stores that accept writes override it and return
/// `false` from [`is_read_only()`](BlobStore::is_read_only).
///
/// # Names
///
/// Names are normalized with [`normalize`](crate::path::normalize) by every
/// store, so `data\list.json` and `data/list.json` address the same blob.
pub trait BlobStore: Send + Sync {
    /// Read the entire contents of a blob.
    fn read(&self, name: &str) -> Result<Vec<u8>, VfsError>;

    /// Check whether a blob exists.
    fn exists(&self, name: &str) -> Result<bool, VfsError>;

    /// Whether this store rejects writes.
    fn is_read_only(&self) -> bool {
        true
    }

    /// Write a blob, creating it or replacing its previous contents.
    fn write(&self, _name: &str, _data: &[u8]) -> Result<(), VfsError> {
        Err(VfsError::ReadOnly)
    }
}
