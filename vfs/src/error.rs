use thiserror::Error;

/// Errors that can occur while reading or writing blobs.
#[derive(Debug, Error)]
pub enum VfsError {
    /// No blob is stored under the requested name.
    #[error("not found: {0}")]
    NotFound(String),
    /// An IO error occurred while accessing the backing store.
    #[error("IO error: {0}")]
    Io(#[source] std::io::Error),
    /// The name is invalid (empty, contains `..`, or other normalization failure).
    #[error("invalid path: {0}")]
    InvalidPath(String),
    /// The store does not accept writes.
    #[error("store is read-only")]
    ReadOnly,
}

impl From<std::io::Error> for VfsError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            VfsError::NotFound(err.to_string())
        } else {
            VfsError::Io(err)
        }
    }
}
