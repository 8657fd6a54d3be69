use polywire_codec::{DeserializeError, SerializeError};
use polywire_vfs::VfsError;
use thiserror::Error;

/// Errors surfaced by a menu operation or the console loop.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("serialization failed: {0}")]
    Serialize(#[from] SerializeError),
    #[error("deserialization failed: {0}")]
    Deserialize(#[from] DeserializeError),
    #[error("storage error: {0}")]
    Storage(#[from] VfsError),
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown operation {0} (choose 1-22)")]
    UnknownOperation(u32),
}
