use std::io;
use std::path::{Path, PathBuf};

use crate::error::VfsError;
use crate::path::normalize;
use crate::store::BlobStore;

/// Blob store backed by a directory on disk.
///
/// Blob names are normalized and joined onto the root directory. Each call
/// opens the file, does its work and closes it again before returning.
///
/// # Example
///
/// ```no_run
/// use polywire_vfs::{BlobStore, FileSystemStore};
///
/// // Writes ./out/device.json, creating ./out if needed.
/// let store = FileSystemStore::new("./out");
/// store.write("device.json", b"[]").unwrap();
/// ```
pub struct FileSystemStore {
    root: PathBuf,
    read_only: bool,
}

impl FileSystemStore {
    /// Create a writable store rooted at the given directory.
    ///
    /// The directory does not need to exist yet. It is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            read_only: false,
        }
    }

    /// Create a store that only reads from the given directory.
    pub fn read_only(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            read_only: true,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a blob name to a full filesystem path.
    fn resolve(&self, name: &str) -> Result<(String, PathBuf), VfsError> {
        let name = normalize(name)?;
        let full_path = self.root.join(&name);
        Ok((name, full_path))
    }
}

fn map_io(name: String, err: io::Error) -> VfsError {
    if err.kind() == io::ErrorKind::NotFound {
        VfsError::NotFound(name)
    } else {
        VfsError::Io(err)
    }
}

impl BlobStore for FileSystemStore {
    fn read(&self, name: &str) -> Result<Vec<u8>, VfsError> {
        let (name, full_path) = self.resolve(name)?;
        let data = std::fs::read(&full_path).map_err(|e| map_io(name, e))?;
        log::debug!("read {} ({} bytes)", full_path.display(), data.len());
        Ok(data)
    }

    fn exists(&self, name: &str) -> Result<bool, VfsError> {
        let (_, full_path) = self.resolve(name)?;
        Ok(full_path.is_file())
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn write(&self, name: &str, data: &[u8]) -> Result<(), VfsError> {
        if self.read_only {
            return Err(VfsError::ReadOnly);
        }
        let (_, full_path) = self.resolve(name)?;
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&full_path, data)?;
        log::debug!("wrote {} ({} bytes)", full_path.display(), data.len());
        Ok(())
    }
}
