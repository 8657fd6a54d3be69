use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::VfsError;
use crate::path::normalize;
use crate::store::BlobStore;

/// In-memory blob store for tests.
///
/// Cloning is cheap and every clone shares the same blobs, so a test can keep
/// one handle for inspection while another is owned by the code under test.
///
/// # Example
///
/// ```
/// use polywire_vfs::{BlobStore, MemoryStore};
///
/// let store = MemoryStore::new();
/// store.write("list.json", b"[1, 2]").unwrap();
/// assert_eq!(store.get("list.json").unwrap(), b"[1, 2]");
/// ```
#[derive(Clone, Default)]
pub struct MemoryStore {
    blobs: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    read_only: bool,
}

impl MemoryStore {
    /// Create an empty, writable store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle to the same blobs that rejects writes.
    pub fn read_only(&self) -> Self {
        Self {
            blobs: Arc::clone(&self.blobs),
            read_only: true,
        }
    }

    /// Insert a blob directly, bypassing the read-only flag.
    ///
    /// Overwrites any existing blob with the same name.
    pub fn insert(&self, name: &str, data: impl Into<Vec<u8>>) -> Result<(), VfsError> {
        let name = normalize(name)?;
        self.blobs.write().insert(name, data.into());
        Ok(())
    }

    /// Current contents of a blob, if any.
    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        let name = normalize(name).ok()?;
        self.blobs.read().get(&name).cloned()
    }

    /// Remove a blob, returning its data if it existed.
    pub fn remove(&self, name: &str) -> Option<Vec<u8>> {
        let name = normalize(name).ok()?;
        self.blobs.write().remove(&name)
    }

    /// Names of all stored blobs, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.blobs.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl BlobStore for MemoryStore {
    fn read(&self, name: &str) -> Result<Vec<u8>, VfsError> {
        let name = normalize(name)?;
        let blobs = self.blobs.read();
        blobs.get(&name).cloned().ok_or(VfsError::NotFound(name))
    }

    fn exists(&self, name: &str) -> Result<bool, VfsError> {
        let name = normalize(name)?;
        Ok(self.blobs.read().contains_key(&name))
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }

    fn write(&self, name: &str, data: &[u8]) -> Result<(), VfsError> {
        if self.read_only {
            return Err(VfsError::ReadOnly);
        }
        let name = normalize(name)?;
        log::debug!("memory store: write '{name}' ({} bytes)", data.len());
        self.blobs.write().insert(name, data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_existing_blob() {
        let store = MemoryStore::new();
        store.insert("data.json", b"{}".to_vec()).unwrap();
        assert_eq!(store.read("data.json").unwrap(), b"{}");
    }

    #[test]
    fn read_missing_blob() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.read("nope.xml"),
            Err(VfsError::NotFound(name)) if name == "nope.xml"
        ));
    }

    #[test]
    fn exists_true_and_false() {
        let store = MemoryStore::new();
        store.insert("device.xml", Vec::new()).unwrap();
        assert!(store.exists("device.xml").unwrap());
        assert!(!store.exists("device.json").unwrap());
    }

    #[test]
    fn write_replaces_contents() {
        let store = MemoryStore::new();
        store.write("list.xml", b"first").unwrap();
        store.write("list.xml", b"second").unwrap();
        assert_eq!(store.read("list.xml").unwrap(), b"second");
    }

    #[test]
    fn names_are_normalized() {
        let store = MemoryStore::new();
        store.write("/out\\soap.xml", b"x").unwrap();
        assert_eq!(store.names(), ["out/soap.xml"]);
        assert!(store.exists("out/./soap.xml").unwrap());
    }

    #[test]
    fn invalid_names_are_rejected() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.write("../escape", b"x"),
            Err(VfsError::InvalidPath(_))
        ));
        assert!(matches!(store.read(""), Err(VfsError::InvalidPath(_))));
    }

    #[test]
    fn clones_share_blobs() {
        let store = MemoryStore::new();
        let handle = store.clone();
        handle.write("Person.json", b"[]").unwrap();
        assert_eq!(store.get("Person.json"), Some(b"[]".to_vec()));
    }

    #[test]
    fn read_only_handle() {
        let store = MemoryStore::new();
        store.insert("soap.xml", b"x".to_vec()).unwrap();
        let frozen = store.read_only();
        assert!(frozen.is_read_only());
        assert!(!store.is_read_only());
        assert!(matches!(frozen.write("soap.xml", b"y"), Err(VfsError::ReadOnly)));
        assert_eq!(frozen.read("soap.xml").unwrap(), b"x");
    }

    #[test]
    fn remove_returns_data() {
        let store = MemoryStore::new();
        store.insert("file.txt", b"data".to_vec()).unwrap();
        assert_eq!(store.remove("file.txt"), Some(b"data".to_vec()));
        assert!(store.remove("file.txt").is_none());
    }
}
