use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::errors::StoreError;

/// Opaque key-value substrate holding serialized blobs.
pub trait BlobStore {
    /// # Errors
    ///
    /// Returns an error if the substrate cannot be read. A missing key is `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrites the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the substrate rejects the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Blob store living for the duration of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    entries: HashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.into(), value.into());
        store
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Whether `key` can name a file directly inside a blob directory: non-empty,
/// no path separators, no drive prefix, no `..`.
pub fn is_safe_key(key: &str) -> bool {
    !key.trim().is_empty()
        && !key.contains("..")
        && !key.contains(['/', '\\', ':', '\0'])
}

/// Blob store keeping one `<key>.json` file per key inside a directory.
///
/// Writes go to `<key>.json.tmp` first and are renamed over the target, so the
/// previous blob stays intact until the new one is complete.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn tmp_path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json.tmp"))
    }

    fn check_key(key: &str) -> Result<(), StoreError> {
        if is_safe_key(key) {
            Ok(())
        } else {
            Err(StoreError::Storage(format!("invalid blob key '{key}'")))
        }
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::check_key(key)?;
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::check_key(key)?;
        fs::create_dir_all(&self.dir)?;
        let tmp = self.tmp_path_for(key);
        fs::write(&tmp, value)?;
        fs::rename(&tmp, self.path_for(key))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_overwrites() {
        let mut store = MemoryBlobStore::with_entry("users", "[]");
        store.set("users", "[1]").unwrap();
        assert_eq!(store.get("users").unwrap().as_deref(), Some("[1]"));
        assert!(store.get("other").unwrap().is_none());
    }

    #[test]
    fn file_store_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::new(dir.path());
        assert!(store.get("users").unwrap().is_none());
    }

    #[test]
    fn file_store_creates_directory_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileBlobStore::new(dir.path().join("nested"));
        store.set("users", "[]").unwrap();
        assert!(store.path_for("users").exists());
        assert_eq!(store.get("users").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn file_store_leaves_no_tmp_behind() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileBlobStore::new(dir.path());
        store.set("users", "[1]").unwrap();
        store.set("users", "[2]").unwrap();
        assert!(!dir.path().join("users.json.tmp").exists());
        assert_eq!(store.get("users").unwrap().as_deref(), Some("[2]"));
    }

    #[test]
    fn file_store_rejects_keys_leaving_its_directory() {
        let root = tempfile::tempdir().unwrap();
        let mut store = FileBlobStore::new(root.path().join("data"));
        for key in ["../escaped", "a/b", "/abs", "C:evil", "a\\b", ""] {
            assert!(store.set(key, "[]").is_err(), "key {key:?} accepted");
            assert!(store.get(key).is_err(), "key {key:?} accepted");
        }
        assert!(!root.path().join("escaped.json").exists());
    }

    #[test]
    fn safe_keys() {
        assert!(is_safe_key("users"));
        assert!(is_safe_key("users-v2.backup"));
        assert!(!is_safe_key(".."));
        assert!(!is_safe_key("x..y"));
        assert!(!is_safe_key("   "));
    }
}
