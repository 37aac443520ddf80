//! String-keyed blob storage for local state.
//!
//! Each key holds one whole JSON document. Writers always replace the full
//! document; there is no partial update.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{RolezinhosError, RolezinhosResult};

pub trait Storage {
    /// Read the blob under `key`, `None` if it was never written.
    fn get(&self, key: &str) -> RolezinhosResult<Option<String>>;

    fn set(&self, key: &str, value: &str) -> RolezinhosResult<()>;

    /// Remove the blob under `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> RolezinhosResult<()>;
}

/// One file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> RolezinhosResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
            && !key.starts_with('.');
        if !valid {
            return Err(RolezinhosError::Config(format!(
                "Invalid storage key '{}'",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl Storage for FileStorage {
    /// Bytes that are not UTF-8 come back lossily decoded, so callers see
    /// them as an unparseable document rather than an I/O failure.
    fn get(&self, key: &str) -> RolezinhosResult<Option<String>> {
        let path = self.path_for(key)?;
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match String::from_utf8(bytes) {
            Ok(content) => Ok(Some(content)),
            Err(e) => {
                tracing::warn!(key, error = %e.utf8_error(), "stored blob is not valid UTF-8");
                Ok(Some(String::from_utf8_lossy(e.as_bytes()).into_owned()))
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> RolezinhosResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        // Write to a sibling file and rename so readers never see a torn document
        let temp = path.with_extension("json.tmp");
        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &path)?;

        tracing::debug!(key, bytes = value.len(), "persisted");
        Ok(())
    }

    fn remove(&self, key: &str) -> RolezinhosResult<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process storage, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> RolezinhosResult<Option<String>> {
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> RolezinhosResult<()> {
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> RolezinhosResult<()> {
        self.blobs.borrow_mut().remove(key);
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    fn get(&self, key: &str) -> RolezinhosResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> RolezinhosResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> RolezinhosResult<()> {
        (**self).remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_roundtrip_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.get("rolezinhos.overrides").unwrap(), None);

        storage.set("rolezinhos.overrides", "{\"events\":[]}").unwrap();
        assert_eq!(
            storage.get("rolezinhos.overrides").unwrap().as_deref(),
            Some("{\"events\":[]}")
        );
        assert!(!dir.path().join("nested/rolezinhos.overrides.json.tmp").exists());

        storage.remove("rolezinhos.overrides").unwrap();
        assert_eq!(storage.get("rolezinhos.overrides").unwrap(), None);
        storage.remove("rolezinhos.overrides").unwrap();
    }

    #[test]
    fn file_storage_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        assert!(storage.set("../escape", "x").is_err());
        assert!(storage.set("", "x").is_err());
        assert!(storage.get(".hidden").is_err());
    }

    #[test]
    fn file_storage_reads_invalid_utf8_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        std::fs::write(dir.path().join("rolezinhos.favoritos.json"), [0xc3, 0x28]).unwrap();

        let content = storage.get("rolezinhos.favoritos").unwrap().unwrap();
        assert_eq!(content, "\u{FFFD}(");
    }

    #[test]
    fn memory_storage_overwrites() {
        let storage = MemoryStorage::new();
        storage.set("k", "1").unwrap();
        storage.set("k", "2").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("2"));
    }
}
