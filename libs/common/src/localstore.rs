//! File-backed local key-value store
//!
//! This module provides the persistence primitive behind the share-link
//! store's local backend: one JSON blob per key, stored as a file in a
//! configured data directory. Reads and writes are synchronous and never
//! suspend; higher layers that read-modify-write a blob are responsible
//! for holding their own lock around the cycle.

use crate::error::{StoreError, StoreResult};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// File-backed string store keyed by name
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Open a local store rooted at `dir`, creating the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        info!("Local store opened at {}", dir.display());
        Ok(Self { dir })
    }

    /// Get the value stored under `key`, or `None` if it was never written
    pub fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set the value stored under `key`, replacing any previous value
    pub fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        fs::write(&path, value)?;
        Ok(())
    }

    /// Map a key to its backing file, rejecting names that could escape the
    /// store directory
    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(StoreError::Backend(format!("invalid store key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path()).unwrap();

        assert_eq!(store.get("shares").unwrap(), None);
    }

    #[test]
    fn test_set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path()).unwrap();

        store.set("shares", r#"{"a":1}"#).unwrap();
        assert_eq!(store.get("shares").unwrap().as_deref(), Some(r#"{"a":1}"#));

        store.set("shares", r#"{"b":2}"#).unwrap();
        assert_eq!(store.get("shares").unwrap().as_deref(), Some(r#"{"b":2}"#));
    }

    #[test]
    fn test_path_traversal_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path()).unwrap();

        assert!(store.get("../etc/passwd").is_err());
        assert!(store.set("", "x").is_err());
    }
}
