//! File-backed slot store: one JSON file per key.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{StoreError, StoreResult};
use crate::slot::SlotStore;

/// Stores each slot as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn slot_path(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(StoreError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SlotStore for FileStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), bytes = contents.len(), "read slot");
                Ok(Some(contents))
            }
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(StoreError::Io {
                operation: "read",
                path,
                source: error,
            }),
        }
    }

    /// Write to a temp file first, then rename over the slot file.
    fn write(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.slot_path(key)?;
        let temp_path = path.with_extension("json.tmp");

        fs::create_dir_all(&self.dir).map_err(|e| StoreError::Io {
            operation: "create directory",
            path: self.dir.clone(),
            source: e,
        })?;

        if let Err(error) = write_and_swap(&temp_path, &path, value) {
            if let Err(cleanup) = fs::remove_file(&temp_path)
                && cleanup.kind() != ErrorKind::NotFound
            {
                tracing::warn!(path = %temp_path.display(), error = %cleanup, "failed to remove temp file");
            }
            return Err(error);
        }

        tracing::debug!(path = %path.display(), bytes = value.len(), "wrote slot");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(StoreError::Io {
                operation: "remove",
                path,
                source: error,
            }),
        }
    }
}

/// Write `value` to `temp_path`, sync it, then rename it over `path`.
fn write_and_swap(temp_path: &Path, path: &Path, value: &str) -> StoreResult<()> {
    let mut file = File::create(temp_path).map_err(|e| StoreError::Io {
        operation: "create",
        path: temp_path.to_path_buf(),
        source: e,
    })?;

    file.write_all(value.as_bytes()).map_err(|e| StoreError::Io {
        operation: "write",
        path: temp_path.to_path_buf(),
        source: e,
    })?;

    file.sync_all().map_err(|e| StoreError::Io {
        operation: "sync",
        path: temp_path.to_path_buf(),
        source: e,
    })?;
    drop(file);

    fs::rename(temp_path, path).map_err(|e| StoreError::AtomicWriteFailed {
        temp_path: temp_path.to_path_buf(),
        target_path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_then_read() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));

        store.write("local-data", "[]").unwrap();

        assert!(dir.path().join("nested/local-data.json").exists());
        assert!(!dir.path().join("nested/local-data.json.tmp").exists());
        assert_eq!(store.read("local-data").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn failed_rename_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        // A non-empty directory where the slot file should go makes the
        // rename fail.
        let blocker = dir.path().join("local-data.json");
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep"), "x").unwrap();
        let mut store = FileStore::new(dir.path());

        let result = store.write("local-data", "[]");

        assert!(matches!(result, Err(StoreError::AtomicWriteFailed { .. })));
        assert!(!dir.path().join("local-data.json.tmp").exists());
        assert!(blocker.join("keep").exists());
    }

    #[test]
    fn missing_file_reads_none() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.read("local-data").unwrap(), None);
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path());
        store.write("slot", "x").unwrap();
        store.remove("slot").unwrap();
        store.remove("slot").unwrap();
        assert_eq!(store.read("slot").unwrap(), None);
    }

    #[test]
    fn path_like_keys_are_rejected() {
        let store = FileStore::new("/tmp");
        assert!(matches!(
            store.slot_path("../etc/passwd"),
            Err(StoreError::InvalidKey { .. })
        ));
        assert!(store.slot_path("").is_err());
        assert!(store.slot_path("local-data").is_ok());
    }
}
