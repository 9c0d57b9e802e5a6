//! File-backed storage backend.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{StorageBackend, StoreError};

/// A [`StorageBackend`] that keeps one file per namespace in a data
/// directory.
///
/// Namespace keys are sanitized into file names (anything outside
/// `[A-Za-z0-9_-]` becomes `_`), so `notifications_user-1` lands in
/// `notifications_user-1.json`. A single mutex serializes all writes;
/// aggregate writes are small and infrequent enough that per-namespace
/// locking would buy nothing.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` when the directory cannot be created.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            namespace: dir.display().to_string(),
            source,
        })?;
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    /// The directory this store persists into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, namespace: &str) -> PathBuf {
        let sanitized: String = namespace
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{sanitized}.json"))
    }

    fn io_error(namespace: &str, source: std::io::Error) -> StoreError {
        StoreError::Io {
            namespace: namespace.to_owned(),
            source,
        }
    }
}

impl StorageBackend for FileStore {
    fn read(&self, namespace: &str) -> Result<Option<String>, StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match std::fs::read_to_string(self.path_for(namespace)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(namespace, e)),
        }
    }

    fn write(&self, namespace: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        // Write-then-rename so a crashed write never leaves a torn value
        // for the next read.
        let path = self.path_for(namespace);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(|e| Self::io_error(namespace, e))?;
        std::fs::rename(&tmp, &path).map_err(|e| Self::io_error(namespace, e))
    }

    fn erase(&self, namespace: &str) -> Result<(), StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match std::fs::remove_file(self.path_for(namespace)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(namespace, e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.write("cart", r#"[{"q":1}]"#).unwrap();
        assert_eq!(
            store.read("cart").unwrap().as_deref(),
            Some(r#"[{"q":1}]"#)
        );

        store.erase("cart").unwrap();
        assert_eq!(store.read("cart").unwrap(), None);
        // erasing again is a no-op
        store.erase("cart").unwrap();
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileStore::open(dir.path()).unwrap();
            store.write("user", r#"{"id":"u-1"}"#).unwrap();
        }
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(
            store.read("user").unwrap().as_deref(),
            Some(r#"{"id":"u-1"}"#)
        );
    }

    #[test]
    fn test_namespace_sanitization() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        store.write("notifications_user/../1", "[]").unwrap();
        assert!(dir.path().join("notifications_user____1.json").exists());
        assert_eq!(
            store.read("notifications_user/../1").unwrap().as_deref(),
            Some("[]")
        );
    }
}
