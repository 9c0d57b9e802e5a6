//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{StorageBackend, StoreError};

/// A process-local [`StorageBackend`] backed by a `HashMap`.
///
/// Used for tests and for ephemeral sessions that should leave no footprint
/// on disk. The mutex serializes writes so that two handles to the same
/// store cannot interleave a read with a partial write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned lock means another handle panicked mid-write; the map
        // itself is still a valid snapshot, so keep serving it.
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl StorageBackend for MemoryStore {
    fn read(&self, namespace: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries().get(namespace).cloned())
    }

    fn write(&self, namespace: &str, value: &str) -> Result<(), StoreError> {
        self.entries()
            .insert(namespace.to_owned(), value.to_owned());
        Ok(())
    }

    fn erase(&self, namespace: &str) -> Result<(), StoreError> {
        self.entries().remove(namespace);
        Ok(())
    }
}
