//! Persistent store adapter.
//!
//! Every aggregate mirrors its in-memory state into a [`StorageBackend`]
//! namespace as a JSON string. The adapter contract is deliberately small:
//!
//! - `read` of a missing namespace is `Ok(None)`, never an error
//! - after `write(ns, s)`, `read(ns)` returns `Some(s)` until the next
//!   `write` or `erase` on the same namespace
//! - writes to one namespace are serialized; last writer wins
//!
//! A stored value that fails to deserialize is logged and treated as absent
//! state by [`load_json`] - corruption never propagates to an aggregate.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors from the persistent store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failed (file store only).
    #[error("storage I/O failed for namespace `{namespace}`: {source}")]
    Io {
        namespace: String,
        #[source]
        source: std::io::Error,
    },

    /// State could not be serialized for persistence.
    #[error("failed to serialize state for namespace `{namespace}`: {source}")]
    Serialize {
        namespace: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Key-value storage for serialized aggregate state.
///
/// Implementations must serialize writes per namespace (interior locking);
/// the aggregates themselves are single-threaded but two handles to the same
/// backend must not interleave a read with a partial write.
pub trait StorageBackend: Send + Sync {
    /// Read the raw value stored under `namespace`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` when the backing medium fails. A missing
    /// namespace is `Ok(None)`.
    fn read(&self, namespace: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `namespace`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` when the backing medium fails.
    fn write(&self, namespace: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the value stored under `namespace`. Erasing a missing
    /// namespace is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` when the backing medium fails.
    fn erase(&self, namespace: &str) -> Result<(), StoreError>;
}

/// Well-known namespace keys.
///
/// These are part of the persisted-storage layout and must not change.
pub mod namespaces {
    use clementine_core::UserId;

    /// Cart line items (JSON array).
    pub const CART: &str = "cart";
    /// Wishlist product snapshots (JSON array).
    pub const WISHLIST: &str = "wishlist";
    /// Current session identity (JSON object).
    pub const USER: &str = "user";

    /// Notification subscriptions for one identity (JSON array).
    #[must_use]
    pub fn notifications(identity: &UserId) -> String {
        format!("notifications_{identity}")
    }
}

/// Load and deserialize the state stored under `namespace`.
///
/// A malformed stored value is discarded with a warning and reported as
/// absent; only I/O failures surface as errors.
///
/// # Errors
///
/// Returns `StoreError::Io` when the backing medium fails.
pub fn load_json<T: DeserializeOwned>(
    store: &dyn StorageBackend,
    namespace: &str,
) -> Result<Option<T>, StoreError> {
    let Some(raw) = store.read(namespace)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(namespace, error = %e, "discarding corrupt persisted state");
            Ok(None)
        }
    }
}

/// Serialize `value` and store it under `namespace`.
///
/// # Errors
///
/// Returns `StoreError::Serialize` when the value cannot be serialized and
/// `StoreError::Io` when the backing medium fails.
pub fn save_json<T: Serialize>(
    store: &dyn StorageBackend,
    namespace: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
        namespace: namespace.to_owned(),
        source,
    })?;
    tracing::debug!(namespace, bytes = raw.len(), "persisting state");
    store.write(namespace, &raw)
}
