//! Session context.
//!
//! Holds the single active authenticated identity and mirrors it into the
//! `user` namespace. Credential verification itself belongs to the auth
//! collaborator ([`crate::api::auth::AuthApi`]); this module only owns the
//! state-shape contract: identity fields, persistence on change, and one
//! active identity at a time.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use clementine_core::{Email, Role, UserId};

use crate::store::{self, StorageBackend, StoreError, namespaces};

/// The authenticated user's session-relevant attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    pub role: Role,
    /// Opaque bearer credential issued by the auth service.
    pub token: String,
}

/// The current session.
pub struct Session {
    current: Option<Identity>,
    store: Arc<dyn StorageBackend>,
}

impl Session {
    /// Load any persisted identity from the `user` namespace.
    ///
    /// A missing or corrupt persisted identity yields a logged-out session.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` only when the backing medium fails to read.
    pub fn load(store: Arc<dyn StorageBackend>) -> Result<Self, StoreError> {
        let current = store::load_json(store.as_ref(), namespaces::USER)?;
        Ok(Self { current, store })
    }

    /// The active identity, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    /// Whether the active identity has the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.current.as_ref().is_some_and(|i| i.role.is_admin())
    }

    /// Make `identity` the active identity, replacing any previous one,
    /// and persist it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when persisting the identity fails.
    pub fn establish(&mut self, identity: Identity) -> Result<(), StoreError> {
        store::save_json(self.store.as_ref(), namespaces::USER, &identity)?;
        tracing::debug!(user = %identity.id, role = %identity.role, "session established");
        self.current = Some(identity);
        Ok(())
    }

    /// Drop the active identity and erase its persisted mirror.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the erase fails.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.erase(namespaces::USER)?;
        self.current = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn identity(id: &str, role: Role) -> Identity {
        Identity {
            id: UserId::new(id),
            email: Email::parse("shopper@example.com").unwrap(),
            name: "Test Shopper".to_owned(),
            role,
            token: "token-1".to_owned(),
        }
    }

    #[test]
    fn test_establish_persists_and_replaces() {
        let store = Arc::new(MemoryStore::new());
        let mut session = Session::load(Arc::clone(&store) as _).unwrap();
        assert!(session.current().is_none());

        session.establish(identity("u-1", Role::User)).unwrap();
        session.establish(identity("u-2", Role::Admin)).unwrap();

        // Single active identity: the persisted record is the latest one.
        assert_eq!(session.current().unwrap().id, UserId::new("u-2"));
        assert!(session.is_admin());

        let reloaded = Session::load(store as _).unwrap();
        assert_eq!(reloaded.current().unwrap().id, UserId::new("u-2"));
    }

    #[test]
    fn test_clear_erases_persisted_identity() {
        let store = Arc::new(MemoryStore::new());
        let mut session = Session::load(Arc::clone(&store) as _).unwrap();
        session.establish(identity("u-1", Role::User)).unwrap();

        session.clear().unwrap();
        assert!(session.current().is_none());
        assert!(store.read(namespaces::USER).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_persisted_identity_loads_logged_out() {
        let store = Arc::new(MemoryStore::new());
        store.write(namespaces::USER, "{\"id\": 5, nope").unwrap();

        let session = Session::load(store as _).unwrap();
        assert!(session.current().is_none());
    }

    #[test]
    fn test_identity_wire_shape() {
        let json = serde_json::to_value(identity("u-1", Role::Admin)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "u-1",
                "email": "shopper@example.com",
                "name": "Test Shopper",
                "role": "admin",
                "token": "token-1",
            })
        );
    }
}
