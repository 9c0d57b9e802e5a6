//! Wishlist aggregate.
//!
//! A set of product snapshots keyed by product id, insertion-ordered.
//! Unlike the cart, the wishlist writes its full snapshot after every
//! mutation including the empty one, and it is not namespaced by identity;
//! both are deliberate behavioral-compatibility choices (see DESIGN.md).

use std::sync::Arc;

use clementine_core::{ProductId, ProductSnapshot};

use crate::store::{self, StorageBackend, StoreError, namespaces};

/// The wishlist for the current device.
pub struct Wishlist {
    entries: Vec<ProductSnapshot>,
    store: Arc<dyn StorageBackend>,
}

impl Wishlist {
    /// Load the wishlist from its persisted namespace.
    ///
    /// A missing or corrupt persisted value yields an empty wishlist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` only when the backing medium fails to read.
    pub fn load(store: Arc<dyn StorageBackend>) -> Result<Self, StoreError> {
        let entries = store::load_json(store.as_ref(), namespaces::WISHLIST)?.unwrap_or_default();
        Ok(Self { entries, store })
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[ProductSnapshot] {
        &self.entries
    }

    /// Number of wishlisted products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `product_id` is wishlisted.
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.entries.iter().any(|e| &e.id == product_id)
    }

    /// Add `product` to the wishlist.
    ///
    /// Returns `false` and leaves the wishlist unchanged when the product
    /// is already a member.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when persisting the updated wishlist fails.
    pub fn add(&mut self, product: &ProductSnapshot) -> Result<bool, StoreError> {
        if self.contains(&product.id) {
            return Ok(false);
        }
        self.entries.push(product.clone());
        self.persist()?;
        Ok(true)
    }

    /// Remove `product_id` from the wishlist. No-op when absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when persisting the updated wishlist fails.
    pub fn remove(&mut self, product_id: &ProductId) -> Result<(), StoreError> {
        let before = self.entries.len();
        self.entries.retain(|e| &e.id != product_id);
        if self.entries.len() == before {
            return Ok(());
        }
        self.persist()
    }

    /// Flip membership of `product` and return the resulting membership
    /// state: `true` when the product was added, `false` when removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when persisting the updated wishlist fails.
    pub fn toggle(&mut self, product: &ProductSnapshot) -> Result<bool, StoreError> {
        if self.contains(&product.id) {
            self.remove(&product.id)?;
            Ok(false)
        } else {
            self.add(product)
        }
    }

    /// Remove every entry.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when persisting the empty wishlist fails.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        self.persist()
    }

    fn persist(&self) -> Result<(), StoreError> {
        store::save_json(self.store.as_ref(), namespaces::WISHLIST, &self.entries)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clementine_core::{CurrencyCode, Price};

    use super::*;
    use crate::store::MemoryStore;

    fn snapshot(id: &str) -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::from_cents(100, CurrencyCode::USD),
            image: None,
            expected_date: None,
        }
    }

    fn wishlist() -> (Arc<MemoryStore>, Wishlist) {
        let store = Arc::new(MemoryStore::new());
        let wishlist = Wishlist::load(Arc::clone(&store) as Arc<dyn StorageBackend>).unwrap();
        (store, wishlist)
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let (_store, mut wishlist) = wishlist();
        assert!(wishlist.add(&snapshot("p-1")).unwrap());
        assert!(!wishlist.add(&snapshot("p-1")).unwrap());
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let (_store, mut wishlist) = wishlist();
        let product = snapshot("p-1");

        assert!(wishlist.toggle(&product).unwrap());
        assert!(wishlist.contains(&product.id));

        assert!(!wishlist.toggle(&product).unwrap());
        assert!(!wishlist.contains(&product.id));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let (_store, mut wishlist) = wishlist();
        wishlist.add(&snapshot("p-1")).unwrap();
        wishlist.remove(&ProductId::new("p-9")).unwrap();
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn test_empty_wishlist_still_writes_snapshot() {
        let (store, mut wishlist) = wishlist();
        wishlist.add(&snapshot("p-1")).unwrap();
        wishlist.clear().unwrap();
        // Unlike the cart, an emptied wishlist persists `[]`.
        assert_eq!(
            store.read(namespaces::WISHLIST).unwrap().as_deref(),
            Some("[]")
        );
    }

    #[test]
    fn test_roundtrip_through_fresh_aggregate() {
        let (store, mut wishlist) = wishlist();
        wishlist.add(&snapshot("p-1")).unwrap();
        wishlist.add(&snapshot("p-2")).unwrap();

        let reloaded = Wishlist::load(store as Arc<dyn StorageBackend>).unwrap();
        assert_eq!(reloaded.entries(), wishlist.entries());
    }
}
