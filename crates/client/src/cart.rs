//! Cart aggregate.
//!
//! An ordered collection of line items keyed by product id. Every mutation
//! persists the full item sequence synchronously before returning, with one
//! special case: an empty cart erases its namespace instead of writing an
//! empty array, so an empty cart has no storage footprint.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use clementine_core::{CurrencyCode, Price, ProductId, ProductSnapshot};

use crate::store::{self, StorageBackend, StoreError, namespaces};

/// One product entry in a cart.
///
/// Invariant: at most one line item per product id within a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl LineItem {
    fn from_snapshot(product: &ProductSnapshot, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            image: product.image.clone(),
        }
    }

    /// Price of this line (`unit_price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// The materialized cart for the current device.
pub struct Cart {
    items: Vec<LineItem>,
    store: Arc<dyn StorageBackend>,
}

impl Cart {
    /// Load the cart from its persisted namespace.
    ///
    /// A missing or corrupt persisted value yields an empty cart.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` only when the backing medium fails to read.
    pub fn load(store: Arc<dyn StorageBackend>) -> Result<Self, StoreError> {
        let items = store::load_json(store.as_ref(), namespaces::CART)?.unwrap_or_default();
        Ok(Self { items, store })
    }

    /// Current line items in insertion order of first add.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit of `product` to the cart.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when persisting the updated cart fails.
    pub fn add(&mut self, product: &ProductSnapshot) -> Result<(), StoreError> {
        self.add_with_quantity(product, 1)
    }

    /// Add `quantity` units of `product` to the cart.
    ///
    /// If the product is already in the cart the quantities merge; the
    /// already-stored unit price is kept and the incoming snapshot's price
    /// is ignored. A quantity of zero is treated as one.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when persisting the updated cart fails.
    pub fn add_with_quantity(
        &mut self,
        product: &ProductSnapshot,
        quantity: u32,
    ) -> Result<(), StoreError> {
        let quantity = quantity.max(1);
        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
        } else {
            self.items.push(LineItem::from_snapshot(product, quantity));
        }
        self.persist()
    }

    /// Remove the line for `product_id`. No-op when absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when persisting the updated cart fails.
    pub fn remove(&mut self, product_id: &ProductId) -> Result<(), StoreError> {
        let before = self.items.len();
        self.items.retain(|i| &i.product_id != product_id);
        if self.items.len() == before {
            return Ok(());
        }
        self.persist()
    }

    /// Set the quantity for `product_id` verbatim.
    ///
    /// A quantity below one removes the line entirely. No-op when the
    /// product is not in the cart.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when persisting the updated cart fails.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<(), StoreError> {
        if quantity < 1 {
            return self.remove(product_id);
        }
        let Some(item) = self.items.iter_mut().find(|i| &i.product_id == product_id) else {
            return Ok(());
        };
        item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        self.persist()
    }

    /// Empty the cart and erase its persisted namespace.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the erase fails.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.items.clear();
        self.persist()
    }

    /// Sum of `unit_price * quantity` over all lines.
    ///
    /// The zero price (in the first line's currency, or the default
    /// currency for an empty cart) when there is nothing to sum.
    #[must_use]
    pub fn total(&self) -> Price {
        let currency = self
            .items
            .first()
            .map_or(CurrencyCode::default(), |i| i.unit_price.currency_code);
        self.items
            .iter()
            .fold(Price::zero(currency), |acc, item| acc + item.line_total())
    }

    /// Sum of quantities across all lines (not the number of lines).
    #[must_use]
    pub fn count(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |acc, item| acc.saturating_add(item.quantity))
    }

    // Empty carts erase the key rather than writing `[]`.
    fn persist(&self) -> Result<(), StoreError> {
        if self.items.is_empty() {
            self.store.erase(namespaces::CART)
        } else {
            store::save_json(self.store.as_ref(), namespaces::CART, &self.items)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::store::MemoryStore;

    fn snapshot(id: &str, cents: i64) -> ProductSnapshot {
        ProductSnapshot {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Price::from_cents(cents, CurrencyCode::USD),
            image: None,
            expected_date: None,
        }
    }

    fn cart() -> (Arc<MemoryStore>, Cart) {
        let store = Arc::new(MemoryStore::new());
        let cart = Cart::load(Arc::clone(&store) as Arc<dyn StorageBackend>).unwrap();
        (store, cart)
    }

    #[test]
    fn test_add_merges_quantities_into_one_line() {
        let (_store, mut cart) = cart();
        cart.add(&snapshot("p-1", 999)).unwrap();
        cart.add_with_quantity(&snapshot("p-1", 999), 2).unwrap();

        assert_eq!(cart.items().len(), 1);
        let item = cart.items().first().unwrap();
        assert_eq!(item.quantity, 3);
        assert_eq!(cart.total().amount, Decimal::new(2997, 2));
    }

    #[test]
    fn test_merge_keeps_stored_unit_price() {
        let (_store, mut cart) = cart();
        cart.add(&snapshot("p-1", 999)).unwrap();
        // Price changed upstream; the stored line keeps the original price.
        cart.add_with_quantity(&snapshot("p-1", 1299), 1).unwrap();

        let item = cart.items().first().unwrap();
        assert_eq!(item.unit_price, Price::from_cents(999, CurrencyCode::USD));
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_zero_quantity_add_counts_as_one() {
        let (_store, mut cart) = cart();
        cart.add_with_quantity(&snapshot("p-1", 100), 0).unwrap();
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn test_insertion_order_is_stable() {
        let (_store, mut cart) = cart();
        cart.add(&snapshot("p-1", 100)).unwrap();
        cart.add(&snapshot("p-2", 200)).unwrap();
        cart.add(&snapshot("p-1", 100)).unwrap();

        let ids: Vec<&str> = cart.items().iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, vec!["p-1", "p-2"]);
    }

    #[test]
    fn test_update_quantity_sets_verbatim() {
        let (_store, mut cart) = cart();
        cart.add_with_quantity(&snapshot("p-1", 100), 5).unwrap();
        cart.update_quantity(&ProductId::new("p-1"), 2).unwrap();
        assert_eq!(cart.items().first().unwrap().quantity, 2);
    }

    #[test]
    fn test_update_quantity_below_one_removes() {
        let (_store, mut cart) = cart();
        cart.add(&snapshot("p-1", 100)).unwrap();
        cart.update_quantity(&ProductId::new("p-1"), 0).unwrap();
        assert!(cart.is_empty());

        cart.add(&snapshot("p-1", 100)).unwrap();
        cart.update_quantity(&ProductId::new("p-1"), -5).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let (_store, mut cart) = cart();
        cart.add(&snapshot("p-1", 100)).unwrap();
        cart.remove(&ProductId::new("p-9")).unwrap();
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_total_is_linear() {
        let (_store, mut cart) = cart();
        cart.add_with_quantity(&snapshot("a", 1000), 2).unwrap();
        cart.add(&snapshot("b", 500)).unwrap();
        assert_eq!(cart.total().amount, Decimal::new(2500, 2));
        assert_eq!(cart.count(), 3);
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let (_store, cart) = cart();
        assert_eq!(cart.total().amount, Decimal::ZERO);
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_clear_erases_namespace() {
        let (store, mut cart) = cart();
        cart.add(&snapshot("p-1", 100)).unwrap();
        assert!(store.read(namespaces::CART).unwrap().is_some());

        cart.clear().unwrap();
        // Erased, not an empty-array serialization.
        assert_eq!(store.read(namespaces::CART).unwrap(), None);
    }

    #[test]
    fn test_removing_last_item_erases_namespace() {
        let (store, mut cart) = cart();
        cart.add(&snapshot("p-1", 100)).unwrap();
        cart.remove(&ProductId::new("p-1")).unwrap();
        assert_eq!(store.read(namespaces::CART).unwrap(), None);
    }

    #[test]
    fn test_roundtrip_through_fresh_aggregate() {
        let (store, mut cart) = cart();
        cart.add_with_quantity(&snapshot("p-1", 999), 3).unwrap();
        cart.add(&snapshot("p-2", 500)).unwrap();

        let reloaded = Cart::load(Arc::clone(&store) as Arc<dyn StorageBackend>).unwrap();
        assert_eq!(reloaded.items(), cart.items());
    }

    #[test]
    fn test_corrupt_persisted_cart_loads_empty() {
        let store = Arc::new(MemoryStore::new());
        store.write(namespaces::CART, "{definitely not json").unwrap();

        let cart = Cart::load(store as Arc<dyn StorageBackend>).unwrap();
        assert!(cart.is_empty());
    }
}
