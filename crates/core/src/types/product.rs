//! Product catalog types.

use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::price::Price;

/// A full product record as served by the catalog service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub stock: u32,
    /// Expected availability for pre-order products.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_date: Option<String>,
}

impl Product {
    /// Whether the product can currently be added to a cart.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// The slice of a product that client aggregates persist.
///
/// Wishlist entries and cart lines hold a snapshot rather than a reference:
/// the catalog is an external collaborator and a dangling product id is
/// tolerated, so the snapshot carries enough to render without a fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_date: Option<String>,
}

impl From<&Product> for ProductSnapshot {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.images.first().cloned(),
            expected_date: product.expected_date.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::price::CurrencyCode;

    fn product() -> Product {
        Product {
            id: ProductId::new("p-1"),
            name: "Copper Wire 10m".to_owned(),
            price: Price::new(Decimal::new(1250, 2), CurrencyCode::USD),
            description: "10 meter spool of insulated copper wire".to_owned(),
            images: vec!["https://cdn.example/p-1.jpg".to_owned()],
            category: "Cables & Wires".to_owned(),
            stock: 3,
            expected_date: None,
        }
    }

    #[test]
    fn test_snapshot_takes_first_image() {
        let snapshot = ProductSnapshot::from(&product());
        assert_eq!(snapshot.id, ProductId::new("p-1"));
        assert_eq!(snapshot.image.as_deref(), Some("https://cdn.example/p-1.jpg"));
    }

    #[test]
    fn test_in_stock() {
        let mut p = product();
        assert!(p.in_stock());
        p.stock = 0;
        assert!(!p.in_stock());
    }

    #[test]
    fn test_snapshot_wire_shape() {
        let snapshot = ProductSnapshot {
            id: ProductId::new("p-2"),
            name: "LED Bulb".to_owned(),
            price: Price::from_cents(499, CurrencyCode::USD),
            image: None,
            expected_date: None,
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "p-2",
                "name": "LED Bulb",
                "price": { "amount": "4.99", "currencyCode": "USD" },
            })
        );
    }
}
