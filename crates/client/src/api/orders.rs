//! Order service client.
//!
//! Checkout submits the cart contents plus contact and delivery details to
//! the order collaborator. Payment capture is the service's concern; the
//! client only validates field presence and reports the service's verdict.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use clementine_core::{Email, OrderId, Price, UserId};

use crate::api::{ApiError, decode_envelope};
use crate::cart::LineItem;

/// A checkout field that failed validation.
///
/// Surfaced as a field-level message; the cart and session are left
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Who is receiving the order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
}

/// How the order reaches the customer.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "deliveryMethod", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DeliveryMethod {
    /// Ship to an address.
    Delivery {
        address: String,
        city: String,
        state: String,
        postal_code: String,
    },
    /// Collect from the store.
    Pickup,
}

/// The order submission payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub items: Vec<LineItem>,
    pub total: Price,
    pub contact: ContactDetails,
    #[serde(flatten)]
    pub delivery: DeliveryMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

impl OrderDraft {
    /// Check field presence before submission.
    ///
    /// # Errors
    ///
    /// Returns the first failing field. Address fields are only required
    /// for the delivery method.
    pub fn validate(&self) -> Result<(), ValidationError> {
        const fn required(
            field: &'static str,
            value: &str,
            message: &'static str,
        ) -> Result<(), ValidationError> {
            if value.is_empty() {
                return Err(ValidationError { field, message });
            }
            Ok(())
        }

        if self.items.is_empty() {
            return Err(ValidationError {
                field: "items",
                message: "cart is empty",
            });
        }
        required("firstName", &self.contact.first_name, "first name is required")?;
        required("lastName", &self.contact.last_name, "last name is required")?;

        if let DeliveryMethod::Delivery {
            address,
            city,
            state,
            postal_code,
        } = &self.delivery
        {
            required("address", address, "address is required for delivery")?;
            required("city", city, "city is required for delivery")?;
            required("state", state, "region is required for delivery")?;
            required(
                "postalCode",
                postal_code,
                "postal code is required for delivery",
            )?;
        }
        Ok(())
    }
}

/// The service's acknowledgement of a placed order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub id: OrderId,
    pub placed_at: DateTime<Utc>,
}

/// Order collaborator interface.
pub trait OrdersApi {
    /// Submit a validated order draft.
    fn submit(
        &self,
        draft: &OrderDraft,
    ) -> impl Future<Output = Result<OrderReceipt, ApiError>> + Send;
}

/// HTTP client for the order service.
#[derive(Debug, Clone)]
pub struct HttpOrdersClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpOrdersClient {
    /// Create a client against `base_url`.
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    fn endpoint(&self) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ApiError::InvalidBaseUrl(self.base_url.clone()))?;
            segments.pop_if_empty().push("orders");
        }
        Ok(url)
    }
}

impl OrdersApi for HttpOrdersClient {
    #[instrument(skip_all, fields(lines = draft.items.len()))]
    async fn submit(&self, draft: &OrderDraft) -> Result<OrderReceipt, ApiError> {
        let response = self.http.post(self.endpoint()?).json(draft).send().await?;
        decode_envelope(response).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clementine_core::{CurrencyCode, ProductId};

    use super::*;

    fn line() -> LineItem {
        LineItem {
            product_id: ProductId::new("p-1"),
            name: "Copper Wire".to_owned(),
            unit_price: Price::from_cents(999, CurrencyCode::USD),
            quantity: 1,
            image: None,
        }
    }

    fn draft(delivery: DeliveryMethod) -> OrderDraft {
        OrderDraft {
            items: vec![line()],
            total: Price::from_cents(999, CurrencyCode::USD),
            contact: ContactDetails {
                first_name: "Ada".to_owned(),
                last_name: "Lovelace".to_owned(),
                email: Email::parse("ada@example.com").unwrap(),
            },
            delivery,
            user_id: None,
        }
    }

    #[test]
    fn test_segmentless_base_url_is_an_error() {
        let client = HttpOrdersClient::new(
            reqwest::Client::new(),
            Url::parse("mailto:ops@example.com").unwrap(),
        );
        let err = client.endpoint().unwrap_err();
        assert!(matches!(err, ApiError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_pickup_needs_no_address() {
        assert!(draft(DeliveryMethod::Pickup).validate().is_ok());
    }

    #[test]
    fn test_delivery_requires_address_fields() {
        let incomplete = draft(DeliveryMethod::Delivery {
            address: "1 Main St".to_owned(),
            city: String::new(),
            state: "CA".to_owned(),
            postal_code: "94000".to_owned(),
        });
        let err = incomplete.validate().unwrap_err();
        assert_eq!(err.field, "city");
    }

    #[test]
    fn test_empty_cart_fails_validation() {
        let mut empty = draft(DeliveryMethod::Pickup);
        empty.items.clear();
        assert_eq!(empty.validate().unwrap_err().field, "items");
    }

    #[test]
    fn test_missing_name_fails_validation() {
        let mut d = draft(DeliveryMethod::Pickup);
        d.contact.first_name.clear();
        assert_eq!(d.validate().unwrap_err().field, "firstName");
    }
}
