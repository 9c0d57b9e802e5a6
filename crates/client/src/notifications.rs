//! Notification subscription aggregate.
//!
//! User-scoped product alert subscriptions (back-in-stock, price-drop,
//! pre-order). Subscriptions are persisted under a key derived from the
//! bound identity; rebinding the identity swaps the entire visible set.
//! With no identity bound the aggregate holds nothing and every operation
//! is inert.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use clementine_core::{Email, NotificationType, ProductId, SubscriptionId, UserId};

use crate::store::{self, StorageBackend, StoreError, namespaces};

/// Type-specific subscription payload.
///
/// Internally tagged: the `type` discriminant on the wire selects the
/// payload schema, so a stored record looks like
/// `{"type":"priceDrop","email":"...","targetPrice":"5"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SubscriptionKind {
    /// Alert when the product is back in stock.
    BackInStock { email: Email },
    /// Alert when the price falls to or below `target_price`.
    PriceDrop { email: Email, target_price: Decimal },
    /// Alert when a pre-order product becomes available.
    PreOrder { email: Email, expected_date: String },
}

impl SubscriptionKind {
    /// The discriminant of this payload.
    #[must_use]
    pub const fn notification_type(&self) -> NotificationType {
        match self {
            Self::BackInStock { .. } => NotificationType::BackInStock,
            Self::PriceDrop { .. } => NotificationType::PriceDrop,
            Self::PreOrder { .. } => NotificationType::PreOrder,
        }
    }
}

/// A user's request to be notified about a product event.
///
/// `read` and `fulfilled` are independent flags: reading a notification in
/// the UI does not stop it counting as an active subscription, and a
/// fulfilled subscription stays listed until removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: SubscriptionId,
    pub product_id: ProductId,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub fulfilled: bool,
    #[serde(flatten)]
    pub kind: SubscriptionKind,
}

/// Notification subscriptions for the currently bound identity.
pub struct Notifications {
    subscriptions: Vec<Subscription>,
    identity: Option<UserId>,
    store: Arc<dyn StorageBackend>,
}

impl Notifications {
    /// An aggregate with no identity bound: empty and inert.
    #[must_use]
    pub fn detached(store: Arc<dyn StorageBackend>) -> Self {
        Self {
            subscriptions: Vec::new(),
            identity: None,
            store,
        }
    }

    /// Load the subscriptions persisted for `identity`.
    ///
    /// A missing or corrupt persisted value yields an empty set.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` only when the backing medium fails to read.
    pub fn for_identity(
        store: Arc<dyn StorageBackend>,
        identity: UserId,
    ) -> Result<Self, StoreError> {
        let subscriptions =
            store::load_json(store.as_ref(), &namespaces::notifications(&identity))?
                .unwrap_or_default();
        Ok(Self {
            subscriptions,
            identity: Some(identity),
            store,
        })
    }

    /// Rebind to `identity`, replacing the visible subscription set with
    /// whatever that identity has persisted (no merge across identities).
    /// Binding to `None` empties the aggregate.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the backing medium fails to read.
    pub fn bind(&mut self, identity: Option<UserId>) -> Result<(), StoreError> {
        match identity {
            Some(id) => {
                self.subscriptions =
                    store::load_json(self.store.as_ref(), &namespaces::notifications(&id))?
                        .unwrap_or_default();
                self.identity = Some(id);
            }
            None => {
                self.subscriptions.clear();
                self.identity = None;
            }
        }
        Ok(())
    }

    /// All subscriptions in insertion order.
    #[must_use]
    pub fn all(&self) -> &[Subscription] {
        &self.subscriptions
    }

    /// Create a new subscription record.
    ///
    /// Always appends: there is no write-side dedup against existing
    /// same-type same-product subscriptions; [`Self::has_active`] is the
    /// advisory query UIs use to avoid offering a duplicate. Returns `None`
    /// when no identity is bound.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when persisting the updated set fails.
    pub fn subscribe(
        &mut self,
        product_id: ProductId,
        kind: SubscriptionKind,
    ) -> Result<Option<Subscription>, StoreError> {
        if self.identity.is_none() {
            tracing::debug!("ignoring subscribe with no identity bound");
            return Ok(None);
        }

        let now = Utc::now();
        let subscription = Subscription {
            id: self.next_id(now),
            product_id,
            created_at: now,
            read: false,
            fulfilled: false,
            kind,
        };
        self.subscriptions.push(subscription.clone());
        self.persist()?;
        Ok(Some(subscription))
    }

    /// Whether any unfulfilled subscription matches `product_id` and
    /// `notification_type`. Independent of the `read` flag.
    #[must_use]
    pub fn has_active(
        &self,
        product_id: &ProductId,
        notification_type: NotificationType,
    ) -> bool {
        self.subscriptions.iter().any(|s| {
            &s.product_id == product_id
                && s.kind.notification_type() == notification_type
                && !s.fulfilled
        })
    }

    /// Mark the matching subscription as read. No-op when absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when persisting the updated set fails.
    pub fn mark_read(&mut self, id: &SubscriptionId) -> Result<(), StoreError> {
        self.set_flag(id, |s| s.read = true)
    }

    /// Mark the matching subscription as fulfilled, so it stops counting
    /// as active. No-op when absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when persisting the updated set fails.
    pub fn mark_fulfilled(&mut self, id: &SubscriptionId) -> Result<(), StoreError> {
        self.set_flag(id, |s| s.fulfilled = true)
    }

    /// Delete the matching subscription. No-op when absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when persisting the updated set fails.
    pub fn remove(&mut self, id: &SubscriptionId) -> Result<(), StoreError> {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| &s.id != id);
        if self.subscriptions.len() == before {
            return Ok(());
        }
        self.persist()
    }

    /// All subscriptions for `product_id`, insertion order.
    #[must_use]
    pub fn list_for_product(&self, product_id: &ProductId) -> Vec<&Subscription> {
        self.subscriptions
            .iter()
            .filter(|s| &s.product_id == product_id)
            .collect()
    }

    /// Number of unread subscriptions (the header badge).
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.subscriptions.iter().filter(|s| !s.read).count()
    }

    fn set_flag(
        &mut self,
        id: &SubscriptionId,
        apply: impl FnOnce(&mut Subscription),
    ) -> Result<(), StoreError> {
        let Some(subscription) = self.subscriptions.iter_mut().find(|s| &s.id == id) else {
            return Ok(());
        };
        apply(subscription);
        self.persist()
    }

    // Ids are epoch millis, bumped past the newest existing id so that two
    // subscriptions created within the same millisecond stay distinct and
    // time-ordered.
    fn next_id(&self, now: DateTime<Utc>) -> SubscriptionId {
        let mut millis = now.timestamp_millis();
        if let Some(last) = self
            .subscriptions
            .last()
            .and_then(|s| s.id.as_str().parse::<i64>().ok())
        {
            millis = millis.max(last + 1);
        }
        SubscriptionId::from_millis(millis)
    }

    fn persist(&self) -> Result<(), StoreError> {
        let Some(identity) = &self.identity else {
            return Ok(());
        };
        store::save_json(
            self.store.as_ref(),
            &namespaces::notifications(identity),
            &self.subscriptions,
        )
    }
}
