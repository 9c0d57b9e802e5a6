//! Commerce facade.
//!
//! One explicitly-constructed object wiring the session, cart, wishlist and
//! notification aggregates to a shared storage backend. Consumers receive
//! this by dependency injection instead of reaching for ambient context;
//! identity changes flow through here so the notification namespace always
//! follows the active identity.

use std::sync::Arc;

use clementine_core::Email;

use crate::api::auth::{AuthApi, AuthError, RegistrationProfile};
use crate::api::orders::{ContactDetails, DeliveryMethod, OrderDraft, OrderReceipt, OrdersApi};
use crate::cart::Cart;
use crate::error::ClientError;
use crate::notifications::Notifications;
use crate::session::{Identity, Session};
use crate::store::{StorageBackend, StoreError};
use crate::wishlist::Wishlist;

/// The client-side commerce state for one device.
pub struct Commerce {
    session: Session,
    cart: Cart,
    wishlist: Wishlist,
    notifications: Notifications,
}

impl Commerce {
    /// Load all aggregates from `store`.
    ///
    /// The persisted identity (if any) is restored first and the
    /// notification aggregate is bound to it; cart and wishlist load from
    /// their fixed namespaces regardless of identity.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the backing medium fails to read.
    pub fn open(store: Arc<dyn StorageBackend>) -> Result<Self, StoreError> {
        let session = Session::load(Arc::clone(&store))?;
        let notifications = match session.current() {
            Some(identity) => {
                Notifications::for_identity(Arc::clone(&store), identity.id.clone())?
            }
            None => Notifications::detached(Arc::clone(&store)),
        };
        Ok(Self {
            session,
            cart: Cart::load(Arc::clone(&store))?,
            wishlist: Wishlist::load(store)?,
            notifications,
        })
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    #[must_use]
    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    pub fn wishlist_mut(&mut self) -> &mut Wishlist {
        &mut self.wishlist
    }

    #[must_use]
    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Log in against the auth collaborator and establish the identity.
    ///
    /// On success the notification aggregate is rebound to the new
    /// identity's namespace.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Auth` when the service rejects the
    /// credentials, `ClientError::Store` when persisting the identity
    /// fails. State is unchanged on failure.
    pub async fn login(
        &mut self,
        auth: &impl AuthApi,
        email: &str,
        password: &str,
    ) -> Result<Identity, ClientError> {
        let email = Email::parse(email).map_err(AuthError::InvalidEmail)?;
        let identity = auth.login(&email, password).await?;
        self.establish(identity)
    }

    /// Register a new account and establish its identity.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Auth` when registration fails,
    /// `ClientError::Store` when persisting the identity fails.
    pub async fn register(
        &mut self,
        auth: &impl AuthApi,
        profile: RegistrationProfile,
    ) -> Result<Identity, ClientError> {
        let identity = auth.register(&profile).await?;
        self.establish(identity)
    }

    /// Ask the auth collaborator to send a password-reset email.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Auth` when the service call fails.
    pub async fn forgot_password(
        &self,
        auth: &impl AuthApi,
        email: &str,
    ) -> Result<(), ClientError> {
        let email = Email::parse(email).map_err(AuthError::InvalidEmail)?;
        auth.forgot_password(&email).await?;
        Ok(())
    }

    /// Drop the active identity: erase its persisted mirror and detach the
    /// notification aggregate. Navigation is the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` when the erase fails.
    pub fn logout(&mut self) -> Result<(), StoreError> {
        self.session.clear()?;
        self.notifications.bind(None)
    }

    /// Submit the cart as an order and clear it on success.
    ///
    /// The draft is validated first; a validation failure leaves the cart
    /// untouched, as does any collaborator failure.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` for a missing required field,
    /// `ClientError::Api` when the order service rejects or fails, and
    /// `ClientError::Store` when clearing the cart afterwards fails.
    pub async fn place_order(
        &mut self,
        orders: &impl OrdersApi,
        contact: ContactDetails,
        delivery: DeliveryMethod,
    ) -> Result<OrderReceipt, ClientError> {
        let draft = OrderDraft {
            items: self.cart.items().to_vec(),
            total: self.cart.total(),
            contact,
            delivery,
            user_id: self.session.current().map(|i| i.id.clone()),
        };
        draft.validate()?;

        let receipt = orders.submit(&draft).await?;
        self.cart.clear()?;
        Ok(receipt)
    }

    fn establish(&mut self, identity: Identity) -> Result<Identity, ClientError> {
        self.session.establish(identity.clone())?;
        self.notifications.bind(Some(identity.id.clone()))?;
        Ok(identity)
    }
}
