//! Clementine Client - client-side commerce state manager.
//!
//! Three peer aggregates share one design: an in-memory authoritative
//! state, a persistent mirror, and mutation operations that persist
//! synchronously before returning.
//!
//! - [`cart`] - line items keyed by product id, quantity merge, decimal totals
//! - [`wishlist`] - membership-toggled set of product snapshots
//! - [`notifications`] - per-identity product alert subscriptions
//!
//! [`session`] holds the active identity and gates which persistent
//! namespace the notification aggregate reads from; [`commerce`] composes
//! everything behind one dependency-injected object. [`api`] holds the
//! HTTP clients for the catalog, auth and order collaborators.
//!
//! Aggregate operations are synchronous, single-threaded, and complete
//! (including persistence) before returning; only collaborator calls are
//! async. No aggregate failure is fatal: corrupt persisted state reloads
//! as empty, missing-entity mutations are no-ops.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod commerce;
pub mod config;
pub mod error;
pub mod notifications;
pub mod session;
pub mod store;
pub mod wishlist;

pub use cart::{Cart, LineItem};
pub use commerce::Commerce;
pub use config::{ClientConfig, ConfigError};
pub use error::ClientError;
pub use notifications::{Notifications, Subscription, SubscriptionKind};
pub use session::{Identity, Session};
pub use store::{FileStore, MemoryStore, StorageBackend, StoreError};
pub use wishlist::Wishlist;
