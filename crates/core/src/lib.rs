//! Clementine Core - Shared types library.
//!
//! This crate provides common types used across all Clementine components:
//! - `client` - Client-side commerce state manager
//! - `cli` - Command-line tools for local store inspection and management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
