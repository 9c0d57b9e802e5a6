//! Unified error type for the commerce client.
//!
//! Per-service errors stay typed ([`StoreError`], [`ApiError`],
//! [`AuthError`], [`ValidationError`]); `ClientError` aggregates them for
//! callers that drive whole flows through [`crate::commerce::Commerce`].
//! Nothing here is fatal: the worst-case outcome of any failure is an
//! unchanged or reset-to-empty aggregate state.

use thiserror::Error;

use crate::api::ApiError;
use crate::api::auth::AuthError;
use crate::api::orders::ValidationError;
use crate::store::StoreError;

/// Application-level error type for the commerce client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Persistent store operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Collaborator service call failed.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// Authentication operation failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// A checkout field failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type alias for `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;
