//! HTTP collaborator clients.
//!
//! Every service the client talks to (catalog, auth, orders) responds with
//! the same JSON envelope: `{ "success": bool, "data": ..., "error"?: "..." }`.
//! The helpers here decode that envelope once so the per-service clients
//! stay thin. Collaborator failures are surfaced as-is; there is no
//! automatic retry anywhere in this module.

pub mod auth;
pub mod orders;
pub mod products;

use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors from a collaborator service call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested resource does not exist (HTTP 404).
    #[error("resource not found")]
    NotFound,

    /// The client's base URL cannot carry path segments (e.g. `mailto:`),
    /// so no endpoint can be derived from it.
    #[error("base URL cannot carry path segments: {0}")]
    InvalidBaseUrl(url::Url),

    /// Missing or insufficient credentials (HTTP 401/403, or rejected
    /// client-side before the request was sent).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The service answered but reported failure in the envelope.
    #[error("service error: {0}")]
    Service(String),

    /// The service answered with an unexpected HTTP status.
    #[error("unexpected status {0}")]
    Status(StatusCode),

    /// The request never completed or the body could not be decoded.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// The common `{ success, data, error? }` response envelope.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub(crate) struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Decode a collaborator response into its envelope payload.
pub(crate) async fn decode_envelope<T: DeserializeOwned>(
    response: Response,
) -> Result<T, ApiError> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound);
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        let message = envelope_error(response).await;
        return Err(ApiError::Unauthorized(message));
    }
    if !status.is_success() {
        return Err(ApiError::Status(status));
    }

    let envelope: Envelope<T> = response.json().await?;
    if !envelope.success {
        return Err(ApiError::Service(
            envelope
                .error
                .unwrap_or_else(|| "unspecified service error".to_owned()),
        ));
    }
    envelope
        .data
        .ok_or_else(|| ApiError::Service("successful response carried no data".to_owned()))
}

/// Decode a collaborator response that carries no payload of interest.
pub(crate) async fn decode_ack(response: Response) -> Result<(), ApiError> {
    decode_envelope::<serde_json::Value>(response).await.map(|_| ())
}

async fn envelope_error(response: Response) -> String {
    response
        .json::<Envelope<serde_json::Value>>()
        .await
        .ok()
        .and_then(|e| e.error)
        .unwrap_or_else(|| "credentials rejected".to_owned())
}
