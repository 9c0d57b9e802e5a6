//! Product catalog client.
//!
//! Consumes the catalog service's plain CRUD interface. Reads are public;
//! create/update/delete are admin-gated: the caller's identity must carry
//! the admin role and its bearer token is attached to the request. A
//! non-admin identity is rejected client-side so a misconfigured UI can
//! never silently mutate the catalog.

use reqwest::RequestBuilder;
use serde::Serialize;
use tracing::instrument;
use url::Url;

use clementine_core::{Price, Product, ProductId};

use crate::api::{ApiError, decode_ack, decode_envelope};
use crate::session::Identity;

/// Fields accepted by the catalog service on create/update.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub price: Price,
    pub description: String,
    pub images: Vec<String>,
    pub category: String,
    pub stock: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_date: Option<String>,
}

/// HTTP client for the product catalog service.
#[derive(Debug, Clone)]
pub struct ProductsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ProductsClient {
    /// Create a client against `base_url` (e.g. `https://api.example/`).
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Fetch the full product list.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request fails or the service reports an
    /// error.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.http.get(self.endpoint(None)?).send().await?;
        decode_envelope(response).await
    }

    /// Fetch one product by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` for an unknown id, other `ApiError`
    /// variants for transport or service failures.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &ProductId) -> Result<Product, ApiError> {
        let response = self.http.get(self.endpoint(Some(id))?).send().await?;
        decode_envelope(response).await
    }

    /// Create a product (admin only).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` when `identity` lacks the admin
    /// role, other `ApiError` variants for transport or service failures.
    #[instrument(skip(self, identity, draft), fields(user = %identity.id))]
    pub async fn create(
        &self,
        identity: &Identity,
        draft: &ProductDraft,
    ) -> Result<Product, ApiError> {
        let request = self.http.post(self.endpoint(None)?).json(draft);
        let response = Self::authorize(request, identity)?.send().await?;
        decode_envelope(response).await
    }

    /// Update a product (admin only).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` when `identity` lacks the admin
    /// role, `ApiError::NotFound` for an unknown id, other `ApiError`
    /// variants for transport or service failures.
    #[instrument(skip(self, identity, draft), fields(user = %identity.id))]
    pub async fn update(
        &self,
        identity: &Identity,
        id: &ProductId,
        draft: &ProductDraft,
    ) -> Result<Product, ApiError> {
        let request = self.http.put(self.endpoint(Some(id))?).json(draft);
        let response = Self::authorize(request, identity)?.send().await?;
        decode_envelope(response).await
    }

    /// Delete a product (admin only).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` when `identity` lacks the admin
    /// role, `ApiError::NotFound` for an unknown id, other `ApiError`
    /// variants for transport or service failures.
    #[instrument(skip(self, identity), fields(user = %identity.id))]
    pub async fn delete(&self, identity: &Identity, id: &ProductId) -> Result<(), ApiError> {
        let request = self.http.delete(self.endpoint(Some(id))?);
        let response = Self::authorize(request, identity)?.send().await?;
        decode_ack(response).await
    }

    fn authorize(
        request: RequestBuilder,
        identity: &Identity,
    ) -> Result<RequestBuilder, ApiError> {
        if !identity.role.is_admin() {
            return Err(ApiError::Unauthorized(
                "admin role required for catalog mutations".to_owned(),
            ));
        }
        Ok(request.bearer_auth(&identity.token))
    }

    fn endpoint(&self, id: Option<&ProductId>) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ApiError::InvalidBaseUrl(self.base_url.clone()))?;
            segments.pop_if_empty().push("products");
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }
}
