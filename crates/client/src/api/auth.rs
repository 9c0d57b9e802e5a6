//! Authentication service client.
//!
//! Login, registration, and password-reset requests are real asynchronous
//! calls to the auth collaborator; the client owns none of the credential
//! verification. What the session layer relies on is only the shape of the
//! exchange: a successful login or registration yields an [`Identity`]
//! (with a bearer token minted by the service) which the caller then
//! establishes in the session.

use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use clementine_core::{Email, EmailError};

use crate::api::{ApiError, decode_ack, decode_envelope};
use crate::session::Identity;

/// Errors from authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The email/password pair was rejected by the service.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account with this email already exists.
    #[error("an account with this email already exists")]
    UserAlreadyExists,

    /// The supplied email does not parse.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The supplied password is empty.
    #[error("password cannot be empty")]
    EmptyPassword,

    /// The auth service call itself failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Profile submitted when registering a new account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationProfile {
    pub name: String,
    pub email: Email,
    pub password: String,
}

/// Authentication collaborator interface.
///
/// The HTTP implementation is [`HttpAuthClient`]; tests substitute a local
/// double so session flows can be exercised without a network.
pub trait AuthApi {
    /// Exchange credentials for an identity.
    fn login(
        &self,
        email: &Email,
        password: &str,
    ) -> impl Future<Output = Result<Identity, AuthError>> + Send;

    /// Create an account and return its identity. New accounts always get
    /// the `user` role; roles are assigned server-side.
    fn register(
        &self,
        profile: &RegistrationProfile,
    ) -> impl Future<Output = Result<Identity, AuthError>> + Send;

    /// Ask the service to send a password-reset email.
    fn forgot_password(&self, email: &Email) -> impl Future<Output = Result<(), AuthError>> + Send;
}

/// HTTP client for the auth service.
#[derive(Debug, Clone)]
pub struct HttpAuthClient {
    http: reqwest::Client,
    base_url: Url,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a Email,
    password: &'a str,
}

#[derive(Serialize)]
struct ForgotPasswordRequest<'a> {
    email: &'a Email,
}

impl HttpAuthClient {
    /// Create a client against `base_url`.
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    fn endpoint(&self, action: &str) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ApiError::InvalidBaseUrl(self.base_url.clone()))?;
            segments.pop_if_empty().push("auth").push(action);
        }
        Ok(url)
    }
}

impl AuthApi for HttpAuthClient {
    #[instrument(skip_all, fields(email = %email))]
    async fn login(&self, email: &Email, password: &str) -> Result<Identity, AuthError> {
        if password.is_empty() {
            return Err(AuthError::EmptyPassword);
        }

        let response = self
            .http
            .post(self.endpoint("login")?)
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(ApiError::from)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(decode_envelope(response).await?)
    }

    #[instrument(skip_all, fields(email = %profile.email))]
    async fn register(&self, profile: &RegistrationProfile) -> Result<Identity, AuthError> {
        if profile.password.is_empty() {
            return Err(AuthError::EmptyPassword);
        }

        let response = self
            .http
            .post(self.endpoint("register")?)
            .json(profile)
            .send()
            .await
            .map_err(ApiError::from)?;

        if response.status() == StatusCode::CONFLICT {
            return Err(AuthError::UserAlreadyExists);
        }
        Ok(decode_envelope(response).await?)
    }

    #[instrument(skip_all, fields(email = %email))]
    async fn forgot_password(&self, email: &Email) -> Result<(), AuthError> {
        let response = self
            .http
            .post(self.endpoint("forgot-password")?)
            .json(&ForgotPasswordRequest { email })
            .send()
            .await
            .map_err(ApiError::from)?;
        Ok(decode_ack(response).await?)
    }
}
