//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CLEMENTINE_API_URL` - Base URL of the commerce API (catalog, auth, orders)
//!
//! ## Optional
//! - `CLEMENTINE_DATA_DIR` - Directory for the file-backed store
//!   (default: `.clementine` in the working directory)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_DATA_DIR: &str = ".clementine";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Commerce client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL the collaborator clients are constructed against.
    pub api_url: Url,
    /// Directory the file-backed store persists into.
    pub data_dir: PathBuf,
}

impl ClientConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a required variable is missing or a
    /// value does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = required("CLEMENTINE_API_URL")?;
        let api_url = Url::parse(&api_url).map_err(|e| {
            ConfigError::InvalidEnvVar("CLEMENTINE_API_URL".to_owned(), e.to_string())
        })?;
        if api_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidEnvVar(
                "CLEMENTINE_API_URL".to_owned(),
                "URL must be an http(s) base".to_owned(),
            ));
        }

        let data_dir = std::env::var("CLEMENTINE_DATA_DIR")
            .map_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        Ok(Self { api_url, data_dir })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_owned()))
}
