//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod session;
pub mod wishlist;

use std::sync::Arc;

use clementine_client::api::auth::HttpAuthClient;
use clementine_client::api::products::ProductsClient;
use clementine_client::{ClientConfig, Commerce, FileStore, StorageBackend};

/// Everything a command needs: the commerce state over the file store plus
/// the collaborator clients.
pub struct Context {
    pub config: ClientConfig,
    pub store: Arc<dyn StorageBackend>,
}

impl Context {
    /// Build the context from environment configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when configuration is missing/invalid or the data
    /// directory cannot be opened.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = ClientConfig::from_env()?;
        let store: Arc<dyn StorageBackend> = Arc::new(FileStore::open(&config.data_dir)?);
        Ok(Self { config, store })
    }

    /// Open the commerce facade over the shared store.
    ///
    /// # Errors
    ///
    /// Returns an error when the store fails to read.
    pub fn commerce(&self) -> Result<Commerce, Box<dyn std::error::Error>> {
        Ok(Commerce::open(Arc::clone(&self.store))?)
    }

    #[must_use]
    pub fn products(&self) -> ProductsClient {
        ProductsClient::new(reqwest::Client::new(), self.config.api_url.clone())
    }

    #[must_use]
    pub fn auth(&self) -> HttpAuthClient {
        HttpAuthClient::new(reqwest::Client::new(), self.config.api_url.clone())
    }
}
