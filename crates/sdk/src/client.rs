//! Main client for the Raindrop SDK.

use crate::api::*;
use crate::config::{ClientConfig, DEFAULT_BASE_URL};
use crate::error::{RaindropError, RaindropResult};
use crate::transport::HttpTransport;
use std::sync::Arc;

/// Main client for interacting with the Raindrop API.
///
/// Cloning is cheap; clones share the configuration and connection pool.
#[derive(Debug, Clone)]
pub struct RaindropClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl RaindropClient {
    /// Create a new client builder.
    pub fn builder() -> RaindropClientBuilder {
        RaindropClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> RaindropResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    /// Create a client configured from the process environment.
    pub fn from_env() -> RaindropResult<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the underlying HTTP transport.
    pub fn http(&self) -> &HttpTransport {
        &self.http
    }

    /// Get the raindrops (bookmarks) API.
    pub fn raindrops(&self) -> RaindropsApi<'_> {
        RaindropsApi::new(self)
    }

    /// Get the collections API.
    pub fn collections(&self) -> CollectionsApi<'_> {
        CollectionsApi::new(self)
    }
}

/// Builder for creating a RaindropClient.
pub struct RaindropClientBuilder {
    base_url: Option<String>,
    access_token: Option<String>,
}

impl RaindropClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            access_token: None,
        }
    }

    /// Set the base URL of the API. Defaults to the public endpoint.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the access token.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> RaindropResult<RaindropClient> {
        let access_token = self.access_token.ok_or(RaindropError::MissingToken)?;
        let base_url = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);

        let config = ClientConfig::with_base_url(access_token, base_url)?;
        RaindropClient::from_config(config)
    }
}

impl Default for RaindropClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
