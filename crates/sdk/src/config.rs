//! Configuration types for the Raindrop SDK.

use crate::error::{RaindropError, RaindropResult};
use std::fmt;
use url::Url;

/// Public Raindrop REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.raindrop.io/rest/v1";

/// Environment variable holding the access token.
pub const ACCESS_TOKEN_ENV: &str = "RAINDROP_ACCESS_TOKEN";

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "RAINDROP_API_BASE_URL";

/// Configuration for the Raindrop client.
///
/// Built once at startup and shared read-only with the transport.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: Url,
    /// Bearer token presented on every request.
    pub access_token: String,
}

impl ClientConfig {
    /// Create a configuration for the public API.
    pub fn new(access_token: impl Into<String>) -> RaindropResult<Self> {
        Self::with_base_url(access_token, DEFAULT_BASE_URL)
    }

    /// Create a configuration pointing at a custom base URL.
    pub fn with_base_url(access_token: impl Into<String>, base_url: &str) -> RaindropResult<Self> {
        let access_token = access_token.into();
        if access_token.trim().is_empty() {
            return Err(RaindropError::MissingToken);
        }

        let base_url = Url::parse(base_url)?;
        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return Err(RaindropError::Config(format!(
                "Unsupported base URL scheme: {}",
                base_url.scheme()
            )));
        }

        Ok(Self {
            base_url,
            access_token,
        })
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> RaindropResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> RaindropResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(ACCESS_TOKEN_ENV).ok_or(RaindropError::MissingToken)?;
        match lookup(BASE_URL_ENV).filter(|url| !url.trim().is_empty()) {
            Some(base_url) => Self::with_base_url(token, base_url.trim()),
            None => Self::new(token),
        }
    }

    /// Absolute URL for an endpoint path such as `/raindrop/1`.
    pub fn endpoint(&self, path: &str) -> RaindropResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{}/{}", base, path))?)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("access_token", &"<redacted>")
            .finish()
    }
}
