//! Error types for the Raindrop SDK.

/// Result type for SDK operations.
pub type RaindropResult<T> = Result<T, RaindropError>;

/// Error types that can occur when talking to the Raindrop API.
#[derive(Debug, thiserror::Error)]
pub enum RaindropError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-success status.
    #[error("Raindrop API error: {status} {status_text}")]
    Api { status: u16, status_text: String },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The access token was not provided.
    #[error("RAINDROP_ACCESS_TOKEN is not set")]
    MissingToken,

    /// Serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl RaindropError {
    /// Create an API error from a response status.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        Self::Api {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }

    /// HTTP status carried by an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the remote reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
