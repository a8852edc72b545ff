//! HTTP transport layer for the Raindrop SDK.

use crate::config::ClientConfig;
use crate::error::{RaindropError, RaindropResult};
use reqwest::{header, Client, Method};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Options for a single request: method, query, body and extra headers.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub headers: header::HeaderMap,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            query: Vec::new(),
            body: None,
            headers: header::HeaderMap::new(),
        }
    }
}

impl RequestOptions {
    pub fn method(method: Method) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize>(mut self, body: &B) -> RaindropResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Append query pairs.
    pub fn query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn header(mut self, name: header::HeaderName, value: header::HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// HTTP transport for making API requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
    authorization: header::HeaderValue,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> RaindropResult<Self> {
        let mut authorization =
            header::HeaderValue::from_str(&format!("Bearer {}", config.access_token))
                .map_err(|_| RaindropError::Config("Invalid access token format".to_string()))?;
        authorization.set_sensitive(true);

        let client = Client::builder()
            .user_agent(concat!("raindrop-sdk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config,
            authorization,
        })
    }

    /// Build a URL for the given path.
    fn build_url(&self, path: &str) -> RaindropResult<url::Url> {
        self.config.endpoint(path)
    }

    /// Caller headers merged with the fixed authorization and content type.
    ///
    /// The fixed headers always win over caller-supplied values.
    fn merged_headers(&self, extra: header::HeaderMap) -> header::HeaderMap {
        let mut headers = extra;
        headers.insert(header::AUTHORIZATION, self.authorization.clone());
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers
    }

    /// Issue a request and parse the JSON body of a successful response.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> RaindropResult<T> {
        let url = self.build_url(path)?;
        debug!(method = %options.method, url = %url, "Raindrop request");

        let mut request = self
            .client
            .request(options.method, url)
            .headers(self.merged_headers(options.headers));

        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(body) = options.body {
            request = request.body(serde_json::to_vec(&body)?);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), path = path, "Raindrop request failed");
            return Err(RaindropError::from_status(status));
        }

        Ok(response.json().await?)
    }

    /// Execute a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> RaindropResult<T> {
        self.fetch(path, RequestOptions::default()).await
    }

    /// Execute a GET request with query parameters.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> RaindropResult<T> {
        self.fetch(path, RequestOptions::default().query(query))
            .await
    }

    /// Execute a POST request.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> RaindropResult<T> {
        self.fetch(path, RequestOptions::method(Method::POST).json(body)?)
            .await
    }

    /// Execute a PUT request.
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> RaindropResult<T> {
        self.fetch(path, RequestOptions::method(Method::PUT).json(body)?)
            .await
    }

    /// Execute a DELETE request.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> RaindropResult<T> {
        self.fetch(path, RequestOptions::method(Method::DELETE)).await
    }
}
