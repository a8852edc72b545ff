//! # Raindrop SDK
//!
//! Rust client for the [Raindrop.io](https://raindrop.io) bookmark REST API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use raindrop_sdk::{api::ListQuery, collections, RaindropClient, RaindropResult};
//!
//! #[tokio::main]
//! async fn main() -> RaindropResult<()> {
//!     // Build client
//!     let client = RaindropClient::builder()
//!         .access_token("your-access-token")
//!         .build()?;
//!
//!     // First page of unsorted bookmarks
//!     let page = client
//!         .raindrops()
//!         .list(collections::UNSORTED, &ListQuery::new().per_page(25))
//!         .await?;
//!     println!("{} bookmarks", page.count);
//!
//!     Ok(())
//! }
//! ```
//!
//! Every request carries `Authorization: Bearer <token>` and
//! `Content-Type: application/json`. Non-success statuses surface as
//! [`RaindropError::Api`]; nothing is retried.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

// Re-export main client
pub use client::{RaindropClient, RaindropClientBuilder};
pub use config::{ClientConfig, ACCESS_TOKEN_ENV, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::{RaindropError, RaindropResult};

// Collection sentinels live with the collections API
pub use api::collections;
