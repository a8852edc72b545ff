//! Transport layer for the Raindrop SDK.

pub mod http;

pub use http::{HttpTransport, RequestOptions};
