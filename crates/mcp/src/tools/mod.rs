pub mod bookmarks;
pub mod collections;
mod registry;

pub use bookmarks::{
    CreateBookmarkTool, DeleteBookmarkTool, GetBookmarkTool, GetBookmarksTool,
    SearchBookmarksTool, UpdateBookmarkTool,
};
pub use collections::CreateCollectionTool;
pub use registry::{
    json_schema_array, json_schema_boolean, json_schema_count, json_schema_enum,
    json_schema_integer, json_schema_object, json_schema_string, Tool, ToolRegistry, ToolTier,
};

use crate::protocol::CallToolResult;
use crate::sanitize::to_pretty_json;
use anyhow::{Context, Result};
use raindrop_sdk::{ClientConfig, RaindropClient};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;

/// Every Raindrop tool, in the order they are listed to the host.
pub fn raindrop_tools(client: &RaindropClient) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(GetBookmarksTool::new(client.clone())),
        Arc::new(GetBookmarkTool::new(client.clone())),
        Arc::new(CreateBookmarkTool::new(client.clone())),
        Arc::new(UpdateBookmarkTool::new(client.clone())),
        Arc::new(DeleteBookmarkTool::new(client.clone())),
        Arc::new(CreateCollectionTool::new(client.clone())),
        Arc::new(SearchBookmarksTool::new(client.clone())),
    ]
}

/// Registry holding every Raindrop tool.
pub fn build_registry(client: &RaindropClient) -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    for tool in raindrop_tools(client) {
        registry.register(tool)?;
    }
    Ok(registry)
}

/// Load configuration through `lookup`, then build the registry.
///
/// Configuration is resolved first, so a missing token fails before any
/// client or tool exists. Nothing here talks to the network.
pub fn registry_from_lookup<F>(lookup: F) -> Result<ToolRegistry>
where
    F: Fn(&str) -> Option<String>,
{
    let config =
        ClientConfig::from_lookup(lookup).context("Failed to load Raindrop configuration")?;
    tracing::info!("Raindrop API: {}", config.base_url);

    let client = RaindropClient::from_config(config)?;
    build_registry(&client)
}

/// Sanitized, indented JSON as a single text block.
pub(crate) fn json_result(value: &serde_json::Value) -> Result<CallToolResult> {
    Ok(CallToolResult::text(to_pretty_json(value)?))
}

/// Zero counts as "not provided" for optional numeric arguments.
pub(crate) fn nonzero<T: Default + PartialEq>(value: Option<T>) -> Option<T> {
    value.filter(|v| *v != T::default())
}

/// Empty strings count as "not provided".
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

// JSON Schema `integer` admits `2.0`, so whole floats must deserialize too.

pub(crate) fn whole_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i128>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    number_to_whole(&number).map_err(D::Error::custom)
}

pub(crate) fn optional_whole_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i128>,
{
    match Option::<serde_json::Number>::deserialize(deserializer)? {
        Some(number) => number_to_whole(&number).map(Some).map_err(D::Error::custom),
        None => Ok(None),
    }
}

fn number_to_whole<T: TryFrom<i128>>(number: &serde_json::Number) -> Result<T, String> {
    let whole = if let Some(n) = number.as_i64() {
        i128::from(n)
    } else if let Some(n) = number.as_u64() {
        i128::from(n)
    } else {
        match number.as_f64() {
            Some(f) if f.is_finite() && f.fract() == 0.0 => f as i128,
            _ => return Err(format!("expected a whole number, got {}", number)),
        }
    };
    T::try_from(whole).map_err(|_| format!("number {} is out of range", number))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::protocol::CallToolResult;
    use raindrop_sdk::RaindropClient;
    use wiremock::MockServer;

    pub fn client_for(server: &MockServer) -> RaindropClient {
        RaindropClient::builder()
            .access_token("test-token")
            .base_url(server.uri())
            .build()
            .unwrap()
    }

    pub fn output_json(result: &CallToolResult) -> serde_json::Value {
        assert!(result.is_error.is_none(), "tool failed: {:?}", result);
        serde_json::from_str(result.first_text().unwrap()).unwrap()
    }
}
