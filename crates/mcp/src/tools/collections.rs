// Collection tools

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    json_result, json_schema_boolean, json_schema_enum, json_schema_object, json_schema_string,
    non_empty, Tool, ToolTier,
};
use anyhow::{Context, Result};
use raindrop_sdk::api::{CreateCollectionRequest, ViewMode};
use raindrop_sdk::RaindropClient;
use serde::Deserialize;
use serde_json::json;

/// Tool to create a collection
pub struct CreateCollectionTool {
    client: RaindropClient,
}

impl CreateCollectionTool {
    pub fn new(client: RaindropClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct CreateCollectionArgs {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    public: Option<bool>,
    #[serde(default)]
    view: Option<ViewMode>,
}

impl CreateCollectionArgs {
    fn into_request(self) -> CreateCollectionRequest {
        let mut request = CreateCollectionRequest::new(self.title);
        request.description = non_empty(self.description);
        request.public = self.public;
        request.view = self.view;
        request
    }
}

#[async_trait::async_trait]
impl Tool for CreateCollectionTool {
    fn schema(&self) -> ToolSchema {
        let views: Vec<&str> = ViewMode::ALL.iter().map(ViewMode::as_str).collect();
        ToolSchema {
            name: "create_collection".to_string(),
            title: Some("Create Collection".to_string()),
            description: "Create a new collection".to_string(),
            input_schema: json_schema_object(
                json!({
                    "title": json_schema_string("Name of the collection"),
                    "description": json_schema_string("Description of the collection"),
                    "public": json_schema_boolean("Whether the collection is publicly visible"),
                    "view": json_schema_enum(&views, "How bookmarks are displayed")
                }),
                vec!["title"],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: CreateCollectionArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for create_collection")?;

        let response = self
            .client
            .collections()
            .create(&args.into_request())
            .await?;
        json_result(&response.item)
    }

    fn tier(&self) -> ToolTier {
        ToolTier::Tier1
    }
}
