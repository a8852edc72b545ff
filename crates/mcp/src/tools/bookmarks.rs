// Bookmark tools backed by the Raindrop raindrops endpoints

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    json_result, json_schema_array, json_schema_boolean, json_schema_count, json_schema_integer,
    json_schema_object, json_schema_string, non_empty, nonzero, optional_whole_number, whole_number,
    Tool, ToolTier,
};
use anyhow::{Context, Result};
use raindrop_sdk::api::{CollectionRef, CreateRaindropRequest, ListQuery, UpdateRaindropRequest};
use raindrop_sdk::{collections, RaindropClient};
use serde::Deserialize;
use serde_json::json;

/// Build the list query shared by `get_bookmarks` and `search_bookmarks`.
fn list_query(search: Option<String>, page: Option<u64>, per_page: Option<u64>) -> ListQuery {
    let mut query = ListQuery::new();
    if let Some(search) = search {
        query = query.search(search);
    }
    if let Some(page) = nonzero(page) {
        query = query.page(page);
    }
    if let Some(per_page) = nonzero(per_page) {
        query = query.per_page(per_page);
    }
    query
}

fn tags_schema() -> serde_json::Value {
    json_schema_array(json!({"type": "string"}), "Tags for the bookmark")
}

/// Tool to list bookmarks in a collection
pub struct GetBookmarksTool {
    client: RaindropClient,
}

impl GetBookmarksTool {
    pub fn new(client: RaindropClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetBookmarksArgs {
    #[serde(default, deserialize_with = "optional_whole_number")]
    collection_id: Option<i64>,
    #[serde(default)]
    search: Option<String>,
    #[serde(default, deserialize_with = "optional_whole_number")]
    page: Option<u64>,
    #[serde(default, deserialize_with = "optional_whole_number")]
    per_page: Option<u64>,
}

#[async_trait::async_trait]
impl Tool for GetBookmarksTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_bookmarks".to_string(),
            title: Some("Get Bookmarks".to_string()),
            description: "List bookmarks in a collection. Use collection 0 for all bookmarks, \
                          -1 for unsorted and -99 for trash."
                .to_string(),
            input_schema: json_schema_object(
                json!({
                    "collectionId": json_schema_integer("Collection ID (0 = all, -1 = unsorted, -99 = trash; default 0)"),
                    "search": json_schema_string("Search query"),
                    "page": json_schema_count("Page number; 0 or omitted returns the first page"),
                    "perPage": json_schema_count("Bookmarks per page (max 50)")
                }),
                vec![],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GetBookmarksArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get_bookmarks")?;

        let collection_id = args.collection_id.unwrap_or(collections::ALL);
        let query = list_query(non_empty(args.search), args.page, args.per_page);

        let page = self.client.raindrops().list(collection_id, &query).await?;
        json_result(&json!({ "count": page.count, "items": page.items }))
    }
}

/// Tool to fetch a single bookmark
pub struct GetBookmarkTool {
    client: RaindropClient,
}

impl GetBookmarkTool {
    pub fn new(client: RaindropClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct BookmarkIdArgs {
    #[serde(deserialize_with = "whole_number")]
    id: i64,
}

#[async_trait::async_trait]
impl Tool for GetBookmarkTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_bookmark".to_string(),
            title: Some("Get Bookmark".to_string()),
            description: "Get a single bookmark by its ID".to_string(),
            input_schema: json_schema_object(
                json!({ "id": json_schema_integer("Bookmark ID") }),
                vec!["id"],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: BookmarkIdArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get_bookmark")?;

        let response = self.client.raindrops().get(args.id).await?;
        json_result(&response.item)
    }
}

/// Tool to create a bookmark
pub struct CreateBookmarkTool {
    client: RaindropClient,
}

impl CreateBookmarkTool {
    pub fn new(client: RaindropClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateBookmarkArgs {
    link: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    excerpt: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    important: Option<bool>,
    #[serde(default, deserialize_with = "optional_whole_number")]
    collection_id: Option<i64>,
}

impl CreateBookmarkArgs {
    fn into_request(self) -> CreateRaindropRequest {
        let mut request = CreateRaindropRequest::new(self.link);
        request.title = non_empty(self.title);
        request.excerpt = non_empty(self.excerpt);
        request.tags = self.tags;
        request.important = self.important;
        request.collection = nonzero(self.collection_id).map(CollectionRef::from);
        request
    }
}

#[async_trait::async_trait]
impl Tool for CreateBookmarkTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "create_bookmark".to_string(),
            title: Some("Create Bookmark".to_string()),
            description: "Create a new bookmark. Raindrop fetches the page to fill in \
                          any metadata that is not supplied."
                .to_string(),
            input_schema: json_schema_object(
                json!({
                    "link": json_schema_string("URL of the bookmark"),
                    "title": json_schema_string("Title of the bookmark"),
                    "excerpt": json_schema_string("Short description"),
                    "tags": tags_schema(),
                    "important": json_schema_boolean("Mark as favorite"),
                    "collectionId": json_schema_integer("Collection ID to save into")
                }),
                vec!["link"],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: CreateBookmarkArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for create_bookmark")?;

        let response = self.client.raindrops().create(&args.into_request()).await?;
        json_result(&response.item)
    }

    fn tier(&self) -> ToolTier {
        ToolTier::Tier1
    }
}

/// Tool to update an existing bookmark
pub struct UpdateBookmarkTool {
    client: RaindropClient,
}

impl UpdateBookmarkTool {
    pub fn new(client: RaindropClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateBookmarkArgs {
    #[serde(deserialize_with = "whole_number")]
    id: i64,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    excerpt: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    important: Option<bool>,
    #[serde(default, deserialize_with = "optional_whole_number")]
    collection_id: Option<i64>,
}

impl UpdateBookmarkArgs {
    fn into_request(self) -> (i64, UpdateRaindropRequest) {
        let request = UpdateRaindropRequest {
            link: non_empty(self.link),
            title: non_empty(self.title),
            excerpt: non_empty(self.excerpt),
            tags: self.tags,
            important: self.important,
            collection: nonzero(self.collection_id).map(CollectionRef::from),
        };
        (self.id, request)
    }
}

#[async_trait::async_trait]
impl Tool for UpdateBookmarkTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "update_bookmark".to_string(),
            title: Some("Update Bookmark".to_string()),
            description: "Update an existing bookmark. Only the supplied fields change."
                .to_string(),
            input_schema: json_schema_object(
                json!({
                    "id": json_schema_integer("Bookmark ID"),
                    "link": json_schema_string("New URL"),
                    "title": json_schema_string("New title"),
                    "excerpt": json_schema_string("New description"),
                    "tags": tags_schema(),
                    "important": json_schema_boolean("Mark as favorite"),
                    "collectionId": json_schema_integer("Move to this collection ID")
                }),
                vec!["id"],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: UpdateBookmarkArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for update_bookmark")?;

        let (id, request) = args.into_request();
        let response = self.client.raindrops().update(id, &request).await?;
        json_result(&response.item)
    }

    fn tier(&self) -> ToolTier {
        ToolTier::Tier1
    }
}

/// Tool to delete a bookmark
pub struct DeleteBookmarkTool {
    client: RaindropClient,
}

impl DeleteBookmarkTool {
    pub fn new(client: RaindropClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for DeleteBookmarkTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "delete_bookmark".to_string(),
            title: Some("Delete Bookmark".to_string()),
            description: "Delete a bookmark. It is moved to trash, or removed permanently \
                          if it is already in trash."
                .to_string(),
            input_schema: json_schema_object(
                json!({ "id": json_schema_integer("Bookmark ID") }),
                vec!["id"],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: BookmarkIdArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for delete_bookmark")?;

        let response = self.client.raindrops().delete(args.id).await?;
        json_result(&json!({
            "result": response.result.unwrap_or(true),
            "message": "Bookmark deleted"
        }))
    }

    fn tier(&self) -> ToolTier {
        ToolTier::Tier2
    }
}

/// Tool to search across all bookmarks
pub struct SearchBookmarksTool {
    client: RaindropClient,
}

impl SearchBookmarksTool {
    pub fn new(client: RaindropClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchBookmarksArgs {
    query: String,
    #[serde(default, deserialize_with = "optional_whole_number")]
    page: Option<u64>,
    #[serde(default, deserialize_with = "optional_whole_number")]
    per_page: Option<u64>,
}

#[async_trait::async_trait]
impl Tool for SearchBookmarksTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search_bookmarks".to_string(),
            title: Some("Search Bookmarks".to_string()),
            description: "Search all bookmarks. Supports Raindrop search operators \
                          such as #tag, type:article or domain:example.com."
                .to_string(),
            input_schema: json_schema_object(
                json!({
                    "query": json_schema_string("Search query"),
                    "page": json_schema_count("Page number; 0 or omitted returns the first page"),
                    "perPage": json_schema_count("Bookmarks per page (max 50)")
                }),
                vec!["query"],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: SearchBookmarksArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for search_bookmarks")?;

        let query = list_query(Some(args.query), args.page, args.per_page);
        let page = self
            .client
            .raindrops()
            .list(collections::ALL, &query)
            .await?;
        json_result(&json!({ "count": page.count, "items": page.items }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{client_for, output_json};
    use crate::tools::ToolRegistry;
    use std::sync::Arc;
    use wiremock::matchers::{any, body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ok(body: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(body)
    }

    #[tokio::test]
    async fn test_get_bookmarks_defaults_to_all_without_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/raindrops/0"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ok(json!({"result": true})))
            .expect(1)
            .mount(&server)
            .await;

        let tool = GetBookmarksTool::new(client_for(&server));
        let result = tool.execute(json!({})).await.unwrap();

        assert_eq!(output_json(&result), json!({"count": 0, "items": []}));
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), None);
    }

    #[tokio::test]
    async fn test_get_bookmarks_null_envelope_defaults() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/raindrops/0"))
            .respond_with(ok(json!({"result": true, "items": null, "count": null})))
            .expect(1)
            .mount(&server)
            .await;

        let tool = GetBookmarksTool::new(client_for(&server));
        let result = tool.execute(json!({})).await.unwrap();
        assert_eq!(output_json(&result), json!({"count": 0, "items": []}));
    }

    #[test]
    fn test_page_description_matches_zero_handling() {
        let client = RaindropClient::builder()
            .access_token("tok")
            .build()
            .unwrap();
        let schemas = [
            GetBookmarksTool::new(client.clone()).schema(),
            SearchBookmarksTool::new(client).schema(),
        ];
        for schema in schemas {
            let page = schema.input_schema["properties"]["page"]["description"]
                .as_str()
                .unwrap();
            assert!(page.contains("first page"), "{}: {}", schema.name, page);
            assert!(!page.contains("starts at 0"), "{}: {}", schema.name, page);
        }
    }

    #[tokio::test]
    async fn test_whole_float_arguments_reach_the_api() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/raindrops/-1"))
            .and(query_param("page", "2"))
            .and(query_param("perpage", "10"))
            .respond_with(ok(json!({"count": 0, "items": []})))
            .expect(1)
            .mount(&server)
            .await;

        let mut registry = ToolRegistry::new();
        registry
            .register(Arc::new(GetBookmarksTool::new(client_for(&server))))
            .unwrap();

        let result = registry
            .call(
                "get_bookmarks",
                Some(json!({"collectionId": -1.0, "page": 2.0, "perPage": 10.0})),
            )
            .await
            .unwrap();
        assert_eq!(output_json(&result), json!({"count": 0, "items": []}));
    }

    #[tokio::test]
    async fn test_get_bookmarks_query_and_clamp() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/raindrops/-1"))
            .and(query_param("search", "rust"))
            .and(query_param("page", "2"))
            .and(query_param("perpage", "50"))
            .respond_with(ok(json!({"count": 1, "items": [{"_id": 9, "title": "\u{FEFF}Rust"}]})))
            .expect(1)
            .mount(&server)
            .await;

        let tool = GetBookmarksTool::new(client_for(&server));
        let result = tool
            .execute(json!({"collectionId": -1, "search": "rust", "page": 2, "perPage": 120}))
            .await
            .unwrap();

        let output = output_json(&result);
        assert_eq!(output["count"], 1);
        assert_eq!(output["items"][0]["title"], "Rust");
    }

    #[tokio::test]
    async fn test_zero_page_and_empty_search_are_omitted() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/raindrops/0"))
            .respond_with(ok(json!({"count": 0, "items": []})))
            .mount(&server)
            .await;

        let tool = GetBookmarksTool::new(client_for(&server));
        tool.execute(json!({"page": 0, "perPage": 0, "search": ""}))
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), None);
    }

    #[tokio::test]
    async fn test_search_bookmarks_clamps_per_page() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/raindrops/0"))
            .and(query_param("search", "#rust"))
            .and(query_param("perpage", "50"))
            .respond_with(ok(json!({"count": 3, "items": [{}, {}, {}]})))
            .expect(1)
            .mount(&server)
            .await;

        let tool = SearchBookmarksTool::new(client_for(&server));
        let result = tool
            .execute(json!({"query": "#rust", "perPage": 51}))
            .await
            .unwrap();
        assert_eq!(output_json(&result)["count"], 3);
    }

    #[tokio::test]
    async fn test_get_bookmark_returns_item() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/raindrop/42"))
            .respond_with(ok(json!({"result": true, "item": {"_id": 42, "excerpt": "a\u{FEFF}b"}})))
            .mount(&server)
            .await;

        let tool = GetBookmarkTool::new(client_for(&server));
        let result = tool.execute(json!({"id": 42})).await.unwrap();
        assert_eq!(output_json(&result), json!({"_id": 42, "excerpt": "ab"}));
    }

    #[tokio::test]
    async fn test_create_bookmark_link_only() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/raindrop"))
            .and(body_json(json!({"link": "https://example.com", "pleaseParse": {}})))
            .respond_with(ok(json!({"result": true, "item": {"_id": 1, "link": "https://example.com"}})))
            .expect(1)
            .mount(&server)
            .await;

        let tool = CreateBookmarkTool::new(client_for(&server));
        let result = tool
            .execute(json!({"link": "https://example.com"}))
            .await
            .unwrap();
        assert_eq!(output_json(&result)["_id"], 1);
    }

    #[tokio::test]
    async fn test_create_bookmark_full_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/raindrop"))
            .and(body_json(json!({
                "link": "https://example.com",
                "title": "Example",
                "excerpt": "An example",
                "tags": ["a", "b"],
                "important": false,
                "collection": {"$id": 5},
                "pleaseParse": {}
            })))
            .respond_with(ok(json!({"item": {"_id": 2}})))
            .expect(1)
            .mount(&server)
            .await;

        let tool = CreateBookmarkTool::new(client_for(&server));
        tool.execute(json!({
            "link": "https://example.com",
            "title": "Example",
            "excerpt": "An example",
            "tags": ["a", "b"],
            "important": false,
            "collectionId": 5
        }))
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_create_bookmark_zero_collection_is_omitted() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/raindrop"))
            .and(body_json(json!({"link": "https://example.com", "pleaseParse": {}})))
            .respond_with(ok(json!({"item": {"_id": 3}})))
            .expect(1)
            .mount(&server)
            .await;

        let tool = CreateBookmarkTool::new(client_for(&server));
        tool.execute(json!({"link": "https://example.com", "collectionId": 0}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_bookmark_collection_mapping() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/raindrop/10"))
            .and(body_json(json!({"collection": {"$id": 5}})))
            .respond_with(ok(json!({"result": true, "item": {"_id": 10}})))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/raindrop/11"))
            .and(body_json(json!({"title": "Renamed"})))
            .respond_with(ok(json!({"result": true, "item": {"_id": 11}})))
            .expect(1)
            .mount(&server)
            .await;

        let tool = UpdateBookmarkTool::new(client_for(&server));
        let moved = tool
            .execute(json!({"id": 10, "collectionId": 5}))
            .await
            .unwrap();
        assert_eq!(output_json(&moved)["_id"], 10);

        let renamed = tool
            .execute(json!({"id": 11, "title": "Renamed", "collectionId": 0}))
            .await
            .unwrap();
        assert_eq!(output_json(&renamed)["_id"], 11);
    }

    #[tokio::test]
    async fn test_delete_bookmark_reports_message() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/raindrop/5"))
            .respond_with(ok(json!({"result": true})))
            .mount(&server)
            .await;

        // Already in trash: Raindrop answers without a result flag
        Mock::given(method("DELETE"))
            .and(path("/raindrop/6"))
            .respond_with(ok(json!({})))
            .mount(&server)
            .await;

        let tool = DeleteBookmarkTool::new(client_for(&server));
        let first = tool.execute(json!({"id": 5})).await.unwrap();
        assert_eq!(
            output_json(&first),
            json!({"result": true, "message": "Bookmark deleted"})
        );

        let trashed = tool.execute(json!({"id": 6})).await.unwrap();
        assert_eq!(
            output_json(&trashed),
            json!({"result": true, "message": "Bookmark deleted"})
        );
    }

    #[tokio::test]
    async fn test_not_found_surfaces_status() {
        let server = MockServer::start().await;

        Mock::given(any())
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut registry = ToolRegistry::new();
        registry
            .register(Arc::new(GetBookmarkTool::new(client_for(&server))))
            .unwrap();

        let result = registry
            .call("get_bookmark", Some(json!({"id": 1})))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(result.first_text().unwrap().contains("404"));
    }

    #[tokio::test]
    async fn test_missing_required_field_issues_no_request() {
        let server = MockServer::start().await;

        Mock::given(any())
            .respond_with(ok(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let mut registry = ToolRegistry::new();
        registry
            .register(Arc::new(CreateBookmarkTool::new(client_for(&server))))
            .unwrap();
        registry
            .register(Arc::new(SearchBookmarksTool::new(client_for(&server))))
            .unwrap();

        assert!(registry
            .call("create_bookmark", Some(json!({"title": "No link"})))
            .await
            .is_err());
        assert!(registry.call("search_bookmarks", None).await.is_err());
        assert!(registry
            .call("search_bookmarks", Some(json!({"query": "x", "page": "one"})))
            .await
            .is_err());
    }
}
