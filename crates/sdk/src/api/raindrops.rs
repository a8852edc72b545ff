//! Raindrops (bookmarks) API endpoints.

use crate::client::RaindropClient;
use crate::error::RaindropResult;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Largest page size the API serves.
pub const MAX_PER_PAGE: u32 = 50;

/// Raindrops API for managing bookmarks.
pub struct RaindropsApi<'a> {
    client: &'a RaindropClient,
}

impl<'a> RaindropsApi<'a> {
    pub(crate) fn new(client: &'a RaindropClient) -> Self {
        Self { client }
    }

    /// List bookmarks in a collection (`0` for all, `-1` unsorted, `-99` trash).
    pub async fn list(
        &self,
        collection_id: i64,
        query: &ListQuery,
    ) -> RaindropResult<ListResponse> {
        self.client
            .http
            .get_with_query(&format!("/raindrops/{}", collection_id), query.to_pairs())
            .await
    }

    /// Get a single bookmark.
    pub async fn get(&self, id: i64) -> RaindropResult<ItemResponse> {
        self.client.http.get(&format!("/raindrop/{}", id)).await
    }

    /// Create a bookmark.
    pub async fn create(&self, request: &CreateRaindropRequest) -> RaindropResult<ItemResponse> {
        self.client.http.post("/raindrop", request).await
    }

    /// Update a bookmark.
    pub async fn update(
        &self,
        id: i64,
        request: &UpdateRaindropRequest,
    ) -> RaindropResult<ItemResponse> {
        self.client
            .http
            .put(&format!("/raindrop/{}", id), request)
            .await
    }

    /// Delete a bookmark.
    ///
    /// Moves it to trash, or removes it permanently when it is already there.
    pub async fn delete(&self, id: i64) -> RaindropResult<DeleteResponse> {
        self.client.http.delete(&format!("/raindrop/{}", id)).await
    }
}

/// Query parameters for listing bookmarks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    /// Page size, clamped to [`MAX_PER_PAGE`].
    pub fn per_page(mut self, per_page: u64) -> Self {
        self.per_page = Some(per_page.min(u64::from(MAX_PER_PAGE)));
        self
    }

    /// Query pairs in wire form; absent fields produce no pair.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(ref search) = self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("perpage".to_string(), per_page.to_string()));
        }
        pairs
    }
}

/// Reference to a collection inside a bookmark body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRef {
    #[serde(rename = "$id")]
    pub id: i64,
}

impl From<i64> for CollectionRef {
    fn from(id: i64) -> Self {
        Self { id }
    }
}

/// Asks the API to fetch the page and fill in missing metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PleaseParse {}

/// Request to create a bookmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRaindropRequest {
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub important: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<CollectionRef>,
    #[serde(rename = "pleaseParse", default)]
    pub please_parse: PleaseParse,
}

impl CreateRaindropRequest {
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            title: None,
            excerpt: None,
            tags: None,
            important: None,
            collection: None,
            please_parse: PleaseParse::default(),
        }
    }
}

/// Request to update a bookmark. Only present fields are changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateRaindropRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub important: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<CollectionRef>,
}

/// `{items, count}` envelope returned by list endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Value>,
}

/// Explicit `null` reads as the field's default, same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `{item}` envelope returned by single-entity endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemResponse {
    #[serde(default)]
    pub item: Value,
}

/// `{result}` envelope returned by delete endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteResponse {
    #[serde(default)]
    pub result: Option<bool>,
}
