//! Collections API endpoints.

use crate::api::raindrops::ItemResponse;
use crate::client::RaindropClient;
use crate::error::RaindropResult;
use serde::{Deserialize, Serialize};

/// Pseudo-collection holding every bookmark.
pub const ALL: i64 = 0;
/// Pseudo-collection holding bookmarks without a collection.
pub const UNSORTED: i64 = -1;
/// Pseudo-collection holding deleted bookmarks.
pub const TRASH: i64 = -99;

/// Collections API.
pub struct CollectionsApi<'a> {
    client: &'a RaindropClient,
}

impl<'a> CollectionsApi<'a> {
    pub(crate) fn new(client: &'a RaindropClient) -> Self {
        Self { client }
    }

    /// Create a collection.
    pub async fn create(&self, request: &CreateCollectionRequest) -> RaindropResult<ItemResponse> {
        self.client.http.post("/collection", request).await
    }
}

/// How a collection renders its bookmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    List,
    Simple,
    Grid,
    Masonry,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [
        ViewMode::List,
        ViewMode::Simple,
        ViewMode::Grid,
        ViewMode::Masonry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::List => "list",
            ViewMode::Simple => "simple",
            ViewMode::Grid => "grid",
            ViewMode::Masonry => "masonry",
        }
    }
}

/// Request to create a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCollectionRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<ViewMode>,
}

impl CreateCollectionRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            public: None,
            view: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_view_mode_wire_names() {
        for mode in ViewMode::ALL {
            assert_eq!(serde_json::to_value(mode).unwrap(), json!(mode.as_str()));
        }
        let parsed: ViewMode = serde_json::from_value(json!("masonry")).unwrap();
        assert_eq!(parsed, ViewMode::Masonry);
        assert!(serde_json::from_value::<ViewMode>(json!("table")).is_err());
    }

    #[test]
    fn test_create_request_omits_absent_fields() {
        let body = serde_json::to_value(CreateCollectionRequest::new("Reading")).unwrap();
        assert_eq!(body, json!({"title": "Reading"}));

        let mut request = CreateCollectionRequest::new("Reading");
        request.public = Some(false);
        request.view = Some(ViewMode::Grid);
        let body = serde_json::to_value(request).unwrap();
        assert_eq!(
            body,
            json!({"title": "Reading", "public": false, "view": "grid"})
        );
    }

    #[tokio::test]
    async fn test_create_collection() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/collection"))
            .and(header("Authorization", "Bearer test-token"))
            .and(body_json(json!({"title": "Reading", "description": "Later"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"result": true, "item": {"_id": 77, "title": "Reading"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = RaindropClient::builder()
            .access_token("test-token")
            .base_url(server.uri())
            .build()
            .unwrap();

        let mut request = CreateCollectionRequest::new("Reading");
        request.description = Some("Later".to_string());
        let created = client.collections().create(&request).await.unwrap();
        assert_eq!(created.item["_id"], 77);
    }
}
