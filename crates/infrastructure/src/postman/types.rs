//! Postman API response types
//!
//! This module defines the types returned by the Postman REST API.
//! Collection contents use `#[serde(default)]` and loosely typed fields
//! extensively so format variations never fail a whole collection.

#![allow(missing_docs)]

use serde::Deserialize;
use serde_json::Value;

use super::environment_types::PostmanEnvironment;

/// `GET /workspaces`
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspacesResponse {
    pub workspaces: Vec<WorkspaceEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceEntry {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// `GET /environments?workspace={id}`
#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentsResponse {
    pub environments: Vec<EnvironmentEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentEntry {
    pub uid: String,
}

/// `GET /environments/{uid}`
#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentResponse {
    pub environment: PostmanEnvironment,
}

/// `GET /collections?workspace={id}`
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionsResponse {
    pub collections: Vec<CollectionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionEntry {
    pub uid: String,
    #[serde(default)]
    pub name: String,
}

/// `GET /collections/{uid}`
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionResponse {
    pub collection: PostmanCollection,
}

/// A full collection in Collection v2.1 layout
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostmanCollection {
    #[serde(default)]
    pub info: Option<PostmanInfo>,
    #[serde(default)]
    pub item: Vec<PostmanItem>,
    #[serde(default)]
    pub variable: Vec<PostmanVariable>,
}

/// Collection metadata
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostmanInfo {
    #[serde(default)]
    pub name: Option<String>,
}

/// An item can be either a folder (containing more items) or a request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostmanItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<PostmanDescription>,
    /// If present, this item is a folder containing sub-items
    #[serde(default)]
    pub item: Option<Vec<Self>>,
    /// If present, this item is a request
    #[serde(default)]
    pub request: Option<PostmanRequestField>,
    /// Saved response examples
    #[serde(default)]
    pub response: Option<Vec<PostmanResponse>>,
}

/// A request is either a bare URL string or a full definition
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PostmanRequestField {
    Url(String),
    Full(Box<PostmanRequest>),
}

/// Postman Request definition
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostmanRequest {
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub url: Option<PostmanUrl>,
    /// A list of header objects, or a raw header string in some exports
    #[serde(default)]
    pub header: Option<Value>,
    #[serde(default)]
    pub body: Option<Value>,
    #[serde(default)]
    pub auth: Option<PostmanAuth>,
    #[serde(default)]
    pub description: Option<PostmanDescription>,
}

/// Descriptions are plain strings or `{content, type}` objects
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PostmanDescription {
    Text(String),
    Rich {
        #[serde(default)]
        content: Option<String>,
    },
}

impl PostmanDescription {
    /// Returns the description text, if any
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Rich { content } => content.as_deref(),
        }
    }
}

/// URL can be a simple string, a structured object, or something else
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PostmanUrl {
    Simple(String),
    Structured(PostmanUrlStructured),
    Other(Value),
}

/// Structured URL object; `host` and `path` are kept loose because exports
/// write them as arrays or as single strings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostmanUrlStructured {
    #[serde(default)]
    pub raw: Option<Value>,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub host: Option<Value>,
    #[serde(default)]
    pub path: Option<Value>,
}

/// Request or response header
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostmanHeader {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub disabled: Option<bool>,
}

/// Saved response example
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostmanResponse {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub header: Option<Value>,
}

/// Request auth; only the scheme is needed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostmanAuth {
    #[serde(rename = "type", default)]
    pub auth_type: Option<String>,
}

/// Collection-scoped variable
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostmanVariable {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_collection_detail() {
        let json = r#"{
            "collection": {
                "info": {"_postman_id": "abc", "name": "Orders API"},
                "item": [
                    {
                        "name": "Orders",
                        "item": [
                            {
                                "name": "List orders",
                                "request": {
                                    "method": "GET",
                                    "url": {
                                        "raw": "{{baseUrl}}/v1/orders",
                                        "host": ["{{baseUrl}}"],
                                        "path": ["v1", "orders"]
                                    },
                                    "header": [{"key": "Accept", "value": "application/json"}],
                                    "auth": {"type": "bearer"},
                                    "description": {"content": "Lists orders", "type": "text/markdown"}
                                },
                                "response": [{"code": 200, "body": "[]", "header": null}]
                            }
                        ]
                    },
                    {"name": "Ping", "request": "https://api.example.com/ping"}
                ],
                "variable": [{"key": "baseUrl", "value": "https://api.example.com"}]
            }
        }"#;

        let response: CollectionResponse = serde_json::from_str(json).unwrap();
        let collection = response.collection;

        assert_eq!(collection.info.unwrap().name.as_deref(), Some("Orders API"));
        assert!(collection.item[0].item.is_some());
        assert!(collection.item[1].request.is_some());

        let folder = collection.item[0].item.as_ref().unwrap();
        let Some(PostmanRequestField::Full(request)) = &folder[0].request else {
            panic!("expected full request");
        };
        assert!(matches!(request.url, Some(PostmanUrl::Structured(_))));
        assert_eq!(
            request.description.as_ref().and_then(PostmanDescription::text),
            Some("Lists orders")
        );
        assert!(matches!(
            collection.item[1].request,
            Some(PostmanRequestField::Url(_))
        ));
    }

    #[test]
    fn test_parse_listing() {
        let json = r#"{"workspaces": [{"id": "ws-1", "name": "Sales", "type": "team"}]}"#;
        let response: WorkspacesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.workspaces[0].id, "ws-1");
        assert_eq!(response.workspaces[0].name, "Sales");
    }

    #[test]
    fn test_listing_requires_wrapper() {
        assert!(serde_json::from_str::<CollectionsResponse>(r#"{"data": []}"#).is_err());
    }
}
