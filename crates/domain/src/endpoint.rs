//! Extracted endpoint types

use serde::{Deserialize, Serialize};

use crate::collection::{AuthDescriptor, Header};

/// Name and identifier of the workspace or collection an endpoint came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    /// Display name
    pub name: String,
    /// Upstream identifier
    pub id: String,
}

impl SourceRef {
    /// Creates a new source reference.
    #[must_use]
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

/// A response sample projected onto an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointResponse {
    /// HTTP status code
    pub code: u16,
    /// Response body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Response headers
    #[serde(default)]
    pub headers: Vec<Header>,
}

/// One resolved API call extracted from a collection tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Request name
    pub name: String,
    /// Upper-case HTTP method
    pub method: String,
    /// Fully variable-resolved URL
    pub url: String,
    /// URL as written in the source, before resolution
    pub original_url: String,
    /// Normalized path template
    pub path: String,
    /// Request description, empty when absent
    pub description: String,
    /// Request headers
    pub headers: Vec<Header>,
    /// Request body in its source form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
    /// Saved response samples
    pub responses: Vec<EndpointResponse>,
    /// Explicit auth declaration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthDescriptor>,
    /// Originating collection
    pub collection_info: SourceRef,
    /// Originating workspace
    pub workspace_info: SourceRef,
}
