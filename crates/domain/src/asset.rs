//! API asset types
//!
//! An [`ApiAsset`] is the aggregated, versioned summary of every endpoint
//! that shares a derived API name. It is the unit handed to downstream
//! persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::collection::{AuthDescriptor, Header};
use crate::endpoint::{Endpoint, EndpointResponse};

/// Kind discriminator of an asset record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// An API built from collection endpoints.
    Api,
}

/// Endpoint as listed inside an asset's version group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointSummary {
    /// Request name
    pub name: String,
    /// Upper-case HTTP method
    pub method: String,
    /// Resolved URL
    pub url: String,
    /// Unresolved source URL
    pub original_url: String,
    /// Normalized path template
    pub path: String,
    /// Request description
    pub description: String,
    /// Request headers
    pub headers: Vec<Header>,
    /// Request body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
    /// Response samples
    pub responses: Vec<EndpointResponse>,
    /// Explicit auth declaration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthDescriptor>,
    /// Originating collection name
    pub collection: String,
    /// Originating workspace name
    pub workspace: String,
}

impl From<&Endpoint> for EndpointSummary {
    fn from(endpoint: &Endpoint) -> Self {
        Self {
            name: endpoint.name.clone(),
            method: endpoint.method.clone(),
            url: endpoint.url.clone(),
            original_url: endpoint.original_url.clone(),
            path: endpoint.path.clone(),
            description: endpoint.description.clone(),
            headers: endpoint.headers.clone(),
            body: endpoint.body.clone(),
            responses: endpoint.responses.clone(),
            auth: endpoint.auth.clone(),
            collection: endpoint.collection_info.name.clone(),
            workspace: endpoint.workspace_info.name.clone(),
        }
    }
}

/// Endpoints sharing one version bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionGroup {
    /// Bucket key (`v1`, `v2`, ... or `default`)
    pub version: String,
    /// Endpoints in the bucket, in input order
    pub endpoints: Vec<EndpointSummary>,
}

/// Aggregated properties of an API asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetProperties {
    /// Number of endpoints across all versions
    pub total_endpoints: usize,
    /// Version bucket keys in order of first encounter
    pub versions: Vec<String>,
    /// Distinct workspace names
    pub workspaces: Vec<String>,
    /// Distinct collection names
    pub collections: Vec<String>,
    /// Distinct declared auth schemes
    pub auth_type: Vec<String>,
    /// Endpoints grouped by version
    pub endpoints: Vec<VersionGroup>,
}

/// The versioned catalog record for one API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAsset {
    /// Record kind
    #[serde(rename = "type")]
    pub kind: AssetKind,
    /// API name
    pub name: String,
    /// Asset value (the API name)
    pub value: String,
    /// Classification tags
    pub tags: Vec<String>,
    /// Human-readable summary
    pub asset_description: String,
    /// Aggregated properties
    pub properties: AssetProperties,
    /// Build timestamp
    pub created_at: DateTime<Utc>,
    /// Build timestamp
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_asset_wire_names() {
        let now = Utc::now();
        let asset = ApiAsset {
            kind: AssetKind::Api,
            name: "Orders API".to_string(),
            value: "Orders API".to_string(),
            tags: vec!["postman".to_string()],
            asset_description: "0 endpoints".to_string(),
            properties: AssetProperties {
                total_endpoints: 0,
                versions: Vec::new(),
                workspaces: Vec::new(),
                collections: Vec::new(),
                auth_type: Vec::new(),
                endpoints: Vec::new(),
            },
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&asset).unwrap();
        assert_eq!(json["type"], "api");
        assert_eq!(json["assetDescription"], "0 endpoints");
        assert_eq!(json["properties"]["totalEndpoints"], 0);
        assert!(json["properties"]["authType"].is_array());
        assert!(json.get("createdAt").is_some());
    }
}
