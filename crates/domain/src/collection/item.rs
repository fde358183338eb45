//! Collection item types

use serde::{Deserialize, Serialize};

use super::url::UrlField;
use crate::environment::CollectionVariables;

/// A folder containing requests and other folders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Folder name, if the upstream defines one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Items in this folder
    #[serde(default)]
    pub children: Vec<CollectionNode>,
}

impl Folder {
    /// Creates a new empty folder.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            children: Vec::new(),
        }
    }

    /// Adds a child node.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<CollectionNode>) -> Self {
        self.children.push(child.into());
        self
    }
}

/// A request header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Header name
    pub key: String,
    /// Header value
    #[serde(default)]
    pub value: String,
    /// Whether the header is disabled in the source collection
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

impl Header {
    /// Creates an enabled header.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            disabled: false,
        }
    }
}

/// An explicit auth declaration on a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthDescriptor {
    /// Auth scheme (bearer, basic, apikey, ...), if declared
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<String>,
}

impl AuthDescriptor {
    /// Creates a descriptor for the given scheme.
    #[must_use]
    pub fn new(auth_type: impl Into<String>) -> Self {
        Self {
            auth_type: Some(auth_type.into()),
        }
    }
}

/// A saved response example attached to a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSample {
    /// HTTP status code, if recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Response body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Response headers
    #[serde(default)]
    pub headers: Vec<Header>,
}

/// A request leaf in the collection tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestItem {
    /// Request name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// HTTP method as written in the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// URL in one of the recognized shapes; `None` when absent or unrecognized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<UrlField>,
    /// Request headers
    #[serde(default)]
    pub headers: Vec<Header>,
    /// Request body, kept in its source form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
    /// Request description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Saved response examples
    #[serde(default)]
    pub responses: Vec<ResponseSample>,
    /// Explicit auth declaration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthDescriptor>,
}

impl RequestItem {
    /// Creates a named request with the given method and URL.
    #[must_use]
    pub fn new(name: impl Into<String>, method: impl Into<String>, url: UrlField) -> Self {
        Self {
            name: Some(name.into()),
            method: Some(method.into()),
            url: Some(url),
            ..Self::default()
        }
    }
}

/// A node in a collection tree (either a folder or a request).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CollectionNode {
    /// A folder containing other nodes
    Folder(Folder),
    /// A request definition
    Request(RequestItem),
}

impl From<Folder> for CollectionNode {
    fn from(folder: Folder) -> Self {
        Self::Folder(folder)
    }
}

impl From<RequestItem> for CollectionNode {
    fn from(request: RequestItem) -> Self {
        Self::Request(request)
    }
}

/// A full collection as returned by the detail call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Upstream unique identifier
    pub uid: String,
    /// Collection name
    pub name: String,
    /// Collection-scoped variables
    #[serde(default)]
    pub variables: CollectionVariables,
    /// Top-level nodes
    #[serde(default)]
    pub items: Vec<CollectionNode>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_node_serializes_with_type_tag() {
        let node: CollectionNode = Folder::new("Users").into();
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "folder");
        assert_eq!(json["name"], "Users");
    }
}
