//! Workspace-level listing types
//!
//! These are the summaries returned by the upstream listing calls. They only
//! carry what is needed to address the detail calls that follow.

use serde::{Deserialize, Serialize};

/// Top-level container grouping collections and environments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    /// Upstream identifier
    pub id: String,
    /// Display name
    pub name: String,
}

impl Workspace {
    /// Creates a new workspace reference.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A collection as it appears in a workspace listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSummary {
    /// Upstream unique identifier, used to fetch the full collection
    pub uid: String,
    /// Collection name
    pub name: String,
}

impl CollectionSummary {
    /// Creates a new collection summary.
    #[must_use]
    pub fn new(uid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
        }
    }
}

/// An environment as it appears in a workspace listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentSummary {
    /// Upstream unique identifier, used to fetch the environment values
    pub uid: String,
}

impl EnvironmentSummary {
    /// Creates a new environment summary.
    #[must_use]
    pub fn new(uid: impl Into<String>) -> Self {
        Self { uid: uid.into() }
    }
}
