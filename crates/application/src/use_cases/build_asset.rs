//! Build API asset use case

use std::sync::{Arc, LazyLock};

use atlas_domain::{
    ApiAsset, AssetKind, AssetProperties, Endpoint, EndpointSummary, VersionGroup,
};
use indexmap::{IndexMap, IndexSet};
use regex::Regex;

use crate::ports::Clock;

/// Bucket for endpoints whose URL carries no version segment.
pub const DEFAULT_VERSION: &str = "default";

const UNKNOWN_AUTH: &str = "unknown";

static VERSION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/v(\d+)/").expect("valid regex"));

/// Returns the version bucket of a resolved URL: `v<n>` from the first
/// `/v<n>/` segment, or [`DEFAULT_VERSION`].
#[must_use]
pub fn version_bucket(url: &str) -> String {
    VERSION
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map_or_else(|| DEFAULT_VERSION.to_string(), |n| format!("v{}", n.as_str()))
}

/// Aggregates the endpoints sharing an API name into an [`ApiAsset`].
pub struct BuildAsset {
    clock: Arc<dyn Clock>,
}

impl BuildAsset {
    /// Creates a new `BuildAsset` use case.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Executes the use case. Returns `None` for an empty endpoint list.
    #[must_use]
    pub fn execute(&self, api_name: &str, endpoints: &[Endpoint]) -> Option<ApiAsset> {
        if endpoints.is_empty() {
            return None;
        }

        let mut workspaces = IndexSet::new();
        let mut collections = IndexSet::new();
        let mut auth_types = IndexSet::new();
        let mut buckets: IndexMap<String, Vec<EndpointSummary>> = IndexMap::new();

        for endpoint in endpoints {
            workspaces.insert(endpoint.workspace_info.name.clone());
            collections.insert(endpoint.collection_info.name.clone());

            if let Some(auth) = &endpoint.auth {
                let auth_type = auth
                    .auth_type
                    .as_deref()
                    .filter(|t| !t.is_empty())
                    .unwrap_or(UNKNOWN_AUTH);
                auth_types.insert(auth_type.to_string());
            }

            buckets
                .entry(version_bucket(&endpoint.url))
                .or_default()
                .push(EndpointSummary::from(endpoint));
        }

        let versions: Vec<String> = buckets.keys().cloned().collect();
        let now = self.clock.now();

        Some(ApiAsset {
            kind: AssetKind::Api,
            name: api_name.to_string(),
            value: api_name.to_string(),
            tags: vec!["postman".to_string(), "api".to_string()],
            asset_description: format!(
                "API with {} endpoints across {} versions",
                endpoints.len(),
                versions.len()
            ),
            properties: AssetProperties {
                total_endpoints: endpoints.len(),
                versions,
                workspaces: workspaces.into_iter().collect(),
                collections: collections.into_iter().collect(),
                auth_type: auth_types.into_iter().collect(),
                endpoints: buckets
                    .into_iter()
                    .map(|(version, endpoints)| VersionGroup { version, endpoints })
                    .collect(),
            },
            created_at: now,
            updated_at: now,
        })
    }
}
