//! Collection tree walker

use atlas_domain::{
    CollectionNode, CollectionSummary, CollectionVariables, Endpoint, EndpointResponse,
    EnvironmentVariables, RequestItem, SourceRef, Workspace,
};
use indexmap::IndexMap;

use super::path::{normalize_path, url_path};
use crate::url_normalizer::normalize;
use crate::variable_resolver::VariableResolver;

const DEFAULT_METHOD: &str = "GET";
const UNNAMED_FOLDER: &str = "unnamed";
const DEFAULT_RESPONSE_CODE: u16 = 200;

/// Everything the walk needs besides the tree itself.
#[derive(Debug, Clone)]
pub struct ExtractionContext<'a> {
    /// Collection the tree belongs to; its name is the grouping key
    pub collection: SourceRef,
    /// Workspace the collection belongs to
    pub workspace: SourceRef,
    /// Collection-scoped variables
    pub collection_variables: &'a CollectionVariables,
    /// Workspace environment variables
    pub environment: &'a EnvironmentVariables,
}

impl<'a> ExtractionContext<'a> {
    /// Creates a context for a listed collection in a workspace.
    ///
    /// The collection reference is taken from the listing entry, not from
    /// the fetched document.
    #[must_use]
    pub fn new(
        summary: &CollectionSummary,
        workspace: &Workspace,
        collection_variables: &'a CollectionVariables,
        environment: &'a EnvironmentVariables,
    ) -> Self {
        Self {
            collection: SourceRef::new(&summary.name, &summary.uid),
            workspace: SourceRef::new(&workspace.name, &workspace.id),
            collection_variables,
            environment,
        }
    }

    fn resolver(&self) -> VariableResolver<'a> {
        VariableResolver::new(self.collection_variables, self.environment)
    }
}

/// Walks `nodes` depth-first and returns one endpoint per request whose URL
/// resolves, in traversal order.
#[must_use]
pub fn extract_endpoints(nodes: &[CollectionNode], context: &ExtractionContext<'_>) -> Vec<Endpoint> {
    walk(nodes, "", context, &context.resolver())
}

/// Extracts endpoints and groups them under the collection name.
#[must_use]
pub fn extract(
    nodes: &[CollectionNode],
    context: &ExtractionContext<'_>,
) -> IndexMap<String, Vec<Endpoint>> {
    extract_endpoints(nodes, context)
        .into_iter()
        .fold(IndexMap::new(), |mut grouped, endpoint| {
            grouped
                .entry(context.collection.name.clone())
                .or_insert_with(Vec::new)
                .push(endpoint);
            grouped
        })
}

fn walk(
    nodes: &[CollectionNode],
    prefix: &str,
    context: &ExtractionContext<'_>,
    resolver: &VariableResolver<'_>,
) -> Vec<Endpoint> {
    nodes
        .iter()
        .flat_map(|node| match node {
            CollectionNode::Folder(folder) => {
                let name = folder
                    .name
                    .as_deref()
                    .filter(|name| !name.is_empty())
                    .unwrap_or(UNNAMED_FOLDER);
                let path = if prefix.is_empty() {
                    name.to_string()
                } else {
                    format!("{prefix}/{name}")
                };
                walk(&folder.children, &path, context, resolver)
            }
            CollectionNode::Request(item) => build_endpoint(item, prefix, context, resolver)
                .into_iter()
                .collect(),
        })
        .collect()
}

fn build_endpoint(
    item: &RequestItem,
    prefix: &str,
    context: &ExtractionContext<'_>,
    resolver: &VariableResolver<'_>,
) -> Option<Endpoint> {
    let url = normalize(item.url.as_ref(), resolver)?;

    let method = item
        .method
        .as_deref()
        .map(str::trim)
        .filter(|method| !method.is_empty())
        .map_or_else(|| DEFAULT_METHOD.to_string(), str::to_uppercase);

    let name = item
        .name
        .clone()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("{method} Endpoint"));

    let path = normalize_path(&format!("{prefix}{}", url_path(&url.resolved)));

    let responses = item
        .responses
        .iter()
        .map(|sample| EndpointResponse {
            code: sample.code.unwrap_or(DEFAULT_RESPONSE_CODE),
            body: sample.body.clone(),
            headers: sample.headers.clone(),
        })
        .collect();

    Some(Endpoint {
        name,
        method,
        url: url.resolved,
        original_url: url.original,
        path,
        description: item.description.clone().unwrap_or_default(),
        headers: item.headers.clone(),
        body: item.body.clone(),
        responses,
        auth: item.auth.clone(),
        collection_info: context.collection.clone(),
        workspace_info: context.workspace.clone(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use atlas_domain::{
        AuthDescriptor, Collection, Folder, Header, ResponseSample, UrlField, Variable,
    };
    use pretty_assertions::assert_eq;

    fn users_collection() -> Collection {
        Collection {
            uid: "col-1".to_string(),
            name: "Users API".to_string(),
            variables: CollectionVariables::from(vec![Variable::new(
                "baseUrl",
                "https://api.example.com",
            )]),
            items: vec![
                Folder::new("Users")
                    .with_child(RequestItem::new(
                        "List users",
                        "GET",
                        UrlField::plain("{{baseUrl}}/v1/users"),
                    ))
                    .with_child(RequestItem::new(
                        "Update user",
                        "POST",
                        UrlField::plain("/v1/users/:id"),
                    ))
                    .into(),
            ],
        }
    }

    fn workspace() -> Workspace {
        Workspace::new("ws-1", "Platform")
    }

    fn context<'a>(
        collection: &'a Collection,
        environment: &'a EnvironmentVariables,
    ) -> ExtractionContext<'a> {
        let summary = CollectionSummary::new(&collection.uid, &collection.name);
        ExtractionContext::new(&summary, &workspace(), &collection.variables, environment)
    }

    #[test]
    fn test_folder_paths_are_accumulated_and_normalized() {
        let collection = users_collection();
        let environment = EnvironmentVariables::new();
        let context = context(&collection, &environment);

        let endpoints = extract_endpoints(&collection.items, &context);
        let paths: Vec<_> = endpoints.iter().map(|e| e.path.as_str()).collect();

        assert_eq!(
            paths,
            vec!["Users/v{version}/users", "Users/v{version}/users/{param}"]
        );
        assert_eq!(endpoints[0].url, "https://api.example.com/v1/users");
        assert_eq!(endpoints[0].original_url, "{{baseUrl}}/v1/users");
        assert_eq!(endpoints[1].method, "POST");
        assert_eq!(endpoints[1].collection_info, SourceRef::new("Users API", "col-1"));
        assert_eq!(endpoints[1].workspace_info, SourceRef::new("Platform", "ws-1"));
    }

    #[test]
    fn test_grouped_under_collection_name() {
        let collection = users_collection();
        let environment = EnvironmentVariables::new();
        let context = context(&collection, &environment);

        let grouped = extract(&collection.items, &context);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped["Users API"].len(), 2);
    }

    #[test]
    fn test_defaults_and_skips() {
        let nameless = RequestItem {
            url: Some(UrlField::raw("https://api.example.com/health")),
            responses: vec![ResponseSample {
                code: None,
                body: Some("ok".to_string()),
                headers: vec![Header::new("Content-Type", "text/plain")],
            }],
            ..RequestItem::default()
        };
        let no_url = RequestItem {
            name: Some("Broken".to_string()),
            ..RequestItem::default()
        };
        let nested = Folder {
            name: None,
            children: vec![
                Folder::new("Admin")
                    .with_child(RequestItem {
                        method: Some("delete".to_string()),
                        auth: Some(AuthDescriptor::new("bearer")),
                        ..RequestItem::new("Purge", "", UrlField::plain("{{host}}/cache/{{key}}"))
                    })
                    .into(),
            ],
        };

        let collection = Collection {
            uid: "col-2".to_string(),
            name: "Ops".to_string(),
            items: vec![nameless.into(), no_url.into(), nested.into()],
            ..Collection::default()
        };
        let environment = EnvironmentVariables::new();
        let context = context(&collection, &environment);

        let endpoints = extract_endpoints(&collection.items, &context);
        assert_eq!(endpoints.len(), 2);

        let health = &endpoints[0];
        assert_eq!(health.name, "GET Endpoint");
        assert_eq!(health.method, "GET");
        assert_eq!(health.path, "/health");
        assert_eq!(health.description, "");
        assert_eq!(health.responses[0].code, 200);
        assert_eq!(health.responses[0].body.as_deref(), Some("ok"));

        let purge = &endpoints[1];
        assert_eq!(purge.method, "DELETE");
        assert_eq!(purge.path, "unnamed/Admin/cache/{param}");
        assert_eq!(purge.url, "{{host}}/cache/{{key}}");
        assert_eq!(purge.auth, Some(AuthDescriptor::new("bearer")));
    }

    #[test]
    fn test_environment_overrides_collection_variables() {
        let collection = users_collection();
        let environment: EnvironmentVariables =
            [("baseUrl", "https://staging.example.com")].into_iter().collect();
        let context = context(&collection, &environment);

        let endpoints = extract_endpoints(&collection.items, &context);
        assert_eq!(endpoints[0].url, "https://staging.example.com/v1/users");
    }

    #[test]
    fn test_empty_tree_yields_nothing() {
        let collection = Collection::default();
        let environment = EnvironmentVariables::new();
        let context = context(&collection, &environment);

        assert!(extract(&collection.items, &context).is_empty());
    }
}
