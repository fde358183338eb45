//! Postman to domain mapping
//!
//! Converts API response DTOs into the domain snapshots consumed by the
//! ingestion pipeline. Unrecognized shapes map to `None` rather than
//! failing the whole collection.

use atlas_domain::{
    AuthDescriptor, Collection, CollectionNode, CollectionSummary, CollectionVariables,
    Environment, EnvironmentEntry, EnvironmentSummary, Folder, Header, RequestItem,
    ResponseSample, UrlField, Variable, Workspace,
};
use serde_json::Value;

use super::environment_types::{PostmanEnvVariable, PostmanEnvironment};
use super::types::{
    CollectionEntry, PostmanCollection, PostmanHeader, PostmanItem, PostmanRequest,
    PostmanRequestField, PostmanResponse, PostmanUrl, PostmanUrlStructured, PostmanVariable,
    WorkspaceEntry,
};

/// Maps a workspace listing entry.
#[must_use]
pub fn map_workspace(entry: WorkspaceEntry) -> Workspace {
    Workspace::new(entry.id, entry.name)
}

/// Maps a collection listing entry.
#[must_use]
pub fn map_collection_summary(entry: CollectionEntry) -> CollectionSummary {
    CollectionSummary::new(entry.uid, entry.name)
}

/// Maps an environment listing entry.
#[must_use]
pub fn map_environment_summary(uid: String) -> EnvironmentSummary {
    EnvironmentSummary::new(uid)
}

/// Maps an environment detail fetched by `uid`.
#[must_use]
pub fn map_environment(uid: &str, environment: PostmanEnvironment) -> Environment {
    Environment {
        uid: uid.to_string(),
        values: environment.values.iter().map(map_env_variable).collect(),
    }
}

fn map_env_variable(variable: &PostmanEnvVariable) -> EnvironmentEntry {
    EnvironmentEntry {
        key: variable.key.clone(),
        value: variable.value.as_ref().and_then(scalar_to_string),
        enabled: variable.enabled,
    }
}

/// Maps a collection detail fetched by `uid`.
#[must_use]
pub fn map_collection(uid: &str, collection: PostmanCollection) -> Collection {
    Collection {
        uid: uid.to_string(),
        name: collection
            .info
            .and_then(|info| info.name)
            .unwrap_or_default(),
        variables: collection.variable.iter().filter_map(map_variable).collect::<CollectionVariables>(),
        items: collection.item.into_iter().filter_map(map_item).collect(),
    }
}

fn map_variable(variable: &PostmanVariable) -> Option<Variable> {
    let key = variable.key.clone()?;
    Some(match variable.value.as_ref().and_then(scalar_to_string) {
        Some(value) => Variable::new(key, value),
        None => Variable::declared(key),
    })
}

/// Maps an item to a folder or request node; items with neither children
/// nor a request are dropped.
#[must_use]
pub fn map_item(item: PostmanItem) -> Option<CollectionNode> {
    if let Some(children) = item.item {
        return Some(
            Folder {
                name: item.name,
                children: children.into_iter().filter_map(map_item).collect(),
            }
            .into(),
        );
    }

    let item_description = item.description.as_ref().and_then(|d| d.text().map(str::to_string));
    let responses = item
        .response
        .unwrap_or_default()
        .into_iter()
        .map(map_response)
        .collect();

    let request = match item.request? {
        PostmanRequestField::Url(url) => RequestItem {
            url: Some(UrlField::Plain(url)),
            ..RequestItem::default()
        },
        PostmanRequestField::Full(request) => map_request(*request),
    };

    Some(
        RequestItem {
            name: item.name,
            description: request.description.or(item_description),
            responses,
            ..request
        }
        .into(),
    )
}

fn map_request(request: PostmanRequest) -> RequestItem {
    RequestItem {
        name: None,
        method: request.method,
        url: request.url.and_then(map_url),
        headers: map_headers(request.header),
        body: request.body,
        description: request
            .description
            .as_ref()
            .and_then(|d| d.text().map(str::to_string)),
        responses: Vec::new(),
        auth: request.auth.map(|auth| AuthDescriptor {
            auth_type: auth.auth_type,
        }),
    }
}

fn map_response(response: PostmanResponse) -> ResponseSample {
    ResponseSample {
        code: response.code,
        body: response.body,
        headers: map_headers(response.header),
    }
}

/// Maps a header list; entries that are not header objects are skipped and
/// any other shape (such as a raw header string) yields no headers.
fn map_headers(headers: Option<Value>) -> Vec<Header> {
    let Some(Value::Array(entries)) = headers else {
        return Vec::new();
    };

    entries
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|entry| serde_json::from_value::<PostmanHeader>(entry).ok())
        .filter_map(|header| {
            Some(Header {
                key: header.key?,
                value: header
                    .value
                    .as_ref()
                    .and_then(scalar_to_string)
                    .unwrap_or_default(),
                disabled: header.disabled.unwrap_or(false),
            })
        })
        .collect()
}

/// Maps a URL field: a string is plain, an object with a non-empty `raw`
/// string is raw-wrapped, an object with `host` and `path` arrays is
/// structured.
#[must_use]
pub fn map_url(url: PostmanUrl) -> Option<UrlField> {
    match url {
        PostmanUrl::Simple(url) => Some(UrlField::Plain(url)),
        PostmanUrl::Structured(structured) => map_structured_url(structured),
        PostmanUrl::Other(_) => None,
    }
}

fn map_structured_url(url: PostmanUrlStructured) -> Option<UrlField> {
    if let Some(Value::String(raw)) = url.raw
        && !raw.is_empty()
    {
        return Some(UrlField::Raw(raw));
    }

    match (url.host, url.path) {
        (Some(Value::Array(host)), Some(Value::Array(path))) => Some(UrlField::Structured {
            protocol: url.protocol,
            host: host.iter().filter_map(scalar_to_string).collect(),
            path: path.iter().filter_map(path_segment).collect(),
        }),
        _ => None,
    }
}

/// Path segments are strings, or `{type, value}` objects in older exports.
fn path_segment(segment: &Value) -> Option<String> {
    match segment {
        Value::Object(map) => map.get("value").and_then(scalar_to_string),
        other => scalar_to_string(other),
    }
}

/// Renders a JSON scalar as a string; `null`, arrays and objects yield `None`.
#[must_use]
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
