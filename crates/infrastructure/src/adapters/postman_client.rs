//! Postman API client implementation using reqwest.
//!
//! This adapter implements the `CollectionSource` port against the Postman
//! REST API. Each port method is exactly one GET request; retries belong to
//! the application's request executor, so this client only classifies
//! failures.

use std::error::Error as StdError;
use std::io;
use std::time::Duration;

use async_trait::async_trait;
use atlas_application::ports::{CollectionSource, NetworkFault, SourceError};
use atlas_domain::{Collection, CollectionSummary, Environment, EnvironmentSummary, Workspace};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::postman::mapper;
use crate::postman::types::{
    CollectionResponse, CollectionsResponse, EnvironmentResponse, EnvironmentsResponse,
    WorkspacesResponse,
};

/// Header carrying the Postman API key.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Default Postman API root.
pub const DEFAULT_BASE_URL: &str = "https://api.getpostman.com";

/// Errors creating a [`PostmanApiClient`].
#[derive(Debug, Error)]
pub enum ClientInitError {
    /// The base URL is not an absolute http(s) URL.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected URL
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Postman API client.
///
/// Wraps `reqwest::Client` with the API key, base URL and per-call timeout.
#[derive(Debug, Clone)]
pub struct PostmanApiClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl PostmanApiClient {
    /// Creates a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the client cannot be
    /// created.
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ClientInitError> {
        let client = Client::builder()
            .user_agent(concat!("Atlas/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Self::with_client(client, api_key, base_url)
    }

    /// Creates a new client around a custom reqwest client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn with_client(
        client: Client,
        api_key: impl Into<String>,
        base_url: &str,
    ) -> Result<Self, ClientInitError> {
        let invalid = |reason: String| ClientInitError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };
        let base_url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(invalid("expected an absolute http(s) URL".to_string()));
        }

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Builds the URL for `segments` below the base URL.
    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, SourceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| SourceError::Transport(format!("cannot extend {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Sends one GET request and decodes a 2xx body.
    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T, SourceError> {
        let url = self.endpoint(segments, query)?;
        tracing::debug!(url = %url, "GET");

        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(map_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_error)?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "response");

        if status.is_success() {
            return serde_json::from_slice(&body).map_err(|e| SourceError::Decode(e.to_string()));
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::RateLimited {
                message: rate_limit_message(&body),
            });
        }

        Err(SourceError::Api {
            status: status.as_u16(),
            body: serde_json::from_slice(&body).ok(),
        })
    }
}

#[async_trait]
impl CollectionSource for PostmanApiClient {
    async fn list_workspaces(&self) -> Result<Vec<Workspace>, SourceError> {
        let response: WorkspacesResponse = self.get(&["workspaces"], &[]).await?;
        Ok(response
            .workspaces
            .into_iter()
            .map(mapper::map_workspace)
            .collect())
    }

    async fn list_environments(
        &self,
        workspace_id: &str,
    ) -> Result<Vec<EnvironmentSummary>, SourceError> {
        let response: EnvironmentsResponse = self
            .get(&["environments"], &[("workspace", workspace_id)])
            .await?;
        Ok(response
            .environments
            .into_iter()
            .map(|entry| mapper::map_environment_summary(entry.uid))
            .collect())
    }

    async fn get_environment(&self, uid: &str) -> Result<Environment, SourceError> {
        let response: EnvironmentResponse = self.get(&["environments", uid], &[]).await?;
        Ok(mapper::map_environment(uid, response.environment))
    }

    async fn list_collections(
        &self,
        workspace_id: &str,
    ) -> Result<Vec<CollectionSummary>, SourceError> {
        let response: CollectionsResponse = self
            .get(&["collections"], &[("workspace", workspace_id)])
            .await?;
        Ok(response
            .collections
            .into_iter()
            .map(mapper::map_collection_summary)
            .collect())
    }

    async fn get_collection(&self, uid: &str) -> Result<Collection, SourceError> {
        let response: CollectionResponse = self.get(&["collections", uid], &[]).await?;
        Ok(mapper::map_collection(uid, response.collection))
    }
}

/// Extracts the human-readable message of a 429 body.
fn rate_limit_message(body: &[u8]) -> Option<String> {
    let Ok(json) = serde_json::from_slice::<Value>(body) else {
        let text = String::from_utf8_lossy(body).trim().to_string();
        return (!text.is_empty()).then_some(text);
    };

    [
        json.pointer("/error/message"),
        json.get("message"),
        json.get("error"),
    ]
    .into_iter()
    .flatten()
    .find_map(Value::as_str)
    .map(str::to_string)
}

/// Maps reqwest errors to a `SourceError`.
fn map_error(error: reqwest::Error) -> SourceError {
    let message = error_chain(&error);

    if let Some(fault) = network_fault(&error, &message) {
        return SourceError::Network { fault, message };
    }

    if error.is_decode() {
        return SourceError::Decode(message);
    }

    SourceError::Transport(message)
}

/// Joins an error and its sources into one message.
fn error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn network_fault(error: &reqwest::Error, message: &str) -> Option<NetworkFault> {
    if error.is_timeout() {
        return Some(NetworkFault::TimedOut);
    }

    let mut source = error.source();
    while let Some(cause) = source {
        if let Some(fault) = cause.downcast_ref::<io::Error>().and_then(|e| fault_from_io(e.kind())) {
            return Some(fault);
        }
        source = cause.source();
    }

    fault_from_message(message)
}

const fn fault_from_io(kind: io::ErrorKind) -> Option<NetworkFault> {
    match kind {
        io::ErrorKind::ConnectionReset | io::ErrorKind::ConnectionAborted => {
            Some(NetworkFault::ConnectionReset)
        }
        io::ErrorKind::TimedOut => Some(NetworkFault::TimedOut),
        io::ErrorKind::ConnectionRefused => Some(NetworkFault::ConnectionRefused),
        io::ErrorKind::BrokenPipe => Some(NetworkFault::BrokenPipe),
        io::ErrorKind::HostUnreachable | io::ErrorKind::NetworkUnreachable => {
            Some(NetworkFault::HostUnreachable)
        }
        _ => None,
    }
}

/// Classifies resolver and socket failures that only surface as text.
fn fault_from_message(message: &str) -> Option<NetworkFault> {
    const PATTERNS: &[(&str, NetworkFault)] = &[
        ("temporary failure in name resolution", NetworkFault::TryAgain),
        ("try again", NetworkFault::TryAgain),
        ("failed to lookup address", NetworkFault::HostNotFound),
        ("name or service not known", NetworkFault::HostNotFound),
        ("no such host", NetworkFault::HostNotFound),
        ("dns error", NetworkFault::HostNotFound),
        ("connection refused", NetworkFault::ConnectionRefused),
        ("connection reset", NetworkFault::ConnectionReset),
        ("broken pipe", NetworkFault::BrokenPipe),
        ("host unreachable", NetworkFault::HostUnreachable),
        ("no route to host", NetworkFault::HostUnreachable),
        ("network is unreachable", NetworkFault::HostUnreachable),
        ("timed out", NetworkFault::TimedOut),
    ];

    let lower = message.to_lowercase();
    PATTERNS
        .iter()
        .find(|(pattern, _)| lower.contains(pattern))
        .map(|(_, fault)| *fault)
}
