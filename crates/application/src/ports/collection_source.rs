//! Collection source port
//!
//! Defines the interface to the upstream API platform that owns workspaces,
//! collections and environments.

use async_trait::async_trait;
use std::fmt;

use atlas_domain::{Collection, CollectionSummary, Environment, EnvironmentSummary, Workspace};

/// Transient network fault classes that are always worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkFault {
    /// The peer reset the connection.
    ConnectionReset,
    /// The call did not complete within the timeout.
    TimedOut,
    /// The host name could not be resolved.
    HostNotFound,
    /// The host could not be reached.
    HostUnreachable,
    /// The peer refused the connection.
    ConnectionRefused,
    /// The connection was closed while writing.
    BrokenPipe,
    /// The resolver asked to try again later.
    TryAgain,
}

impl NetworkFault {
    /// Returns the conventional fault code for this class.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConnectionReset => "ECONNRESET",
            Self::TimedOut => "ETIMEDOUT",
            Self::HostNotFound => "ENOTFOUND",
            Self::HostUnreachable => "EHOSTUNREACH",
            Self::ConnectionRefused => "ECONNREFUSED",
            Self::BrokenPipe => "EPIPE",
            Self::TryAgain => "EAI_AGAIN",
        }
    }
}

impl fmt::Display for NetworkFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Failure of a single upstream call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    /// The upstream answered 429.
    #[error("rate limited by upstream: {}", message.as_deref().unwrap_or("no message"))]
    RateLimited {
        /// Human-readable message from the response body, if any
        message: Option<String>,
    },

    /// A transient network fault.
    #[error("network error ({fault}): {message}")]
    Network {
        /// Fault class
        fault: NetworkFault,
        /// Underlying error text
        message: String,
    },

    /// The upstream answered with any other error status.
    #[error("upstream returned HTTP {status}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Parsed JSON body, when the body was JSON
        body: Option<serde_json::Value>,
    },

    /// The response body did not have the expected shape.
    #[error("malformed upstream response: {0}")]
    Decode(String),

    /// The request could not be built or sent for a non-transient reason.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Port for reading the upstream API platform.
///
/// Each method is exactly one outbound call; retrying and pacing are the
/// caller's concern.
#[async_trait]
pub trait CollectionSource: Send + Sync {
    /// Lists all workspaces visible to the credentials.
    ///
    /// # Errors
    /// Returns a `SourceError` classifying the failed call.
    async fn list_workspaces(&self) -> Result<Vec<Workspace>, SourceError>;

    /// Lists the environments of a workspace.
    ///
    /// # Errors
    /// Returns a `SourceError` classifying the failed call.
    async fn list_environments(
        &self,
        workspace_id: &str,
    ) -> Result<Vec<EnvironmentSummary>, SourceError>;

    /// Fetches the full value set of one environment.
    ///
    /// # Errors
    /// Returns a `SourceError` classifying the failed call.
    async fn get_environment(&self, uid: &str) -> Result<Environment, SourceError>;

    /// Lists the collections of a workspace.
    ///
    /// # Errors
    /// Returns a `SourceError` classifying the failed call.
    async fn list_collections(
        &self,
        workspace_id: &str,
    ) -> Result<Vec<CollectionSummary>, SourceError>;

    /// Fetches the full item tree and variables of one collection.
    ///
    /// # Errors
    /// Returns a `SourceError` classifying the failed call.
    async fn get_collection(&self, uid: &str) -> Result<Collection, SourceError>;
}
