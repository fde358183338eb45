//! Application error types

use thiserror::Error;

use crate::ports::SourceError;
use crate::resilience::RequestError;

/// Message used when an upstream error body does not carry one.
pub const GENERIC_UPSTREAM_MESSAGE: &str = "Postman API request failed";

/// Errors that abort an ingestion run.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The upstream rejected a call with an error status.
    #[error("upstream API error (HTTP {status}): {message}")]
    Upstream {
        /// HTTP status code
        status: u16,
        /// Message from the error body, or a generic fallback
        message: String,
    },

    /// Any other unrecovered request failure, unchanged.
    #[error(transparent)]
    Request(RequestError),

    /// The run was cancelled.
    #[error("ingestion cancelled")]
    Cancelled,
}

impl From<RequestError> for IngestError {
    fn from(error: RequestError) -> Self {
        match error {
            RequestError::Cancelled => Self::Cancelled,
            RequestError::Rejected(SourceError::Api { status, body }) => Self::Upstream {
                status,
                message: body
                    .as_ref()
                    .and_then(api_error_message)
                    .unwrap_or_else(|| GENERIC_UPSTREAM_MESSAGE.to_string()),
            },
            other => Self::Request(other),
        }
    }
}

/// Extracts `error.message` from an upstream error body.
fn api_error_message(body: &serde_json::Value) -> Option<String> {
    body.get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

/// Result type alias for ingestion operations.
pub type IngestResult<T> = Result<T, IngestError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::ports::NetworkFault;
    use serde_json::json;

    #[test]
    fn test_api_error_with_structured_body() {
        let error = IngestError::from(RequestError::Rejected(SourceError::Api {
            status: 401,
            body: Some(json!({
                "error": {"name": "AuthenticationError", "message": "Invalid API Key."}
            })),
        }));
        match error {
            IngestError::Upstream { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid API Key.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_api_error_without_expected_shape() {
        let error = IngestError::from(RequestError::Rejected(SourceError::Api {
            status: 502,
            body: Some(json!({"detail": "bad gateway"})),
        }));
        assert!(matches!(
            error,
            IngestError::Upstream { status: 502, ref message } if message == GENERIC_UPSTREAM_MESSAGE
        ));
    }

    #[test]
    fn test_other_errors_pass_through() {
        let error = IngestError::from(RequestError::RateLimitExceeded { attempts: 3 });
        assert!(matches!(
            error,
            IngestError::Request(RequestError::RateLimitExceeded { attempts: 3 })
        ));

        let error = IngestError::from(RequestError::Network {
            fault: NetworkFault::ConnectionReset,
            attempts: 3,
            source: SourceError::Network {
                fault: NetworkFault::ConnectionReset,
                message: "reset".to_string(),
            },
        });
        assert!(error.to_string().contains("ECONNRESET"));

        let error = IngestError::from(RequestError::Rejected(SourceError::Decode(
            "missing field `workspaces`".to_string(),
        )));
        assert!(matches!(
            error,
            IngestError::Request(RequestError::Rejected(SourceError::Decode(_)))
        ));

        assert!(matches!(
            IngestError::from(RequestError::Cancelled),
            IngestError::Cancelled
        ));
    }
}
