//! Request URL shapes
//!
//! The upstream platform stores a request URL in one of three forms.

use serde::{Deserialize, Serialize};

/// A request URL in one of the recognized source shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "value", rename_all = "snake_case")]
pub enum UrlField {
    /// A bare URL string.
    Plain(String),
    /// An object wrapping the URL in a raw-string field.
    Raw(String),
    /// Parallel host and path segment arrays.
    Structured {
        /// Scheme, `https` when absent
        protocol: Option<String>,
        /// Host labels, joined with `.`
        host: Vec<String>,
        /// Path segments, joined with `/`
        path: Vec<String>,
    },
}

impl UrlField {
    /// Creates a plain string URL.
    #[must_use]
    pub fn plain(url: impl Into<String>) -> Self {
        Self::Plain(url.into())
    }

    /// Creates a raw-wrapped URL.
    #[must_use]
    pub fn raw(url: impl Into<String>) -> Self {
        Self::Raw(url.into())
    }

    /// Creates a structured URL from host labels and path segments.
    #[must_use]
    pub fn structured<H, P>(protocol: Option<&str>, host: H, path: P) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self::Structured {
            protocol: protocol.map(str::to_string),
            host: host.into_iter().map(Into::into).collect(),
            path: path.into_iter().map(Into::into).collect(),
        }
    }
}
