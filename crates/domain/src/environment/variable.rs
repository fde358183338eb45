//! Variable types
//!
//! Two variable sources take part in template resolution:
//! collection variables (an ordered list, first match wins) and
//! environment variables (a flat name → value mapping that takes precedence).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single collection-scoped variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// Variable name as referenced by `{{key}}`
    pub key: String,
    /// Variable value, if one is defined
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Variable {
    /// Creates a variable with a value.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// Creates a variable that is declared without a value.
    #[must_use]
    pub fn declared(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }
}

/// Ordered collection-scoped variables.
///
/// Lookup returns the value of the first entry whose key matches; later
/// entries with the same key are shadowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionVariables(Vec<Variable>);

impl CollectionVariables {
    /// Creates an empty variable list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns the value of the first variable named `name`.
    ///
    /// A matching entry without a value yields `None`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|v| v.key == name)
            .and_then(|v| v.value.as_deref())
    }

    /// Returns the number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Variable>> for CollectionVariables {
    fn from(variables: Vec<Variable>) -> Self {
        Self(variables)
    }
}

impl FromIterator<Variable> for CollectionVariables {
    fn from_iter<T: IntoIterator<Item = Variable>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Flat environment variable mapping for a workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvironmentVariables(HashMap<String, String>);

impl EnvironmentVariables {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a variable, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Gets a variable value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Returns the number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvironmentVariables {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A raw environment value entry as defined upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentEntry {
    /// Variable name
    #[serde(default)]
    pub key: Option<String>,
    /// Variable value
    #[serde(default)]
    pub value: Option<String>,
    /// Explicit enablement flag; absent means enabled
    #[serde(default)]
    pub enabled: Option<bool>,
}

impl EnvironmentEntry {
    /// Creates an enabled entry.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
            enabled: None,
        }
    }

    /// Returns the key/value pair if this entry takes part in resolution.
    ///
    /// Entries explicitly disabled, or missing a non-empty key or value,
    /// are ignored.
    #[must_use]
    pub fn usable(&self) -> Option<(&str, &str)> {
        if self.enabled == Some(false) {
            return None;
        }
        match (self.key.as_deref(), self.value.as_deref()) {
            (Some(key), Some(value)) if !key.is_empty() && !value.is_empty() => Some((key, value)),
            _ => None,
        }
    }
}

/// A full environment value set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Upstream unique identifier
    pub uid: String,
    /// Value entries in upstream order
    #[serde(default)]
    pub values: Vec<EnvironmentEntry>,
}
