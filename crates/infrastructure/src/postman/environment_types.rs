//! Postman Environment Type Definitions
//!
//! This module defines the environment detail returned by the Postman API.

use serde::Deserialize;
use serde_json::Value;

/// An environment value set
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostmanEnvironment {
    /// Environment variables
    #[serde(default)]
    pub values: Vec<PostmanEnvVariable>,
}

/// Postman environment variable
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostmanEnvVariable {
    /// Variable key/name
    #[serde(default)]
    pub key: Option<String>,
    /// Variable value; scalars other than strings occur in the wild
    #[serde(default)]
    pub value: Option<Value>,
    /// Whether the variable is enabled; absent means enabled
    #[serde(default)]
    pub enabled: Option<bool>,
}
