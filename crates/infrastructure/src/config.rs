//! Configuration management
//!
//! Settings come from an optional `atlas` file (any format the `config`
//! crate recognizes, e.g. `atlas.toml`) overlaid by `ATLAS_*` environment
//! variables.

use std::time::Duration;

use atlas_application::{IngestSettings, RetryPolicy};
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::adapters::DEFAULT_BASE_URL;

/// Ingestion configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Postman API key
    pub api_key: String,
    /// Postman API root
    pub base_url: String,
    /// Per-call timeout (in seconds)
    pub timeout_secs: u64,
    /// Attempts per call, including the first
    pub max_attempts: u32,
    /// Exponential backoff base (in milliseconds)
    pub base_delay_ms: u64,
    /// Upper bound on any retry wait (in milliseconds)
    pub max_delay_ms: u64,
    /// Fixed delay between successive workspace and collection calls (in milliseconds)
    pub pacing_delay_ms: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            max_attempts: 3,
            base_delay_ms: 1000,
            max_delay_ms: 60_000,
            pacing_delay_ms: 1000,
        }
    }
}

/// Error type for configuration loading
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// A source could not be read or deserialized.
    #[error("Configuration source error: {0}")]
    Source(#[from] config::ConfigError),

    /// The loaded values are inconsistent.
    #[error("Configuration validation error: {0}")]
    Validation(String),
}

impl IngestConfig {
    /// Creates a configuration with defaults and the given API key.
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Load configuration from the `atlas` file and `ATLAS_*` variables
    ///
    /// # Errors
    /// Returns an error if a source cannot be read or the result is invalid.
    pub fn load() -> Result<Self, ConfigLoadError> {
        Self::from_builder(Self::sources())
    }

    /// The default source stack; environment variables take precedence.
    #[must_use]
    pub fn sources() -> ConfigBuilder<DefaultState> {
        config::Config::builder()
            .add_source(File::with_name("atlas").required(false))
            .add_source(
                Environment::with_prefix("ATLAS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
    }

    /// Builds and validates a configuration from `builder`.
    ///
    /// # Errors
    /// Returns an error if a source cannot be read or the result is invalid.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigLoadError> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns `ConfigLoadError::Validation` describing the first problem.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "api_key is required (set ATLAS_API_KEY)".to_string(),
            ));
        }

        let url = Url::parse(&self.base_url).map_err(|e| {
            ConfigLoadError::Validation(format!("base_url '{}' is invalid: {e}", self.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigLoadError::Validation(format!(
                "base_url '{}' must use http or https",
                self.base_url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigLoadError::Validation(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.max_attempts == 0 {
            return Err(ConfigLoadError::Validation(
                "max_attempts must be at least 1".to_string(),
            ));
        }

        if self.base_delay_ms > self.max_delay_ms {
            return Err(ConfigLoadError::Validation(
                "base_delay_ms must not exceed max_delay_ms".to_string(),
            ));
        }

        Ok(())
    }

    /// Per-call timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Convert to the runtime `RetryPolicy`
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_millis(self.base_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
        }
    }

    /// Fixed pacing delay.
    #[must_use]
    pub const fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }

    /// Convert to the runtime `IngestSettings`
    #[must_use]
    pub const fn settings(&self) -> IngestSettings {
        IngestSettings {
            retry: self.retry_policy(),
            pacing_delay: self.pacing_delay(),
        }
    }
}
