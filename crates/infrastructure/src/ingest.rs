//! Ingestion entry points
//!
//! Wires the Postman client, system clock and tracing observer into the
//! application's ingestion use case.

use std::sync::Arc;

use atlas_application::{IngestCollections, IngestError, IngestOutput};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::adapters::{ClientInitError, PostmanApiClient, SystemClock, TracingObserver};
use crate::config::{ConfigLoadError, IngestConfig};

/// Errors returned by the ingestion entry points.
#[derive(Debug, Error)]
pub enum AtlasError {
    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigLoadError),

    /// The API client could not be created.
    #[error(transparent)]
    Client(#[from] ClientInitError),

    /// The run aborted.
    #[error(transparent)]
    Ingest(#[from] IngestError),
}

/// Ingests every collection reachable with `api_key` using default settings.
///
/// # Errors
/// Returns an error if the key is blank or the run aborts.
pub async fn ingest(api_key: impl Into<String>) -> Result<IngestOutput, AtlasError> {
    ingest_with_config(&IngestConfig::with_api_key(api_key), &CancellationToken::new()).await
}

/// Ingests with explicit configuration and cancellation.
///
/// # Errors
/// Returns an error if the configuration is invalid, the client cannot be
/// built, or the run aborts or is cancelled.
pub async fn ingest_with_config(
    config: &IngestConfig,
    cancel: &CancellationToken,
) -> Result<IngestOutput, AtlasError> {
    config.validate()?;

    let client = PostmanApiClient::new(config.api_key.clone(), &config.base_url, config.timeout())?;
    let use_case = IngestCollections::new(
        Arc::new(client),
        config.settings(),
        Arc::new(SystemClock::new()),
        Arc::new(TracingObserver::new()),
    );

    Ok(use_case.execute(cancel).await?)
}
