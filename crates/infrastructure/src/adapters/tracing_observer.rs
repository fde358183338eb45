//! Observer adapter emitting `tracing` events

use atlas_application::IngestStats;
use atlas_application::ports::{IngestObserver, RetryNotice, RetryReason};
use atlas_domain::{ApiAsset, CollectionSummary, Workspace};

/// Reports pipeline progress as structured log events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TracingObserver {
    /// Creates a new tracing observer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl IngestObserver for TracingObserver {
    fn workspace_started(&self, workspace: &Workspace) {
        tracing::info!(workspace = %workspace.name, id = %workspace.id, "processing workspace");
    }

    fn environment_unavailable(&self, workspace: &Workspace, reason: &str) {
        tracing::warn!(
            workspace = %workspace.name,
            reason,
            "environment variables unavailable, continuing without them"
        );
    }

    fn collection_fetched(&self, workspace: &Workspace, collection: &CollectionSummary, endpoints: usize) {
        tracing::info!(
            workspace = %workspace.name,
            collection = %collection.name,
            endpoints,
            "collection processed"
        );
    }

    fn retry_scheduled(&self, notice: &RetryNotice) {
        let delay_ms = u64::try_from(notice.delay.as_millis()).unwrap_or(u64::MAX);
        match notice.reason {
            RetryReason::RateLimited { hinted } => tracing::warn!(
                operation = %notice.operation,
                attempt = notice.attempt,
                max_attempts = notice.max_attempts,
                delay_ms,
                hinted,
                "rate limited, retrying"
            ),
            RetryReason::Network(fault) => tracing::warn!(
                operation = %notice.operation,
                attempt = notice.attempt,
                max_attempts = notice.max_attempts,
                delay_ms,
                fault = %fault,
                "network error, retrying"
            ),
        }
    }

    fn asset_built(&self, asset: &ApiAsset) {
        tracing::debug!(
            api = %asset.name,
            endpoints = asset.properties.total_endpoints,
            versions = asset.properties.versions.len(),
            "asset built"
        );
    }

    fn ingest_finished(&self, stats: &IngestStats) {
        tracing::info!(
            workspaces = stats.workspaces,
            collections = stats.collections,
            endpoints = stats.endpoints,
            assets = stats.assets,
            degraded_environments = stats.degraded_environments,
            "ingestion finished"
        );
    }
}
