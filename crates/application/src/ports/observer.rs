//! Ingestion observer port
//!
//! The pipeline reports its checkpoints here instead of logging directly.
//! Every method has an empty default body so observers only implement what
//! they care about.

use std::time::Duration;

use atlas_domain::{ApiAsset, CollectionSummary, Workspace};

use super::NetworkFault;
use crate::use_cases::IngestStats;

/// Why a call is about to be retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryReason {
    /// The upstream answered 429.
    RateLimited {
        /// Whether the delay came from the server's retry hint
        hinted: bool,
    },
    /// A transient network fault.
    Network(NetworkFault),
}

/// A retry decision made by the request executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryNotice {
    /// Name of the upstream operation being retried
    pub operation: String,
    /// Number of attempts made so far
    pub attempt: u32,
    /// Attempt budget
    pub max_attempts: u32,
    /// Wait before the next attempt
    pub delay: Duration,
    /// Failure class that triggered the retry
    pub reason: RetryReason,
}

/// Receives pipeline progress events.
pub trait IngestObserver: Send + Sync {
    /// A workspace is about to be processed.
    fn workspace_started(&self, _workspace: &Workspace) {}

    /// Environment variables for a workspace could not be fetched; the
    /// workspace continues with an empty variable set.
    fn environment_unavailable(&self, _workspace: &Workspace, _reason: &str) {}

    /// A collection was fetched and walked.
    fn collection_fetched(
        &self,
        _workspace: &Workspace,
        _collection: &CollectionSummary,
        _endpoints: usize,
    ) {
    }

    /// An upstream call failed and will be retried.
    fn retry_scheduled(&self, _notice: &RetryNotice) {}

    /// An asset was built for an API name.
    fn asset_built(&self, _asset: &ApiAsset) {}

    /// The run completed.
    fn ingest_finished(&self, _stats: &IngestStats) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl IngestObserver for NoopObserver {}
