//! Ingest collections use case
//!
//! Drives the whole pipeline: workspaces, then per workspace its
//! environments and collections, then per collection its item tree. Calls
//! are strictly sequential and every one goes through the
//! [`RequestExecutor`]. Endpoints accumulate by API name and are turned into
//! assets once everything has been walked.

use std::sync::Arc;
use std::time::Duration;

use atlas_domain::{ApiAsset, Endpoint};
use indexmap::IndexMap;
use tokio_util::sync::CancellationToken;

use super::build_asset::BuildAsset;
use super::collect_environment::{CollectEnvironment, EnrichmentStatus};
use crate::error::{IngestError, IngestResult};
use crate::extraction::{ExtractionContext, extract};
use crate::ports::{Clock, CollectionSource, IngestObserver};
use crate::resilience::{RequestExecutor, RetryPolicy};

/// Runtime settings of an ingestion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestSettings {
    /// Retry budget applied to every upstream call
    pub retry: RetryPolicy,
    /// Fixed delay between successive workspace and collection calls
    pub pacing_delay: Duration,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            pacing_delay: Duration::from_millis(1000),
        }
    }
}

/// Counters describing a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Workspaces processed
    pub workspaces: usize,
    /// Collections fetched and walked
    pub collections: usize,
    /// Endpoints extracted
    pub endpoints: usize,
    /// Workspaces whose environment variables could not be fetched
    pub degraded_environments: usize,
    /// Assets built
    pub assets: usize,
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOutput {
    /// One asset per API name
    pub assets: Vec<ApiAsset>,
    /// Run counters
    pub stats: IngestStats,
}

/// Ingests every collection visible to the source into API assets.
pub struct IngestCollections<S: ?Sized> {
    source: Arc<S>,
    executor: Arc<RequestExecutor>,
    environment: CollectEnvironment<S>,
    build_asset: BuildAsset,
    observer: Arc<dyn IngestObserver>,
    pacing_delay: Duration,
}

impl<S: CollectionSource + ?Sized> IngestCollections<S> {
    /// Creates a new `IngestCollections` use case.
    #[must_use]
    pub fn new(
        source: Arc<S>,
        settings: IngestSettings,
        clock: Arc<dyn Clock>,
        observer: Arc<dyn IngestObserver>,
    ) -> Self {
        let executor = Arc::new(RequestExecutor::new(
            settings.retry,
            Arc::clone(&clock),
            Arc::clone(&observer),
        ));
        Self {
            environment: CollectEnvironment::new(Arc::clone(&source), Arc::clone(&executor)),
            build_asset: BuildAsset::new(clock),
            source,
            executor,
            observer,
            pacing_delay: settings.pacing_delay,
        }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Any unrecovered upstream failure aborts the run:
    /// - `IngestError::Upstream` when the failure carries an API status
    /// - `IngestError::Request` for exhausted retries and other faults
    /// - `IngestError::Cancelled` if `cancel` fires
    pub async fn execute(&self, cancel: &CancellationToken) -> IngestResult<IngestOutput> {
        let workspaces = self
            .executor
            .execute("list workspaces", cancel, || self.source.list_workspaces())
            .await?;

        let mut stats = IngestStats::default();
        let mut grouped: IndexMap<String, Vec<Endpoint>> = IndexMap::new();

        for (index, workspace) in workspaces.iter().enumerate() {
            if index > 0 {
                self.pace(cancel).await?;
            }
            self.observer.workspace_started(workspace);
            stats.workspaces += 1;

            let environment = self.environment.execute(&workspace.id, cancel).await?;
            if let EnrichmentStatus::Unavailable { reason } = &environment.status {
                self.observer.environment_unavailable(workspace, reason);
                stats.degraded_environments += 1;
            }

            self.pace(cancel).await?;
            let collections = self
                .executor
                .execute("list collections", cancel, || {
                    self.source.list_collections(&workspace.id)
                })
                .await?;

            for (index, summary) in collections.iter().enumerate() {
                if index > 0 {
                    self.pace(cancel).await?;
                }
                let collection = self
                    .executor
                    .execute("get collection", cancel, || {
                        self.source.get_collection(&summary.uid)
                    })
                    .await?;

                let context = ExtractionContext::new(
                    summary,
                    workspace,
                    &collection.variables,
                    &environment.variables,
                );
                let extracted = extract(&collection.items, &context);
                let count: usize = extracted.values().map(Vec::len).sum();

                self.observer.collection_fetched(workspace, summary, count);
                stats.collections += 1;
                stats.endpoints += count;

                for (api_name, endpoints) in extracted {
                    grouped.entry(api_name).or_default().extend(endpoints);
                }
            }
        }

        let assets: Vec<ApiAsset> = grouped
            .iter()
            .filter_map(|(api_name, endpoints)| self.build_asset.execute(api_name, endpoints))
            .inspect(|asset| self.observer.asset_built(asset))
            .collect();

        stats.assets = assets.len();
        self.observer.ingest_finished(&stats);

        Ok(IngestOutput { assets, stats })
    }

    async fn pace(&self, cancel: &CancellationToken) -> IngestResult<()> {
        if self.pacing_delay.is_zero() {
            return Ok(());
        }
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(IngestError::Cancelled),
            () = tokio::time::sleep(self.pacing_delay) => Ok(()),
        }
    }
}
