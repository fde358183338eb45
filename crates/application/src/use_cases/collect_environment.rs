//! Collect environment variables use case

use std::sync::Arc;

use atlas_domain::{EnvironmentEntry, EnvironmentVariables};
use tokio_util::sync::CancellationToken;

use crate::error::{IngestError, IngestResult};
use crate::ports::CollectionSource;
use crate::resilience::{RequestError, RequestExecutor};

/// Whether a workspace's environment variables were fully collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichmentStatus {
    /// Every environment was fetched.
    Complete,
    /// A fetch failed; the variable set is empty.
    Unavailable {
        /// Description of the failure
        reason: String,
    },
}

/// Merged environment variables of one workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceEnvironment {
    /// Merged variables, later environments overriding earlier ones
    pub variables: EnvironmentVariables,
    /// Collection outcome
    pub status: EnrichmentStatus,
}

impl WorkspaceEnvironment {
    /// Returns true when enrichment failed and the set was left empty.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self.status, EnrichmentStatus::Unavailable { .. })
    }
}

/// Fetches and merges all environments of a workspace.
///
/// Enrichment is best effort: any failure other than cancellation yields an
/// empty set marked [`EnrichmentStatus::Unavailable`].
pub struct CollectEnvironment<S: ?Sized> {
    source: Arc<S>,
    executor: Arc<RequestExecutor>,
}

impl<S: CollectionSource + ?Sized> CollectEnvironment<S> {
    /// Creates a new `CollectEnvironment` use case.
    #[must_use]
    pub const fn new(source: Arc<S>, executor: Arc<RequestExecutor>) -> Self {
        Self { source, executor }
    }

    /// Executes the use case.
    ///
    /// # Errors
    /// Returns `IngestError::Cancelled` if `cancel` fires; no other failure
    /// is propagated.
    pub async fn execute(
        &self,
        workspace_id: &str,
        cancel: &CancellationToken,
    ) -> IngestResult<WorkspaceEnvironment> {
        match self.fetch(workspace_id, cancel).await {
            Ok(variables) => Ok(WorkspaceEnvironment {
                variables,
                status: EnrichmentStatus::Complete,
            }),
            Err(RequestError::Cancelled) => Err(IngestError::Cancelled),
            Err(error) => Ok(WorkspaceEnvironment {
                variables: EnvironmentVariables::new(),
                status: EnrichmentStatus::Unavailable {
                    reason: error.to_string(),
                },
            }),
        }
    }

    async fn fetch(
        &self,
        workspace_id: &str,
        cancel: &CancellationToken,
    ) -> Result<EnvironmentVariables, RequestError> {
        let summaries = self
            .executor
            .execute("list environments", cancel, || {
                self.source.list_environments(workspace_id)
            })
            .await?;

        let mut variables = EnvironmentVariables::new();
        for summary in &summaries {
            let environment = self
                .executor
                .execute("get environment", cancel, || {
                    self.source.get_environment(&summary.uid)
                })
                .await?;

            for (key, value) in environment.values.iter().filter_map(EnvironmentEntry::usable) {
                variables.insert(key, value);
            }
        }

        Ok(variables)
    }
}
