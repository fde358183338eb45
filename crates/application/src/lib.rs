//! Atlas Application - Use cases and ports
//!
//! This crate defines the application layer of the API catalog ingester:
//! - Port traits (the upstream collection source, clock, progress observer)
//! - The template variable resolver and URL normalizer
//! - Endpoint extraction over collection trees
//! - The resilient request executor wrapping every upstream call
//! - Use case orchestration (environment aggregation, asset building, ingestion)

pub mod error;
pub mod extraction;
pub mod ports;
pub mod resilience;
pub mod url_normalizer;
pub mod use_cases;
pub mod variable_resolver;

pub use error::{IngestError, IngestResult};
pub use extraction::{ExtractionContext, extract, extract_endpoints, normalize_path};
pub use ports::{
    Clock, CollectionSource, IngestObserver, NetworkFault, NoopObserver, RetryNotice, RetryReason,
    SourceError,
};
pub use resilience::{RequestError, RequestExecutor, RetryPolicy};
pub use url_normalizer::{NormalizedUrl, normalize};
pub use use_cases::{
    BuildAsset, CollectEnvironment, EnrichmentStatus, IngestCollections, IngestOutput,
    IngestSettings, IngestStats, WorkspaceEnvironment,
};
pub use variable_resolver::{MAX_RESOLUTION_DEPTH, VariableResolver};
