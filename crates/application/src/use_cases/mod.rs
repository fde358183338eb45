//! Application use cases (business logic orchestration).

mod build_asset;
mod collect_environment;
mod ingest;

pub use build_asset::{BuildAsset, DEFAULT_VERSION, version_bucket};
pub use collect_environment::{CollectEnvironment, EnrichmentStatus, WorkspaceEnvironment};
pub use ingest::{IngestCollections, IngestOutput, IngestSettings, IngestStats};
