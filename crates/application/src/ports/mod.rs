//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod clock;
mod collection_source;
mod observer;

pub use clock::Clock;
pub use collection_source::{CollectionSource, NetworkFault, SourceError};
pub use observer::{IngestObserver, NoopObserver, RetryNotice, RetryReason};
