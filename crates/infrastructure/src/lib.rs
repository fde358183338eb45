//! Atlas Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer: the Postman API client, the system
//! clock and the tracing observer, plus configuration loading and the
//! `ingest` entry point that composes them.

pub mod adapters;
pub mod config;
pub mod ingest;
pub mod postman;

pub use adapters::{
    API_KEY_HEADER, ClientInitError, DEFAULT_BASE_URL, PostmanApiClient, SystemClock,
    TracingObserver,
};
pub use crate::config::{ConfigLoadError, IngestConfig};
pub use ingest::{AtlasError, ingest, ingest_with_config};
pub use postman::{PostmanCollection, PostmanEnvironment};
