//! Atlas Domain - Core business types
//!
//! This crate defines the domain model for the Atlas API catalog:
//! the read-only snapshots fetched from the upstream API platform
//! (workspaces, collections, environments) and the values derived from
//! them (endpoints and versioned API assets).
//! All types here are pure Rust with no I/O dependencies.

pub mod asset;
pub mod collection;
pub mod endpoint;
pub mod environment;
pub mod workspace;

pub use asset::{ApiAsset, AssetKind, AssetProperties, EndpointSummary, VersionGroup};
pub use collection::{
    AuthDescriptor, Collection, CollectionNode, Folder, Header, RequestItem, ResponseSample,
    UrlField,
};
pub use endpoint::{Endpoint, EndpointResponse, SourceRef};
pub use environment::{
    CollectionVariables, Environment, EnvironmentEntry, EnvironmentVariables, Variable,
};
pub use workspace::{CollectionSummary, EnvironmentSummary, Workspace};
