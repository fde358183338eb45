//! Postman API wire format
//!
//! Response types of the Postman REST API and their mapping into the
//! domain snapshots.

pub mod environment_types;
pub mod mapper;
pub mod types;

pub use environment_types::PostmanEnvironment;
pub use types::PostmanCollection;
