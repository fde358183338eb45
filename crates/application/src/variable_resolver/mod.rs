//! Variable resolution module
//!
//! Provides parsing and resolution of `{{variable}}` syntax in strings.
//!
//! # Usage
//!
//! ```
//! use atlas_application::variable_resolver::VariableResolver;
//! use atlas_domain::{CollectionVariables, EnvironmentVariables, Variable};
//!
//! let collection = CollectionVariables::from(vec![Variable::new("host", "localhost")]);
//! let environment = EnvironmentVariables::new();
//!
//! let resolver = VariableResolver::new(&collection, &environment);
//! assert_eq!(resolver.resolve("http://{{host}}/api"), "http://localhost/api");
//! ```

pub mod engine;
pub mod parser;

pub use engine::{MAX_RESOLUTION_DEPTH, VariableResolver};
pub use parser::{VariableReference, has_variables, parse_variables};
