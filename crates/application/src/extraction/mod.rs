//! Endpoint extraction
//!
//! Walks a collection tree depth-first and turns every request with a
//! resolvable URL into an [`Endpoint`](atlas_domain::Endpoint) carrying a
//! normalized path template.

mod extractor;
mod path;

pub use extractor::{ExtractionContext, extract, extract_endpoints};
pub use path::{PARAM_TOKEN, VERSION_TOKEN, normalize_path, url_path};
