//! Collection tree types

mod item;
mod url;

pub use item::{AuthDescriptor, Collection, CollectionNode, Folder, Header, RequestItem, ResponseSample};
pub use url::UrlField;
