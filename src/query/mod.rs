//! Query module
//!
//! Builds search requests and splices nested tag queries or custom queries
//! into them.

mod augment;
mod builder;
mod nested;
mod request;

pub use augment::QueryAugmenter;
pub use builder::{SearchQuery, DEFAULT_NESTED_FIELD, DEFAULT_NESTED_PATH};
pub(crate) use nested::is_field_path;
pub use nested::{NestedParts, NestedQuerySpec, ScoreScript};
pub use request::QueryRequest;
