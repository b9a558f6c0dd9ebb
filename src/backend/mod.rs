//! Search backend module
//!
//! Defines the base query builder seam and the configurable Elasticsearch
//! backend built on it.

mod elastic;
mod query_string;
mod traits;

pub use elastic::ElasticBackend;
pub use query_string::{QueryStringBuilder, DEFAULT_CONTENT_FIELD};
pub use traits::*;
