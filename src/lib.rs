//! Elastic-Backend: a configurable Elasticsearch binding
//!
//! Compiles declared index fields into Elasticsearch mapping documents and
//! builds search request bodies. A search can carry a nested tag query that
//! is scored by summed per-tag points, or a raw custom query.
//!
//! Both the schema compiler and the query augmenter are pure transforms.
//! Sending the resulting documents to a cluster is left to the caller.

pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod query;
pub mod schema;

pub use backend::{BaseQueryBuilder, ElasticBackend, QueryStringBuilder, SearchParams};
pub use config::Settings;
pub use error::{Error, Result};
pub use query::{NestedQuerySpec, QueryAugmenter, QueryRequest, SearchQuery};
pub use schema::{CompiledSchema, FieldDescriptor, FieldMapping, FieldType, SchemaCompiler};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
