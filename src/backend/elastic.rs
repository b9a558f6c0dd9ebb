//! Configurable Elasticsearch backend
//!
//! Composes a base query builder with the schema compiler and the query
//! augmenter. The base builder produces the plain request; the augmenter
//! then swaps in a nested or custom query when the search asks for one.

use super::query_string::{QueryStringBuilder, DEFAULT_CONTENT_FIELD};
use super::traits::BaseQueryBuilder;
use crate::config::{NestedSettings, Settings};
use crate::error::Result;
use crate::query::{QueryAugmenter, QueryRequest, SearchQuery};
use crate::schema::{CompiledSchema, FieldDescriptor, SchemaCompiler};
use serde_json::{json, Value};
use tracing::debug;

/// Backend producing mapping documents and search request bodies
pub struct ElasticBackend<B: BaseQueryBuilder = QueryStringBuilder> {
    base: B,
    compiler: SchemaCompiler,
    augmenter: QueryAugmenter,
    nested: NestedSettings,
    document_type: String,
}

impl<B: BaseQueryBuilder> ElasticBackend<B> {
    /// Create a backend around a base query builder
    pub fn new(settings: &Settings, base: B) -> Self {
        Self {
            base,
            compiler: SchemaCompiler::new(settings.schema.clone()),
            augmenter: QueryAugmenter::new(&settings.nested),
            nested: settings.nested.clone(),
            document_type: settings.backend.document_type.clone(),
        }
    }

    pub fn base(&self) -> &B {
        &self.base
    }

    /// Start a query using the configured nested defaults
    pub fn query(&self, query_string: impl Into<String>) -> SearchQuery {
        SearchQuery::new(query_string)
            .with_nested_defaults(&self.nested.default_path, &self.nested.default_field)
    }

    /// Compile declared fields into a mapping
    pub fn build_schema<'a, I>(&self, fields: I) -> Result<CompiledSchema>
    where
        I: IntoIterator<Item = (&'a str, &'a FieldDescriptor)>,
    {
        self.compiler.compile(fields)
    }

    /// Mapping document registered under the configured document type
    pub fn mapping_document(&self, schema: &CompiledSchema) -> Result<Value> {
        Ok(json!({
            self.document_type.as_str(): {
                "properties": schema.properties()?
            }
        }))
    }

    /// Build the final search request body
    pub fn build_search_kwargs(&self, query: &SearchQuery) -> Result<QueryRequest> {
        let base = self.base.build_search_kwargs(query.build_params())?;
        debug!("Base request built by {}", self.base.name());
        Ok(self
            .augmenter
            .augment(base, query.nested_spec(), query.custom()))
    }
}

impl ElasticBackend<QueryStringBuilder> {
    /// Backend whose base queries target the schema's content field
    pub fn for_schema(settings: &Settings, schema: &CompiledSchema) -> Self {
        let content_field = schema
            .content_field
            .as_deref()
            .unwrap_or(DEFAULT_CONTENT_FIELD);
        Self::new(
            settings,
            QueryStringBuilder::new(content_field, settings.backend.clone()),
        )
    }
}

impl Default for ElasticBackend<QueryStringBuilder> {
    fn default() -> Self {
        Self::new(&Settings::default(), QueryStringBuilder::default())
    }
}
