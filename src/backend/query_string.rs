//! Query-string base builder
//!
//! Builds the plain search request the host framework would produce:
//! a `query_string` query against the content field plus pagination,
//! sorting, stored fields, highlighting and term facets.

use super::traits::{BaseQueryBuilder, SearchParams};
use crate::config::BackendSettings;
use crate::error::Result;
use crate::query::QueryRequest;
use serde_json::{json, Map, Value};

/// Content field used when the schema marks none
pub const DEFAULT_CONTENT_FIELD: &str = "text";

/// Base builder issuing `query_string` queries
#[derive(Debug, Clone)]
pub struct QueryStringBuilder {
    content_field: String,
    settings: BackendSettings,
}

impl QueryStringBuilder {
    pub fn new(content_field: impl Into<String>, settings: BackendSettings) -> Self {
        Self {
            content_field: content_field.into(),
            settings,
        }
    }

    pub fn content_field(&self) -> &str {
        &self.content_field
    }

    fn base_query(&self, query_string: &str) -> Value {
        let query_string = query_string.trim();
        if query_string.is_empty() || query_string == self.settings.match_all_query {
            return json!({"match_all": {}});
        }

        json!({
            "query_string": {
                "default_field": self.content_field,
                "default_operator": self.settings.default_operator,
                "query": query_string,
                "analyze_wildcard": true,
                "auto_generate_phrase_queries": true
            }
        })
    }
}

impl Default for QueryStringBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_CONTENT_FIELD, BackendSettings::default())
    }
}

impl BaseQueryBuilder for QueryStringBuilder {
    fn name(&self) -> &str {
        "query_string"
    }

    fn build_search_kwargs(&self, params: &SearchParams) -> Result<QueryRequest> {
        let mut request = QueryRequest::new()
            .with_query(self.base_query(&params.query_string))
            .with("from", json!(params.start_offset));

        if let Some(size) = params.size()? {
            request = request.with("size", json!(size));
        }

        if !params.fields.is_empty() {
            request = request.with("fields", json!(params.fields));
        }

        if !params.sort_by.is_empty() {
            let sort: Vec<Value> = params
                .sort_by
                .iter()
                .map(|s| json!({ s.field.as_str(): { "order": s.order.as_str() } }))
                .collect();
            request = request.with("sort", Value::Array(sort));
        }

        if params.highlight {
            request = request.with(
                "highlight",
                json!({ "fields": { self.content_field.as_str(): { "store": "yes" } } }),
            );
        }

        if !params.facets.is_empty() {
            let mut facets = Map::new();
            for field in &params.facets {
                facets.insert(
                    field.clone(),
                    json!({ "terms": { "field": field, "size": self.settings.facet_size } }),
                );
            }
            request = request.with("facets", Value::Object(facets));
        }

        Ok(request)
    }
}
