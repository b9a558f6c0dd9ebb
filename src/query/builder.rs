//! Search query builder
//!
//! An immutable builder collecting the base search parameters plus the
//! nested and custom query directives. Every call returns a new value.

use super::nested::NestedQuerySpec;
use crate::backend::{SearchParams, SortField};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default nested block searched by [`SearchQuery::nested`]
pub const DEFAULT_NESTED_PATH: &str = "tags";

/// Default term field searched by [`SearchQuery::nested`]
pub const DEFAULT_NESTED_FIELD: &str = "tag";

/// Complete search query with all parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    params: SearchParams,
    nested: Option<NestedQuerySpec>,
    custom_query: Option<Value>,
    nested_path: String,
    nested_field: String,
}

impl SearchQuery {
    /// Create a query for a query string
    pub fn new(query_string: impl Into<String>) -> Self {
        Self {
            params: SearchParams::new(query_string),
            nested: None,
            custom_query: None,
            nested_path: DEFAULT_NESTED_PATH.to_string(),
            nested_field: DEFAULT_NESTED_FIELD.to_string(),
        }
    }

    /// Set the path and field used by [`SearchQuery::nested`]
    pub fn with_nested_defaults(
        mut self,
        path: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        self.nested_path = path.into();
        self.nested_field = field.into();
        self
    }

    /// Score by nested tags matching any of `terms`, using the default
    /// path and field
    pub fn nested<I, T>(self, terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let path = self.nested_path.clone();
        let field = self.nested_field.clone();
        self.nested_at(path, field, terms)
    }

    /// Score by nested elements at `path` whose `field` matches any of `terms`
    pub fn nested_at<I, T>(
        mut self,
        path: impl Into<String>,
        field: impl Into<String>,
        terms: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.nested = Some(NestedQuerySpec::new(path, field, terms)?);
        Ok(self)
    }

    /// Use a validated nested spec
    pub fn with_nested_spec(mut self, spec: NestedQuerySpec) -> Self {
        self.nested = Some(spec);
        self
    }

    /// Replace the query with a pre-built engine query
    pub fn custom_query(mut self, query: Value) -> Self {
        self.custom_query = Some(query);
        self
    }

    pub fn with_sort(mut self, sort: SortField) -> Self {
        self.params.sort_by.push(sort);
        self
    }

    /// Restrict results to `[start, end)`
    pub fn with_range(mut self, start: usize, end: usize) -> Self {
        self.params.start_offset = start;
        self.params.end_offset = Some(end);
        self
    }

    /// Skip the first `start` results without bounding the page
    pub fn with_start(mut self, start: usize) -> Self {
        self.params.start_offset = start;
        self.params.end_offset = None;
        self
    }

    pub fn with_fields<I, T>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.params.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_highlight(mut self, highlight: bool) -> Self {
        self.params.highlight = highlight;
        self
    }

    pub fn with_facet(mut self, field: impl Into<String>) -> Self {
        self.params.facets.push(field.into());
        self
    }

    /// Parameters handed to the base query builder
    pub fn build_params(&self) -> &SearchParams {
        &self.params
    }

    pub fn nested_spec(&self) -> Option<&NestedQuerySpec> {
        self.nested.as_ref()
    }

    pub fn custom(&self) -> Option<&Value> {
        self.custom_query.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_uses_defaults() {
        let query = SearchQuery::new("*:*").nested(["rust", "search"]).unwrap();
        let spec = query.nested_spec().unwrap();
        assert_eq!(spec.path(), "tags");
        assert_eq!(spec.field(), "tag");
        assert_eq!(spec.terms().len(), 2);
    }

    #[test]
    fn test_nested_defaults_override() {
        let query = SearchQuery::new("*:*")
            .with_nested_defaults("labels", "label")
            .nested(["x"])
            .unwrap();
        assert_eq!(query.nested_spec().unwrap().path(), "labels");
    }

    #[test]
    fn test_builder_is_immutable() {
        let base = SearchQuery::new("rust");
        let custom = base.clone().custom_query(json!({"match_all": {}}));
        let paged = base.clone().with_range(10, 20).with_facet("author");

        assert!(base.custom().is_none());
        assert_eq!(base.build_params().end_offset, None);
        assert!(custom.custom().is_some());
        assert_eq!(paged.build_params().end_offset, Some(20));
        assert_eq!(paged.build_params().facets, vec!["author".to_string()]);
        assert!(paged.custom().is_none());
    }

    #[test]
    fn test_start_only_offset() {
        let query = SearchQuery::new("rust").with_range(5, 15).with_start(30);
        assert_eq!(query.build_params().start_offset, 30);
        assert_eq!(query.build_params().end_offset, None);
        assert_eq!(query.build_params().size().unwrap(), None);
    }

    #[test]
    fn test_invalid_nested_fails_fast() {
        let empty: Vec<String> = Vec::new();
        assert!(SearchQuery::new("rust").nested(empty).is_err());
        assert!(SearchQuery::new("rust").nested_at("", "tag", ["a"]).is_err());
    }
}
