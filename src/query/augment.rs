//! Query augmentation
//!
//! Splices a nested tag query or a caller-built custom query into a base
//! search request. Only the `query` key is ever replaced.

use super::nested::{NestedQuerySpec, ScoreScript};
use super::request::QueryRequest;
use crate::config::NestedSettings;
use serde_json::Value;
use tracing::{debug, warn};

/// Replaces the base query with a nested or custom query
#[derive(Debug, Clone, Default)]
pub struct QueryAugmenter {
    script: ScoreScript,
}

impl QueryAugmenter {
    pub fn new(settings: &NestedSettings) -> Self {
        Self {
            script: ScoreScript::from(settings),
        }
    }

    pub fn with_script(script: ScoreScript) -> Self {
        Self { script }
    }

    /// Build the nested function-score query for a spec
    pub fn build_nested_query(&self, spec: &NestedQuerySpec) -> Value {
        spec.to_query(&self.script)
    }

    /// Produce the final request.
    ///
    /// A nested spec takes precedence over a custom query. Without either the
    /// base request is returned unchanged.
    pub fn augment(
        &self,
        base: QueryRequest,
        nested: Option<&NestedQuerySpec>,
        custom: Option<&Value>,
    ) -> QueryRequest {
        let custom = custom.filter(|value| is_present(value));

        match (nested, custom) {
            (Some(spec), custom) => {
                if custom.is_some() {
                    warn!("Both nested and custom queries given; using nested on {}", spec.path());
                }
                debug!(
                    "Nested query on {}.{} with {} terms",
                    spec.path(),
                    spec.field(),
                    spec.terms().len()
                );
                base.with_query(self.build_nested_query(spec))
            }
            (None, Some(custom)) => {
                debug!("Using custom query");
                base.with_query(custom.clone())
            }
            (None, None) => base,
        }
    }
}

/// Empty or falsy custom queries count as absent
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::String(s) => !s.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScriptLang;
    use serde_json::json;

    fn base() -> QueryRequest {
        QueryRequest::new()
            .with_query(json!({"query_string": {"query": "rust"}}))
            .with("from", json!(10))
            .with("size", json!(10))
            .with("sort", json!([{"pub_date": {"order": "desc"}}]))
    }

    fn spec() -> NestedQuerySpec {
        NestedQuerySpec::new("tags", "tag", ["a", "b"]).unwrap()
    }

    #[test]
    fn test_no_directives_leaves_request_unchanged() {
        let augmenter = QueryAugmenter::default();
        assert_eq!(augmenter.augment(base(), None, None), base());
    }

    #[test]
    fn test_nested_replaces_query_only() {
        let augmenter = QueryAugmenter::default();
        let result = augmenter.augment(base(), Some(&spec()), None);

        let query = result.query().unwrap();
        assert_eq!(query["nested"]["path"], "tags");
        assert_eq!(query["nested"]["score_mode"], "total");
        let function_score = &query["nested"]["query"]["function_score"];
        assert_eq!(function_score["query"]["terms"]["tag"], json!(["a", "b"]));
        assert_eq!(function_score["boost_mode"], "replace");

        assert_eq!(result.get("from"), Some(&json!(10)));
        assert_eq!(result.get("sort"), base().get("sort"));
    }

    #[test]
    fn test_custom_query_verbatim() {
        let custom = json!({"custom_score": {"query": {"match_all": {}}, "script": "_score * 2"}});
        let result = QueryAugmenter::default().augment(base(), None, Some(&custom));
        assert_eq!(result.query(), Some(&custom));
        assert_eq!(result.get("size"), Some(&json!(10)));
    }

    #[test]
    fn test_nested_wins_over_custom() {
        let custom = json!({"match_all": {}});
        let augmenter = QueryAugmenter::default();
        let result = augmenter.augment(base(), Some(&spec()), Some(&custom));
        assert_eq!(result.query(), Some(&augmenter.build_nested_query(&spec())));
    }

    #[test]
    fn test_empty_custom_query_ignored() {
        let augmenter = QueryAugmenter::default();
        assert_eq!(augmenter.augment(base(), None, Some(&json!({}))), base());
        assert_eq!(augmenter.augment(base(), None, Some(&Value::Null)), base());
        assert_eq!(augmenter.augment(base(), None, Some(&json!([]))), base());
        assert_eq!(augmenter.augment(base(), None, Some(&json!(""))), base());
    }

    #[test]
    fn test_falsy_custom_query_ignored() {
        let augmenter = QueryAugmenter::default();
        assert_eq!(augmenter.augment(base(), None, Some(&json!(false))), base());
        assert_eq!(augmenter.augment(base(), None, Some(&json!(0))), base());
        assert_eq!(augmenter.augment(base(), None, Some(&json!(0.0))), base());
    }

    #[test]
    fn test_configured_script() {
        let settings = NestedSettings {
            points_field: "weight".to_string(),
            script_lang: ScriptLang::Expression,
            ..Default::default()
        };
        let query = QueryAugmenter::new(&settings).build_nested_query(&spec());
        let script_score = &query["nested"]["query"]["function_score"]["script_score"];
        assert_eq!(script_score["lang"], "expression");
        assert_eq!(
            script_score["script"],
            "doc['tags.weight'].empty ? 0 : doc['tags.weight'].value"
        );
    }
}
