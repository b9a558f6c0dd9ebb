//! Search request payload

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Search request body sent to the engine.
///
/// Opaque apart from its `query` key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryRequest {
    body: Map<String, Value>,
}

impl QueryRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing JSON body, which must be an object
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(body) => Ok(Self { body }),
            other => Err(Error::invalid_request(format!(
                "search request must be a JSON object, got {}",
                other
            ))),
        }
    }

    /// Replace the `query` key
    pub fn with_query(self, query: Value) -> Self {
        self.with("query", query)
    }

    /// Set any top-level key
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.body.insert(key.into(), value);
        self
    }

    pub fn query(&self) -> Option<&Value> {
        self.body.get("query")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }

    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_requires_object() {
        assert!(QueryRequest::from_value(json!({"query": {"match_all": {}}})).is_ok());
        assert!(matches!(
            QueryRequest::from_value(json!([1, 2])),
            Err(Error::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_with_query_keeps_other_keys() {
        let request = QueryRequest::new()
            .with("from", json!(0))
            .with("size", json!(20))
            .with_query(json!({"match_all": {}}));

        assert_eq!(request.get("size"), Some(&json!(20)));
        assert_eq!(
            request.into_value(),
            json!({"from": 0, "size": 20, "query": {"match_all": {}}})
        );
    }
}
