//! Native field mapping types
//!
//! These serialize to the engine's mapping dialect exactly, so the enum
//! variant names below are not free to change.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Engine-side field type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingType {
    /// Full-text string field
    #[serde(rename = "string")]
    Text,
    Date,
    Long,
    Float,
    Boolean,
    Nested,
    GeoPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexMode {
    Analyzed,
    NotAnalyzed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermVector {
    WithPositionsOffsets,
}

/// Mapping entry for one field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    #[serde(rename = "type")]
    pub field_type: MappingType,
    pub index: IndexMode,
    pub store: StoreMode,
    pub boost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analyzer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_vector: Option<TermVector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
}

impl FieldMapping {
    /// Analyzed, stored text with the given boost
    pub fn new(boost: f64) -> Self {
        Self {
            field_type: MappingType::Text,
            index: IndexMode::Analyzed,
            store: StoreMode::Yes,
            boost,
            analyzer: None,
            term_vector: None,
            properties: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_mapping_shape() {
        let value = serde_json::to_value(FieldMapping::new(1.5)).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "string",
                "index": "analyzed",
                "store": "yes",
                "boost": 1.5
            })
        );
    }

    #[test]
    fn test_optional_keys_serialize() {
        let mapping = FieldMapping {
            field_type: MappingType::GeoPoint,
            index: IndexMode::NotAnalyzed,
            store: StoreMode::No,
            boost: 1.0,
            analyzer: Some("snowball".to_string()),
            term_vector: Some(TermVector::WithPositionsOffsets),
            properties: None,
        };
        let value = serde_json::to_value(mapping).unwrap();
        assert_eq!(value["type"], "geo_point");
        assert_eq!(value["index"], "not_analyzed");
        assert_eq!(value["store"], "no");
        assert_eq!(value["term_vector"], "with_positions_offsets");
        assert!(value.get("properties").is_none());
    }
}
