//! Field descriptors
//!
//! A [`FieldDescriptor`] declares one indexed field the way the host
//! framework's search index does. Descriptors are built once and only read
//! afterwards; every builder method consumes the descriptor and returns a new
//! one.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::str::FromStr;

/// Declared type of an indexed field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    #[default]
    #[serde(alias = "string")]
    Text,
    Date,
    Datetime,
    Integer,
    Float,
    Boolean,
    Nested,
    Ngram,
    #[serde(alias = "edgeNgram")]
    EdgeNgram,
    Location,
    /// Any unrecognised type; compiled like plain text
    #[serde(other)]
    Unknown,
}

impl FieldType {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Nested => "nested",
            Self::Ngram => "ngram",
            Self::EdgeNgram => "edge_ngram",
            Self::Location => "location",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the field is analyzed with an n-gram analyzer
    pub fn is_ngram(&self) -> bool {
        matches!(self, Self::Ngram | Self::EdgeNgram)
    }
}

impl FromStr for FieldType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "text" | "string" => Self::Text,
            "date" => Self::Date,
            "datetime" => Self::Datetime,
            "integer" => Self::Integer,
            "float" => Self::Float,
            "boolean" => Self::Boolean,
            "nested" => Self::Nested,
            "ngram" => Self::Ngram,
            "edge_ngram" | "edgeNgram" => Self::EdgeNgram,
            "location" => Self::Location,
            _ => Self::Unknown,
        })
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Description of one indexed field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDescriptor {
    #[serde(rename = "type")]
    field_type: FieldType,
    boost: f64,
    stored: bool,
    indexed: bool,
    document: bool,
    /// Name of the field this one is a facet for
    facet_for: Option<String>,
    index_fieldname: String,
    /// Nested mapping document, used verbatim for nested fields
    properties: Option<Value>,
}

impl Default for FieldDescriptor {
    fn default() -> Self {
        Self {
            field_type: FieldType::Text,
            boost: 1.0,
            stored: true,
            indexed: true,
            document: false,
            facet_for: None,
            index_fieldname: String::new(),
            properties: None,
        }
    }
}

impl FieldDescriptor {
    /// Create a stored, indexed descriptor with boost 1.0
    pub fn new(field_type: FieldType, index_fieldname: impl Into<String>) -> Self {
        Self {
            field_type,
            index_fieldname: index_fieldname.into(),
            ..Default::default()
        }
    }

    /// Plain analyzed text
    pub fn text(index_fieldname: impl Into<String>) -> Self {
        Self::new(FieldType::Text, index_fieldname)
    }

    /// Text field holding the primary document body
    pub fn document(index_fieldname: impl Into<String>) -> Self {
        Self::text(index_fieldname).with_document(true)
    }

    /// Nested tag list where each element carries a `tag` term and a
    /// numeric `points` weight.
    pub fn tags(index_fieldname: impl Into<String>) -> Self {
        Self::new(FieldType::Nested, index_fieldname).with_properties(json!({
            "tag": {
                "type": "string",
                "index": "not_analyzed",
                "omit_norms": true,
                "index_options": "docs"
            },
            "points": {
                "type": "float"
            }
        }))
    }

    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = boost;
        self
    }

    pub fn with_stored(mut self, stored: bool) -> Self {
        self.stored = stored;
        self
    }

    pub fn with_indexed(mut self, indexed: bool) -> Self {
        self.indexed = indexed;
        self
    }

    pub fn with_document(mut self, document: bool) -> Self {
        self.document = document;
        self
    }

    /// Mark this field as the facet of another field
    pub fn with_facet_for(mut self, source: impl Into<String>) -> Self {
        self.facet_for = Some(source.into());
        self
    }

    pub fn with_properties(mut self, properties: Value) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn with_index_fieldname(mut self, name: impl Into<String>) -> Self {
        self.index_fieldname = name.into();
        self
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    pub fn boost(&self) -> f64 {
        self.boost
    }

    pub fn is_stored(&self) -> bool {
        self.stored
    }

    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    pub fn is_document(&self) -> bool {
        self.document
    }

    pub fn is_facet(&self) -> bool {
        self.facet_for.is_some()
    }

    pub fn facet_for(&self) -> Option<&str> {
        self.facet_for.as_deref()
    }

    pub fn index_fieldname(&self) -> &str {
        &self.index_fieldname
    }

    pub fn properties(&self) -> Option<&Value> {
        self.properties.as_ref()
    }

    /// Check the attributes every descriptor needs.
    ///
    /// `name` is the declared field name, used in the error.
    pub fn validate(&self, name: &str) -> Result<()> {
        if self.index_fieldname.trim().is_empty() {
            return Err(Error::invalid_field(name, "index_fieldname is empty"));
        }
        if !self.boost.is_finite() || self.boost < 0.0 {
            return Err(Error::invalid_field(
                name,
                format!("boost must be a non-negative number, got {}", self.boost),
            ));
        }
        if let Some(properties) = &self.properties {
            if !properties.is_object() {
                return Err(Error::invalid_field(name, "properties must be an object"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let field = FieldDescriptor::text("title");
        assert_eq!(field.field_type(), FieldType::Text);
        assert_eq!(field.boost(), 1.0);
        assert!(field.is_stored());
        assert!(field.is_indexed());
        assert!(!field.is_document());
        assert!(!field.is_facet());
        assert!(field.properties().is_none());
    }

    #[test]
    fn test_builder_returns_new_value() {
        let base = FieldDescriptor::text("author");
        let facet = base.clone().with_facet_for("author").with_index_fieldname("author_exact");

        assert!(!base.is_facet());
        assert_eq!(base.index_fieldname(), "author");
        assert_eq!(facet.facet_for(), Some("author"));
        assert_eq!(facet.index_fieldname(), "author_exact");
    }

    #[test]
    fn test_field_type_parsing() {
        assert_eq!("edgeNgram".parse::<FieldType>().unwrap(), FieldType::EdgeNgram);
        assert_eq!("edge_ngram".parse::<FieldType>().unwrap(), FieldType::EdgeNgram);
        assert_eq!("string".parse::<FieldType>().unwrap(), FieldType::Text);
        assert_eq!("multi_value".parse::<FieldType>().unwrap(), FieldType::Unknown);
    }

    #[test]
    fn test_unknown_type_deserializes() {
        let field: FieldDescriptor =
            serde_yaml::from_str("type: multi_value\nindex_fieldname: misc\n").unwrap();
        assert_eq!(field.field_type(), FieldType::Unknown);
        assert!(field.is_indexed());
    }

    #[test]
    fn test_tags_preset() {
        let field = FieldDescriptor::tags("tags");
        assert_eq!(field.field_type(), FieldType::Nested);
        let props = field.properties().unwrap();
        assert_eq!(props["tag"]["index"], "not_analyzed");
        assert_eq!(props["points"]["type"], "float");
    }

    #[test]
    fn test_validate() {
        assert!(FieldDescriptor::text("body").validate("body").is_ok());

        let err = FieldDescriptor::text("").validate("body").unwrap_err();
        assert!(matches!(err, Error::InvalidFieldDescriptor { ref field, .. } if field == "body"));

        let err = FieldDescriptor::text("body")
            .with_boost(f64::NAN)
            .validate("body");
        assert!(err.is_err());

        let err = FieldDescriptor::new(FieldType::Nested, "tags")
            .with_properties(json!(["tag"]))
            .validate("tags");
        assert!(err.is_err());
    }
}
