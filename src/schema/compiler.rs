//! Schema compiler
//!
//! Turns declared fields into the engine's native mapping document and picks
//! out the content field.

use super::field::{FieldDescriptor, FieldType};
use super::mapping::{FieldMapping, IndexMode, MappingType, StoreMode, TermVector};
use crate::config::SchemaSettings;
use crate::error::Result;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// Output of a schema compilation
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledSchema {
    /// Index name of the last field marked as the document body
    pub content_field: Option<String>,
    /// Mappings keyed by index field name, in declaration order
    mapping: Vec<(String, FieldMapping)>,
}

impl CompiledSchema {
    /// Get the mapping for an index field
    pub fn get(&self, index_fieldname: &str) -> Option<&FieldMapping> {
        self.mapping
            .iter()
            .find(|(name, _)| name == index_fieldname)
            .map(|(_, mapping)| mapping)
    }

    /// Index field names and their mappings, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldMapping)> {
        self.mapping
            .iter()
            .map(|(name, mapping)| (name.as_str(), mapping))
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Mapping as a `properties` JSON object, keys in declaration order
    pub fn properties(&self) -> Result<Value> {
        let mut properties = Map::new();
        for (name, mapping) in &self.mapping {
            properties.insert(name.clone(), serde_json::to_value(mapping)?);
        }
        Ok(Value::Object(properties))
    }

    /// Insert a mapping, replacing an earlier one in place.
    ///
    /// Returns true when an earlier mapping was replaced.
    fn insert(&mut self, index_fieldname: &str, mapping: FieldMapping) -> bool {
        match self
            .mapping
            .iter_mut()
            .find(|(name, _)| name == index_fieldname)
        {
            Some(slot) => {
                slot.1 = mapping;
                true
            }
            None => {
                self.mapping.push((index_fieldname.to_string(), mapping));
                false
            }
        }
    }
}

/// Compiles field descriptors into mapping documents
#[derive(Debug, Clone, Default)]
pub struct SchemaCompiler {
    settings: SchemaSettings,
}

impl SchemaCompiler {
    pub fn new(settings: SchemaSettings) -> Self {
        Self { settings }
    }

    /// Compile fields in declaration order.
    ///
    /// Either every field compiles or the whole call fails; no partial mapping
    /// is returned.
    pub fn compile<'a, I>(&self, fields: I) -> Result<CompiledSchema>
    where
        I: IntoIterator<Item = (&'a str, &'a FieldDescriptor)>,
    {
        let mut schema = CompiledSchema {
            content_field: None,
            mapping: Vec::new(),
        };

        for (name, field) in fields {
            field.validate(name)?;

            if field.is_document() {
                schema.content_field = Some(field.index_fieldname().to_string());
            }

            let field_mapping = self.compile_field(name, field);
            debug!(
                "Compiled field {} ({}) -> {:?}",
                name,
                field.field_type(),
                field_mapping.field_type
            );

            if schema.insert(field.index_fieldname(), field_mapping) {
                warn!(
                    "Field {} overwrites an earlier mapping for {}",
                    name,
                    field.index_fieldname()
                );
            }
        }

        info!(
            "Compiled {} field mappings (content field: {})",
            schema.len(),
            schema.content_field.as_deref().unwrap_or("<none>")
        );

        Ok(schema)
    }

    fn compile_field(&self, name: &str, field: &FieldDescriptor) -> FieldMapping {
        let mut mapping = FieldMapping::new(field.boost());

        match field.field_type() {
            FieldType::Date | FieldType::Datetime => mapping.field_type = MappingType::Date,
            FieldType::Integer => mapping.field_type = MappingType::Long,
            FieldType::Float => mapping.field_type = MappingType::Float,
            FieldType::Boolean => mapping.field_type = MappingType::Boolean,
            FieldType::Nested => {
                mapping.field_type = MappingType::Nested;
                mapping.properties = field.properties().cloned();
            }
            FieldType::Ngram => mapping.analyzer = Some(self.settings.ngram_analyzer.clone()),
            FieldType::EdgeNgram => {
                mapping.analyzer = Some(self.settings.edge_ngram_analyzer.clone())
            }
            FieldType::Location => mapping.field_type = MappingType::GeoPoint,
            FieldType::Text | FieldType::Unknown => {}
        }

        if field.properties().is_some() && field.field_type() != FieldType::Nested {
            warn!("Ignoring properties on non-nested field {}", name);
        }

        if !field.is_stored() {
            mapping.store = StoreMode::No;
        }

        // Applies to every type, including ones the engine does not analyze.
        if !field.is_indexed() || field.is_facet() {
            mapping.index = IndexMode::NotAnalyzed;
        }

        if mapping.field_type == MappingType::Text
            && field.is_indexed()
            && !field.field_type().is_ngram()
        {
            mapping.term_vector = Some(TermVector::WithPositionsOffsets);

            if !field.is_facet() {
                mapping.analyzer = Some(self.settings.text_analyzer.clone());
            }
        }

        mapping
    }
}
