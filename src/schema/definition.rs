//! Schema definition files
//!
//! A definition is a YAML document with an ordered `fields:` list:
//!
//! ```yaml
//! fields:
//!   - name: text
//!     document: true
//!   - name: pub_date
//!     type: datetime
//!   - name: tags
//!     preset: tags
//! ```

use super::field::FieldDescriptor;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Predefined field shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Nested `tag`/`points` list
    Tags,
}

/// One entry of a definition file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<Preset>,
    #[serde(flatten)]
    pub descriptor: FieldDescriptor,
}

impl FieldEntry {
    /// Resolve the entry into its final descriptor.
    ///
    /// The index field name defaults to the declared name. A preset replaces
    /// the type and properties but keeps the other declared attributes.
    pub fn resolve(&self) -> FieldDescriptor {
        let mut descriptor = match self.preset {
            Some(Preset::Tags) => FieldDescriptor::tags(self.descriptor.index_fieldname())
                .with_boost(self.descriptor.boost())
                .with_stored(self.descriptor.is_stored())
                .with_indexed(self.descriptor.is_indexed())
                .with_document(self.descriptor.is_document()),
            None => self.descriptor.clone(),
        };
        if descriptor.facet_for().is_none() {
            if let Some(source) = self.descriptor.facet_for() {
                descriptor = descriptor.with_facet_for(source);
            }
        }
        if descriptor.index_fieldname().is_empty() {
            descriptor = descriptor.with_index_fieldname(self.name.clone());
        }
        descriptor
    }
}

/// Ordered list of declared fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaDefinition {
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
}

impl SchemaDefinition {
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Resolved `(name, descriptor)` pairs in declaration order
    pub fn resolve(&self) -> Vec<(String, FieldDescriptor)> {
        self.fields
            .iter()
            .map(|entry| (entry.name.clone(), entry.resolve()))
            .collect()
    }
}
