//! Settings structures for the backend configuration

use crate::error::{Error, Result};
use crate::query::is_field_path;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub backend: BackendSettings,
    pub schema: SchemaSettings,
    pub nested: NestedSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Merge with environment variables (ELASTIC_BACKEND_* prefix)
    pub fn merge_env(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("ELASTIC_BACKEND_DOCUMENT_TYPE") {
            self.backend.document_type = val;
        }
        if let Ok(val) = std::env::var("ELASTIC_BACKEND_SCRIPT_LANG") {
            self.nested.script_lang = val.parse()?;
        }
        if let Ok(val) = std::env::var("ELASTIC_BACKEND_POINTS_FIELD") {
            self.nested.points_field = val;
        }
        self.validate()
    }

    /// Reject settings that would produce invalid engine documents
    pub fn validate(&self) -> Result<()> {
        if self.backend.document_type.trim().is_empty() {
            return Err(Error::config("backend.document_type must not be empty"));
        }
        if self.nested.points_field.trim().is_empty() {
            return Err(Error::config("nested.points_field must not be empty"));
        }
        if self.nested.default_path.trim().is_empty() || self.nested.default_field.trim().is_empty() {
            return Err(Error::config(
                "nested.default_path and nested.default_field must not be empty",
            ));
        }
        if !is_field_path(&self.nested.points_field) {
            return Err(Error::config(format!(
                "nested.points_field '{}' is not a dotted field name",
                self.nested.points_field
            )));
        }
        if !is_field_path(&self.nested.default_path) {
            return Err(Error::config(format!(
                "nested.default_path '{}' is not a dotted field name",
                self.nested.default_path
            )));
        }
        Ok(())
    }
}

/// Settings for the base search request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    /// Document type the mapping is registered under
    pub document_type: String,
    /// Default operator for query_string queries
    pub default_operator: String,
    /// Query string that means "match everything"
    pub match_all_query: String,
    /// Number of buckets requested per facet
    pub facet_size: u32,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            document_type: "modelresult".to_string(),
            default_operator: "AND".to_string(),
            match_all_query: "*:*".to_string(),
            facet_size: 100,
        }
    }
}

/// Analyzer names referenced by compiled field mappings.
///
/// These must match analyzers defined in the index settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaSettings {
    pub ngram_analyzer: String,
    pub edge_ngram_analyzer: String,
    /// Analyzer for indexed, non-facet text fields
    pub text_analyzer: String,
}

impl Default for SchemaSettings {
    fn default() -> Self {
        Self {
            ngram_analyzer: "ngram_analyzer".to_string(),
            edge_ngram_analyzer: "edgengram_analyzer".to_string(),
            text_analyzer: "snowball".to_string(),
        }
    }
}

/// Nested query settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NestedSettings {
    /// Nested block searched when no path is given
    pub default_path: String,
    /// Term field inside the nested block when no field is given
    pub default_field: String,
    /// Numeric sub-field summed into the score
    pub points_field: String,
    /// Scripting language for the score script
    pub script_lang: ScriptLang,
}

impl Default for NestedSettings {
    fn default() -> Self {
        Self {
            default_path: "tags".to_string(),
            default_field: "tag".to_string(),
            points_field: "points".to_string(),
            script_lang: ScriptLang::default(),
        }
    }
}

/// Scripting language used by the nested score script
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptLang {
    #[default]
    Groovy,
    Mvel,
    Expression,
    Painless,
}

impl ScriptLang {
    /// Language id sent in the `lang` key
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groovy => "groovy",
            Self::Mvel => "mvel",
            Self::Expression => "expression",
            Self::Painless => "painless",
        }
    }
}

impl FromStr for ScriptLang {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "groovy" => Ok(Self::Groovy),
            "mvel" => Ok(Self::Mvel),
            "expression" => Ok(Self::Expression),
            "painless" => Ok(Self::Painless),
            other => Err(Error::config(format!("unknown script language: {}", other))),
        }
    }
}

impl std::fmt::Display for ScriptLang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
