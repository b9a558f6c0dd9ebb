//! Nested tag queries
//!
//! A nested query matches documents whose nested block contains any of the
//! given terms and scores them by the sum of the matched elements' points.

use crate::config::{NestedSettings, ScriptLang};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Key the engine reserves inside a `terms` clause
const MINIMUM_MATCH: &str = "minimum_match";

/// Target and terms of a nested query.
///
/// Always complete: path, field and at least one term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NestedParts", into = "NestedParts")]
pub struct NestedQuerySpec {
    path: String,
    field: String,
    terms: Vec<String>,
}

impl NestedQuerySpec {
    /// Build a spec, rejecting blank parts.
    ///
    /// Duplicate terms are dropped, keeping first-seen order.
    pub fn new<I, T>(path: impl Into<String>, field: impl Into<String>, terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let path = path.into();
        let field = field.into();

        if path.trim().is_empty() {
            return Err(Error::invalid_query_spec("nested path is empty"));
        }
        if !is_field_path(&path) {
            return Err(Error::invalid_query_spec(format!(
                "nested path '{}' is not a dotted field name",
                path
            )));
        }
        if field.trim().is_empty() {
            return Err(Error::invalid_query_spec("nested field is empty"));
        }
        if field == MINIMUM_MATCH {
            return Err(Error::invalid_query_spec(format!(
                "nested field may not be named '{}'",
                MINIMUM_MATCH
            )));
        }

        let mut unique: Vec<String> = Vec::new();
        for term in terms {
            let term = term.into();
            if term.trim().is_empty() {
                return Err(Error::invalid_query_spec("nested terms contain a blank term"));
            }
            if !unique.contains(&term) {
                unique.push(term);
            }
        }
        if unique.is_empty() {
            return Err(Error::invalid_query_spec("nested terms are empty"));
        }

        Ok(Self {
            path,
            field,
            terms: unique,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Build the engine-native nested function-score query
    pub fn to_query(&self, script: &ScoreScript) -> Value {
        let mut terms = Map::new();
        terms.insert(self.field.clone(), json!(self.terms));
        terms.insert(MINIMUM_MATCH.to_string(), json!(1));

        json!({
            "nested": {
                "path": self.path,
                "score_mode": "total",
                "query": {
                    "function_score": {
                        "query": {
                            "terms": terms
                        },
                        "script_score": script.to_value(&self.path),
                        "boost_mode": "replace"
                    }
                }
            }
        })
    }
}

/// Dotted field name such as `tags` or `meta.tags`.
///
/// Segments are non-empty and made of ASCII letters, digits, `_` or `-`, so
/// the name can be quoted inside a score script as is.
pub(crate) fn is_field_path(path: &str) -> bool {
    !path.is_empty()
        && path.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        })
}

/// Possibly partial nested parameters, as a caller supplies them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NestedParts {
    pub path: Option<String>,
    pub field: Option<String>,
    pub terms: Option<Vec<String>>,
}

impl NestedParts {
    /// No parts means no nested query; some parts mean a caller error.
    pub fn into_spec(self) -> Result<Option<NestedQuerySpec>> {
        match (self.path, self.field, self.terms) {
            (None, None, None) => Ok(None),
            (Some(path), Some(field), Some(terms)) => {
                NestedQuerySpec::new(path, field, terms).map(Some)
            }
            (path, field, terms) => {
                let missing: Vec<&str> = [
                    ("path", path.is_none()),
                    ("field", field.is_none()),
                    ("terms", terms.is_none()),
                ]
                .iter()
                .filter(|(_, absent)| *absent)
                .map(|(name, _)| *name)
                .collect();
                Err(Error::invalid_query_spec(format!(
                    "nested spec is missing {}",
                    missing.join(", ")
                )))
            }
        }
    }
}

impl TryFrom<NestedParts> for NestedQuerySpec {
    type Error = Error;

    fn try_from(parts: NestedParts) -> Result<Self> {
        parts
            .into_spec()?
            .ok_or_else(|| Error::invalid_query_spec("nested spec is empty"))
    }
}

impl From<NestedQuerySpec> for NestedParts {
    fn from(spec: NestedQuerySpec) -> Self {
        Self {
            path: Some(spec.path),
            field: Some(spec.field),
            terms: Some(spec.terms),
        }
    }
}

/// Score script summing a numeric sub-field of matched nested elements.
///
/// Elements without the field contribute zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreScript {
    lang: ScriptLang,
    points_field: String,
}

impl ScoreScript {
    pub fn new(lang: ScriptLang, points_field: impl Into<String>) -> Self {
        Self {
            lang,
            points_field: points_field.into(),
        }
    }

    pub fn lang(&self) -> ScriptLang {
        self.lang
    }

    /// Script source for a nested block at `path`
    pub fn source(&self, path: &str) -> String {
        let value = format!("doc['{}.{}']", path, self.points_field);
        match self.lang {
            ScriptLang::Mvel => format!("({v}.empty ? 0 : {v}.value)", v = value),
            ScriptLang::Groovy | ScriptLang::Expression => {
                format!("{v}.empty ? 0 : {v}.value", v = value)
            }
            ScriptLang::Painless => format!("{v}.size() == 0 ? 0 : {v}.value", v = value),
        }
    }

    /// The `script_score` object
    pub fn to_value(&self, path: &str) -> Value {
        json!({
            "script": self.source(path),
            "lang": self.lang.as_str()
        })
    }
}

impl Default for ScoreScript {
    fn default() -> Self {
        Self::from(&NestedSettings::default())
    }
}

impl From<&NestedSettings> for ScoreScript {
    fn from(settings: &NestedSettings) -> Self {
        Self::new(settings.script_lang, settings.points_field.clone())
    }
}
