//! Base query builder seam and its parameters

use crate::error::{Error, Result};
use crate::query::QueryRequest;
use serde::{Deserialize, Serialize};

/// Parameters for building the base search request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Raw query string
    pub query_string: String,
    /// Sort order, most significant first
    pub sort_by: Vec<SortField>,
    /// Index of the first result
    pub start_offset: usize,
    /// Index one past the last result
    pub end_offset: Option<usize>,
    /// Stored fields to return
    pub fields: Vec<String>,
    /// Highlight matches in the content field
    pub highlight: bool,
    /// Fields to facet on
    pub facets: Vec<String>,
}

impl SearchParams {
    pub fn new(query_string: impl Into<String>) -> Self {
        Self {
            query_string: query_string.into(),
            ..Default::default()
        }
    }

    /// Number of requested results, if bounded
    pub fn size(&self) -> Result<Option<usize>> {
        match self.end_offset {
            Some(end) if end < self.start_offset => Err(Error::invalid_request(format!(
                "end offset {} is before start offset {}",
                end, self.start_offset
            ))),
            Some(end) => Ok(Some(end - self.start_offset)),
            None => Ok(None),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Field to sort on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    pub field: String,
    pub order: SortOrder,
}

impl SortField {
    /// Parse `field` (ascending) or `-field` (descending)
    pub fn parse(spec: &str) -> Self {
        match spec.strip_prefix('-') {
            Some(field) => Self {
                field: field.to_string(),
                order: SortOrder::Desc,
            },
            None => Self {
                field: spec.to_string(),
                order: SortOrder::Asc,
            },
        }
    }
}

/// Builds the base search request from caller-level parameters.
///
/// Implemented by the host framework's query builder; the backend only
/// augments what it returns. Failures of the builder itself are reported as
/// [`Error::Collaborator`] and reach the caller unchanged.
pub trait BaseQueryBuilder: Send + Sync {
    /// Builder name, for logging
    fn name(&self) -> &str;

    /// Build the base request
    fn build_search_kwargs(&self, params: &SearchParams) -> Result<QueryRequest>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_field_parse() {
        assert_eq!(
            SortField::parse("-pub_date"),
            SortField {
                field: "pub_date".to_string(),
                order: SortOrder::Desc
            }
        );
        assert_eq!(SortField::parse("title").order, SortOrder::Asc);
    }

    #[test]
    fn test_size() {
        let mut params = SearchParams::new("rust");
        assert_eq!(params.size().unwrap(), None);

        params.start_offset = 10;
        params.end_offset = Some(30);
        assert_eq!(params.size().unwrap(), Some(20));

        params.end_offset = Some(5);
        assert!(matches!(params.size(), Err(Error::InvalidRequest(_))));
    }
}
