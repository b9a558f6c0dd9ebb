//! Error types for the backend
//!
//! Schema compilation and query augmentation are pure transforms, so the only
//! errors they raise are caller precondition violations. Loading settings and
//! schema files adds I/O and decoding errors on top.

use std::io;
use thiserror::Error;

/// Errors raised by the backend
#[derive(Error, Debug)]
pub enum Error {
    /// A field descriptor is malformed or missing a required attribute
    #[error("Invalid field descriptor '{field}': {reason}")]
    InvalidFieldDescriptor { field: String, reason: String },

    /// A nested query spec is partial or empty
    #[error("Invalid query spec: {0}")]
    InvalidQuerySpec(String),

    /// A search request body or its parameters are malformed
    #[error("Invalid search request: {0}")]
    InvalidRequest(String),

    /// Failure raised by a collaborator such as the base query builder
    #[error("Collaborator error: {0}")]
    Collaborator(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Settings could not be interpreted
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid field descriptor error
    pub fn invalid_field<F: Into<String>, R: Into<String>>(field: F, reason: R) -> Self {
        Self::InvalidFieldDescriptor {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid query spec error
    pub fn invalid_query_spec<S: Into<String>>(msg: S) -> Self {
        Self::InvalidQuerySpec(msg.into())
    }

    /// Create an invalid search request error
    pub fn invalid_request<S: Into<String>>(msg: S) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Wrap a collaborator's error without interpreting it
    pub fn collaborator<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Collaborator(Box::new(err))
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::invalid_field("title", "index_fieldname is empty");
        assert_eq!(
            err.to_string(),
            "Invalid field descriptor 'title': index_fieldname is empty"
        );

        let err = Error::invalid_query_spec("missing path");
        assert!(matches!(err, Error::InvalidQuerySpec(_)));
        assert_eq!(err.to_string(), "Invalid query spec: missing path");
    }

    #[test]
    fn test_collaborator_keeps_source() {
        use std::error::Error as _;

        let err = Error::collaborator(io::Error::new(io::ErrorKind::TimedOut, "builder timed out"));
        assert_eq!(err.to_string(), "Collaborator error: builder timed out");
        let source = err.source().unwrap();
        assert_eq!(
            source.downcast_ref::<io::Error>().unwrap().kind(),
            io::ErrorKind::TimedOut
        );
    }
}
