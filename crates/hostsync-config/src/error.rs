//! Loader error taxonomy.
//!
//! Any single failure aborts the whole load -- no partially-validated
//! configuration ever escapes the loader.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required field (one with no default) is absent.
    #[error("missing required field '{field}'")]
    MissingField { field: String },

    /// A field is present but has the wrong YAML type.
    #[error("field '{field}' has the wrong type: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A field parsed but failed a validation rule.
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// The document is not valid YAML.
    #[error("could not parse configuration document: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The document could not be read at all.
    #[error("could not read configuration file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Dotted path of the offending field, when the error names one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field }
            | Self::TypeMismatch { field, .. }
            | Self::InvalidValue { field, .. } => Some(field),
            Self::Parse(_) | Self::Io { .. } => None,
        }
    }
}
