#![forbid(unsafe_code)]

//! Catalog loading errors.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failure to load a film catalog.
#[derive(Debug)]
pub enum CatalogError {
    /// The catalog file could not be read.
    Io { path: PathBuf, source: io::Error },
    /// The document is not valid JSON.
    Parse(serde_json::Error),
    /// A required field is absent or has the wrong type.
    MissingField { record: Option<usize>, field: &'static str },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Parse(err) => write!(f, "invalid catalog JSON: {err}"),
            Self::MissingField {
                record: Some(index),
                field,
            } => write!(f, "record {index}: missing `{field}`"),
            Self::MissingField {
                record: None,
                field,
            } => write!(f, "missing `{field}`"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::MissingField { .. } => None,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
