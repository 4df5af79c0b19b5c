//! Error types for mapping operations.

use std::fmt;

/// Errors from mapping operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// Uploaded column index is outside the file.
    UnknownUploadColumn(usize),
    /// Key does not name a template column.
    UnknownTemplateColumn(String),
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownUploadColumn(c) => write!(f, "Uploaded column not found: {c}"),
            Self::UnknownTemplateColumn(k) => write!(f, "Template column not found: {k}"),
        }
    }
}

impl std::error::Error for MappingError {}
