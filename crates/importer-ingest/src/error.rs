//! Error types for file ingestion.

use std::path::PathBuf;
use thiserror::Error;

use crate::kind::ACCEPTED_EXTENSIONS;

/// Errors that can occur while ingesting an uploaded file.
///
/// All of these are input errors: the pipeline stays on the upload step and
/// the user may try another file.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Extension is not one of the accepted types.
    #[error(
        "unsupported file type '{extension}' for {file_name}: accepted types are {}",
        ACCEPTED_EXTENSIONS.join(", ")
    )]
    UnsupportedFileType { file_name: String, extension: String },

    /// Failed to read file contents.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Workbook could not be opened or its first sheet could not be read.
    #[error("failed to read workbook {file_name}: {message}")]
    Workbook { file_name: String, message: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
