//! Error types for the import pipeline.

use importer_ingest::IngestError;
use importer_map::MappingError;
use importer_model::TemplateError;
use serde::Serialize;
use thiserror::Error;

use crate::step::Step;

/// Errors raised by the import pipeline.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Template failed validation; the pipeline never starts.
    #[error("invalid template: {0}")]
    Template(#[from] TemplateError),

    /// Importer configuration could not be read.
    #[error("invalid importer configuration: {message}")]
    Config { message: String },

    /// Upload could not be read or parsed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Upload parsed but contained no non-blank rows.
    #[error("{file_name} contains no data")]
    EmptyFile { file_name: String },

    /// Advancing past the upload step without a parsed file.
    #[error("no file has been uploaded")]
    NoFileLoaded,

    /// Advancing past row selection without choosing a row.
    #[error("select the row that contains the column headers")]
    NoHeaderRowSelected,

    #[error("row {index} is not a header candidate ({available} rows available)")]
    HeaderRowOutOfRange { index: usize, available: usize },

    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// Submission blocked by required columns without an included mapping.
    #[error("required columns are not mapped: {}", .columns.join(", "))]
    MissingRequiredColumns { columns: Vec<String> },

    /// Event is not accepted at the current step.
    #[error("{action} is not available at the {step} step")]
    InvalidAction { action: &'static str, step: Step },
}

impl ImportError {
    /// Stable identifier of the failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Template(err) => err.code(),
            Self::Config { .. } => "InvalidConfig",
            Self::Ingest(IngestError::UnsupportedFileType { .. }) => "UnsupportedFileType",
            Self::Ingest(IngestError::FileRead { .. }) => "FileRead",
            Self::Ingest(IngestError::Workbook { .. }) => "UnreadableWorkbook",
            Self::EmptyFile { .. } => "EmptyFile",
            Self::NoFileLoaded => "NoFileLoaded",
            Self::NoHeaderRowSelected => "NoHeaderRowSelected",
            Self::HeaderRowOutOfRange { .. } => "HeaderRowOutOfRange",
            Self::Mapping(_) => "InvalidMapping",
            Self::MissingRequiredColumns { .. } => "MissingRequiredColumns",
            Self::InvalidAction { .. } => "InvalidAction",
        }
    }

    /// Returns true for errors the user can fix by changing the upload or
    /// the mapping, as opposed to caller configuration errors.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Template(_) | Self::Config { .. })
    }
}

/// An error recorded against the step where it happened, rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageError {
    pub step: Step,
    pub code: &'static str,
    pub message: String,
}

impl StageError {
    pub fn new(step: Step, error: &ImportError) -> Self {
        Self {
            step,
            code: error.code(),
            message: error.to_string(),
        }
    }
}

impl std::fmt::Display for StageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, ImportError>;
