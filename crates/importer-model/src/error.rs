use thiserror::Error;

/// Errors raised while validating a caller-supplied template.
///
/// These are configuration errors: a pipeline whose template fails validation
/// never starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template is not valid JSON: {message}")]
    InvalidJson { message: String },
    #[error("template is missing or has no columns")]
    MissingTemplate,
    #[error("template columns must be a list")]
    ColumnsNotArray,
    #[error("column {index} is missing a name")]
    MissingColumnName { index: usize },
    #[error("column {index} has a duplicate key '{key}'")]
    DuplicateColumnKey { index: usize, key: String },
    #[error("column {index} has an invalid suggested mapping '{value}'")]
    InvalidSuggestedMapping { index: usize, value: String },
    #[error("template contains no columns")]
    EmptyTemplate,
    #[error("failed to render template CSV: {message}")]
    CsvExport { message: String },
}

impl TemplateError {
    /// Stable identifier of the failure, suitable for the embedding application.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidJson { .. } => "InvalidJSON",
            Self::MissingTemplate => "MissingTemplate",
            Self::ColumnsNotArray => "ColumnsNotArray",
            Self::MissingColumnName { .. } => "MissingColumnName",
            Self::DuplicateColumnKey { .. } => "DuplicateColumnKey",
            Self::InvalidSuggestedMapping { .. } => "InvalidSuggestedMapping",
            Self::EmptyTemplate => "EmptyTemplate",
            Self::CsvExport { .. } => "CsvExport",
        }
    }
}

pub type Result<T> = std::result::Result<T, TemplateError>;
