//! Data model for the spreadsheet import pipeline.
//!
//! - [`Template`]: the validated destination schema supplied by the caller
//! - [`FileData`]: the parsed grid of an uploaded file
//! - [`ColumnMapping`]: one uploaded column's assignment to a template column
//! - [`ImportPayload`]: the structured result handed back to the embedder

pub mod error;
pub mod file;
pub mod mapping;
pub mod payload;
pub mod template;

pub use error::{Result, TemplateError};
pub use file::{FileData, FileRow};
pub use mapping::{ColumnMapping, UploadColumn};
pub use payload::{ImportPayload, OutputColumn, OutputRow};
pub use template::{
    EXAMPLE_CSV_FILE_NAME, Template, TemplateColumn, derive_key, validate_template,
    validate_template_str,
};
