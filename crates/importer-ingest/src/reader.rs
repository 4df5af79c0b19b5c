//! File-type dispatch and reading.

use std::path::Path;

use importer_model::FileData;

use crate::delimited::parse_delimited;
use crate::error::{IngestError, Result};
use crate::kind::FileKind;
use crate::rows::build_file_data;
use crate::workbook::parse_workbook;

/// Parses an uploaded file's bytes.
///
/// The file type comes from `file_name`'s extension and is checked before
/// the bytes are touched.
pub fn parse_file(file_name: &str, bytes: Vec<u8>) -> Result<FileData> {
    let kind = FileKind::from_file_name(file_name)?;
    parse_kind(kind, file_name, bytes)
}

/// Reads and parses a file from disk.
///
/// Unsupported extensions fail before the file is opened. Reading is
/// asynchronous; parsing runs synchronously once the bytes are available.
pub async fn read_file(path: &Path) -> Result<FileData> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let kind = FileKind::from_file_name(&file_name)?;
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
    parse_kind(kind, &file_name, bytes)
}

fn parse_kind(kind: FileKind, file_name: &str, bytes: Vec<u8>) -> Result<FileData> {
    let data = match kind.delimiter() {
        Some(delimiter) => {
            let parsed = parse_delimited(&bytes, delimiter);
            build_file_data(file_name, parsed.rows, Vec::new(), parsed.errors)
        }
        None => {
            let parsed = parse_workbook(bytes).map_err(|e| IngestError::Workbook {
                file_name: file_name.to_string(),
                message: e.to_string(),
            })?;
            build_file_data(file_name, parsed.rows, parsed.sheet_list, Vec::new())
        }
    };

    tracing::info!(
        file = %file_name,
        kind = ?kind,
        rows = data.rows.len(),
        columns = data.width(),
        sheets = data.sheet_list.len(),
        warnings = data.errors.len(),
        "parsed upload"
    );
    for warning in &data.errors {
        tracing::warn!(file = %file_name, "{warning}");
    }
    Ok(data)
}
