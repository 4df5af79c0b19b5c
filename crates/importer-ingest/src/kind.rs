use std::path::Path;

use crate::error::{IngestError, Result};

/// Extensions accepted for upload, in display order.
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["csv", "tsv", "xls", "xlsx"];

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Csv,
    Tsv,
    Xls,
    Xlsx,
}

impl FileKind {
    /// Determines the format from a file name's extension (case-insensitive).
    ///
    /// Performs no I/O, so unsupported files are rejected before any read.
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "xls" => Ok(Self::Xls),
            "xlsx" => Ok(Self::Xlsx),
            _ => Err(IngestError::UnsupportedFileType {
                file_name: file_name.to_string(),
                extension,
            }),
        }
    }

    /// Returns true for spreadsheet workbooks (read as binary).
    pub fn is_workbook(self) -> bool {
        matches!(self, Self::Xls | Self::Xlsx)
    }

    /// Field delimiter for delimited text formats.
    pub fn delimiter(self) -> Option<u8> {
        match self {
            Self::Csv => Some(b','),
            Self::Tsv => Some(b'\t'),
            Self::Xls | Self::Xlsx => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_on_extension() {
        assert_eq!(FileKind::from_file_name("a.csv").unwrap(), FileKind::Csv);
        assert_eq!(FileKind::from_file_name("A.TSV").unwrap(), FileKind::Tsv);
        assert_eq!(FileKind::from_file_name("book.xls").unwrap(), FileKind::Xls);
        assert_eq!(
            FileKind::from_file_name("dir.v2/book.XLSX").unwrap(),
            FileKind::Xlsx
        );
    }

    #[test]
    fn rejects_other_extensions() {
        let err = FileKind::from_file_name("scan.pdf").unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnsupportedFileType { ref extension, .. } if extension == "pdf"
        ));
        assert!(FileKind::from_file_name("no_extension").is_err());
    }

    #[test]
    fn workbook_kinds_have_no_delimiter() {
        assert!(FileKind::Xlsx.is_workbook());
        assert_eq!(FileKind::Xlsx.delimiter(), None);
        assert_eq!(FileKind::Tsv.delimiter(), Some(b'\t'));
    }
}
