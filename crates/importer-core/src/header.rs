//! Header row resolution.
//!
//! In skip-header mode row 0 is the header. Otherwise the user picks one of
//! the first [`MAX_HEADER_CANDIDATES`] rows.

use importer_model::{FileData, FileRow, UploadColumn};

use crate::error::{ImportError, Result};

/// Rows offered as header candidates.
pub const MAX_HEADER_CANDIDATES: usize = 50;

/// How the header row is determined for a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderResolution {
    /// Header row fixed without user input.
    Fixed(usize),
    /// User must choose among candidates.
    Select(HeaderSelection),
}

/// Resolves the header row for `file`.
pub fn resolve_header(file: &FileData, skip_header: bool) -> HeaderResolution {
    if skip_header {
        HeaderResolution::Fixed(0)
    } else {
        HeaderResolution::Select(HeaderSelection::new(file))
    }
}

/// Candidate rows and the user's choice among them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSelection {
    candidates: Vec<FileRow>,
    selected: Option<usize>,
}

impl HeaderSelection {
    pub fn new(file: &FileData) -> Self {
        Self {
            candidates: file
                .rows
                .iter()
                .take(MAX_HEADER_CANDIDATES)
                .cloned()
                .collect(),
            selected: None,
        }
    }

    pub fn candidates(&self) -> &[FileRow] {
        &self.candidates
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Selects the candidate at `index`, replacing any earlier choice.
    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.candidates.len() {
            return Err(ImportError::HeaderRowOutOfRange {
                index,
                available: self.candidates.len(),
            });
        }
        self.selected = Some(index);
        Ok(())
    }

    /// Returns the chosen header row index.
    pub fn confirm(&self) -> Result<usize> {
        self.selected.ok_or(ImportError::NoHeaderRowSelected)
    }
}

/// Notice shown when a workbook has more than one sheet.
pub fn sheet_notice(file: &FileData) -> Option<String> {
    if !file.has_multiple_sheets() {
        return None;
    }
    let first = file.first_sheet().unwrap_or_default();
    Some(format!(
        "{} has {} sheets; only the first sheet, \"{first}\", is imported",
        file.file_name,
        file.sheet_list.len()
    ))
}

/// Uploaded columns named by the header row.
///
/// Each column's sample is its first non-blank value below the header.
pub fn upload_columns(file: &FileData, header_row: usize) -> Vec<UploadColumn> {
    let Some(header) = file.row(header_row) else {
        return Vec::new();
    };
    let data = file.rows.iter().skip(header_row + 1);
    header
        .values
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let sample = data
                .clone()
                .map(|row| row.value(index).trim())
                .find(|value| !value.is_empty())
                .map(str::to_string);
            UploadColumn::new(index, name.trim()).with_sample(sample)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(rows: &[&[&str]]) -> FileData {
        FileData {
            file_name: "people.csv".to_string(),
            rows: rows
                .iter()
                .enumerate()
                .map(|(index, values)| FileRow {
                    index,
                    values: values.iter().map(|v| v.to_string()).collect(),
                })
                .collect(),
            ..FileData::default()
        }
    }

    #[test]
    fn skip_header_fixes_row_zero() {
        let data = file(&[&["Email"], &["a@b.com"]]);
        assert_eq!(resolve_header(&data, true), HeaderResolution::Fixed(0));
    }

    #[test]
    fn candidates_are_capped() {
        let rows: Vec<Vec<String>> = (0..80).map(|i| vec![i.to_string()]).collect();
        let data = FileData {
            rows: rows
                .into_iter()
                .enumerate()
                .map(|(index, values)| FileRow { index, values })
                .collect(),
            ..FileData::default()
        };
        let HeaderResolution::Select(mut selection) = resolve_header(&data, false) else {
            panic!("expected a selection");
        };
        assert_eq!(selection.candidates().len(), MAX_HEADER_CANDIDATES);
        assert!(matches!(
            selection.confirm(),
            Err(ImportError::NoHeaderRowSelected)
        ));
        assert!(selection.select(50).is_err());
        selection.select(49).unwrap();
        assert_eq!(selection.confirm().unwrap(), 49);
    }

    #[test]
    fn columns_take_names_and_samples() {
        let data = file(&[
            &["Report"],
            &[" Email ", "Phone"],
            &["a@b.com", ""],
            &["c@d.com", "555"],
        ]);
        let columns = upload_columns(&data, 1);
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].name, "Email");
        assert_eq!(columns[0].sample.as_deref(), Some("a@b.com"));
        assert_eq!(columns[1].sample.as_deref(), Some("555"));
        assert!(upload_columns(&data, 9).is_empty());
    }

    #[test]
    fn notice_names_first_sheet() {
        let mut data = file(&[&["Email"]]);
        assert_eq!(sheet_notice(&data), None);
        data.sheet_list = vec!["Contacts".to_string(), "Archive".to_string()];
        let notice = sheet_notice(&data).unwrap();
        assert!(notice.contains("\"Contacts\""));
        assert!(notice.contains("2 sheets"));
    }
}
