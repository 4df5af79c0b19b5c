use serde::{Deserialize, Serialize};

/// One non-blank row of an uploaded file.
///
/// `index` is the position among retained rows, not the source line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRow {
    pub index: usize,
    pub values: Vec<String>,
}

impl FileRow {
    /// Cell at `column`, or `""` when the row is shorter.
    pub fn value(&self, column: usize) -> &str {
        self.values.get(column).map_or("", String::as_str)
    }
}

/// Parsed contents of an uploaded file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    pub file_name: String,
    pub rows: Vec<FileRow>,
    /// Workbook sheet names; empty for delimited text.
    pub sheet_list: Vec<String>,
    /// Row-level parse warnings. Informational only.
    pub errors: Vec<String>,
}

impl FileData {
    pub fn row(&self, index: usize) -> Option<&FileRow> {
        self.rows.get(index)
    }

    /// Returns true if the file has no non-blank rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns in the widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(|row| row.values.len()).max().unwrap_or(0)
    }

    /// Returns true if the source workbook has more than one sheet.
    pub fn has_multiple_sheets(&self) -> bool {
        self.sheet_list.len() > 1
    }

    /// Name of the sheet the rows were read from, for workbooks.
    pub fn first_sheet(&self) -> Option<&str> {
        self.sheet_list.first().map(String::as_str)
    }
}
