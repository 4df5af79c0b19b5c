//! XLS/XLSX parsing via calamine.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};

/// Raw rows of a workbook's first sheet plus the names of all sheets.
#[derive(Debug, Default)]
pub(crate) struct WorkbookRows {
    pub rows: Vec<Vec<String>>,
    pub sheet_list: Vec<String>,
}

/// Reads the first sheet of a workbook as rows of strings.
///
/// Other sheets are listed but never read.
pub(crate) fn parse_workbook(bytes: Vec<u8>) -> Result<WorkbookRows, calamine::Error> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let sheet_list = workbook.sheet_names().to_vec();
    let rows = match workbook.worksheet_range_at(0) {
        Some(range) => range?
            .rows()
            .map(|row| row.iter().map(cell_text).collect())
            .collect(),
        None => Vec::new(),
    };
    Ok(WorkbookRows { rows, sheet_list })
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.clone(),
        Data::Float(value) => value.to_string(),
        Data::Int(value) => value.to_string(),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        Data::DateTime(value) => value.as_f64().to_string(),
        Data::DateTimeIso(text) | Data::DurationIso(text) => text.clone(),
        Data::Error(err) => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_cells_as_text() {
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::Float(42.0)), "42");
        assert_eq!(cell_text(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_text(&Data::Int(7)), "7");
        assert_eq!(cell_text(&Data::Bool(true)), "TRUE");
        assert_eq!(cell_text(&Data::String("x".into())), "x");
    }

    #[test]
    fn rejects_garbage_bytes() {
        assert!(parse_workbook(b"not a workbook".to_vec()).is_err());
    }
}
