//! Row filtering and grid normalization shared by all formats.

use importer_model::{FileData, FileRow};

/// Returns true if every cell is empty or whitespace-only.
pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// Builds [`FileData`] from raw parsed rows.
///
/// Blank rows are dropped, the remaining rows are re-indexed densely from 0,
/// and every row is padded to the widest row's length.
pub fn build_file_data(
    file_name: impl Into<String>,
    raw_rows: Vec<Vec<String>>,
    sheet_list: Vec<String>,
    errors: Vec<String>,
) -> FileData {
    let kept: Vec<Vec<String>> = raw_rows
        .into_iter()
        .filter(|row| !is_blank_row(row))
        .collect();
    let width = kept.iter().map(Vec::len).max().unwrap_or(0);
    let rows = kept
        .into_iter()
        .enumerate()
        .map(|(index, mut values)| {
            values.resize(width, String::new());
            FileRow { index, values }
        })
        .collect();
    FileData {
        file_name: file_name.into(),
        rows,
        sheet_list,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| (*c).to_string()).collect()
    }

    #[test]
    fn drops_blank_rows_and_reindexes() {
        let data = build_file_data(
            "a.csv",
            vec![
                row(&["", "  "]),
                row(&["Name", "Email"]),
                row(&["\t", ""]),
                row(&["Ann", "ann@example.com"]),
            ],
            Vec::new(),
            Vec::new(),
        );
        assert_eq!(data.rows.len(), 2);
        assert_eq!(data.rows[0].index, 0);
        assert_eq!(data.rows[0].values, row(&["Name", "Email"]));
        assert_eq!(data.rows[1].index, 1);
    }

    #[test]
    fn pads_ragged_rows() {
        let data = build_file_data(
            "a.csv",
            vec![row(&["a"]), row(&["b", "c", "d"])],
            Vec::new(),
            Vec::new(),
        );
        assert_eq!(data.width(), 3);
        assert_eq!(data.rows[0].values, row(&["a", "", ""]));
    }
}
