//! Output assembly.

use std::collections::BTreeMap;

use importer_model::{ColumnMapping, FileData, ImportPayload, OutputColumn, OutputRow};

/// Builds the import payload from the file, the header row and the mapping.
///
/// Output columns are the included mappings in uploaded-column order. Each
/// row below the header becomes one output row keyed by template key; cells
/// missing from short rows are empty strings.
pub fn assemble_output(
    file: &FileData,
    header_row: usize,
    mappings: &BTreeMap<usize, ColumnMapping>,
) -> ImportPayload {
    let header = file.row(header_row);
    let included: Vec<(usize, &str)> = mappings
        .iter()
        .filter(|(_, mapping)| mapping.is_included())
        .map(|(&index, mapping)| (index, mapping.key.as_str()))
        .collect();

    let columns: Vec<OutputColumn> = included
        .iter()
        .map(|&(index, key)| OutputColumn {
            key: key.to_string(),
            name: key.to_string(),
            source_header: header
                .map(|row| row.value(index).trim().to_string())
                .unwrap_or_default(),
        })
        .collect();

    let rows: Vec<OutputRow> = file
        .rows
        .iter()
        .skip(header_row + 1)
        .enumerate()
        .map(|(index, row)| OutputRow {
            index,
            values: included
                .iter()
                .map(|&(column, key)| (key.to_string(), row.value(column).to_string()))
                .collect(),
        })
        .collect();

    tracing::info!(
        rows = rows.len(),
        columns = columns.len(),
        "assembled import payload"
    );

    ImportPayload {
        num_rows: rows.len(),
        num_columns: columns.len(),
        columns,
        rows,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use importer_model::FileRow;

    use super::*;

    fn contacts() -> FileData {
        let rows = [
            vec!["Email", "Name", "Notes"],
            vec!["a@b.com", "Ann", "vip"],
            vec!["c@d.com"],
        ];
        FileData {
            file_name: "contacts.csv".to_string(),
            rows: rows
                .into_iter()
                .enumerate()
                .map(|(index, values)| FileRow {
                    index,
                    values: values.into_iter().map(String::from).collect(),
                })
                .collect(),
            ..FileData::default()
        }
    }

    #[test]
    fn includes_only_included_mappings() {
        let mappings = BTreeMap::from([
            (0, ColumnMapping::mapped("email")),
            (
                1,
                ColumnMapping {
                    key: "name".to_string(),
                    include: false,
                },
            ),
            (2, ColumnMapping::unmapped()),
        ]);
        let payload = assemble_output(&contacts(), 0, &mappings);
        assert_eq!(payload.num_columns, 1);
        assert_eq!(payload.columns[0].source_header, "Email");
        assert_eq!(payload.num_rows, 2);
        assert_eq!(payload.rows[1].values["email"], "c@d.com");
        assert!(!payload.rows[0].values.contains_key("name"));
    }

    #[test]
    fn short_rows_yield_empty_cells() {
        let mappings = BTreeMap::from([(1, ColumnMapping::mapped("name"))]);
        let payload = assemble_output(&contacts(), 0, &mappings);
        assert_eq!(payload.rows[1].values["name"], "");
    }

    #[test]
    fn all_excluded_yields_empty_rows() {
        let mappings = BTreeMap::from([
            (
                0,
                ColumnMapping {
                    key: "email".to_string(),
                    include: false,
                },
            ),
            (1, ColumnMapping::unmapped()),
            (2, ColumnMapping::unmapped()),
        ]);
        let payload = assemble_output(&contacts(), 0, &mappings);
        assert_eq!(payload.num_columns, 0);
        assert!(payload.columns.is_empty());
        assert_eq!(payload.num_rows, 2);
        assert_eq!(payload.rows.len(), 2);
        assert!(payload.rows.iter().all(|row| row.values.is_empty()));

        let value = serde_json::to_value(&payload).unwrap();
        assert!(value["rows"][0]["values"].is_object());
    }

    #[test]
    fn header_as_last_row_yields_no_rows() {
        let mappings = BTreeMap::from([(0, ColumnMapping::mapped("email"))]);
        let payload = assemble_output(&contacts(), 2, &mappings);
        assert_eq!(payload.num_rows, 0);
        assert_eq!(payload.num_columns, 1);
    }
}
