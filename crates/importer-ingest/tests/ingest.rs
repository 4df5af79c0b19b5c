use std::io::Write;
use std::path::Path;

use importer_ingest::{IngestError, is_blank_row, parse_file, read_file};
use proptest::prelude::*;
use rust_xlsxwriter::Workbook;

fn two_sheet_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Contacts").unwrap();
        sheet.write_string(0, 0, "Email").unwrap();
        sheet.write_string(0, 1, "Age").unwrap();
        sheet.write_string(2, 0, "a@b.com").unwrap();
        sheet.write_number(2, 1, 42.0).unwrap();
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Archive").unwrap();
        sheet.write_string(0, 0, "ignored").unwrap();
        sheet.write_string(1, 0, "also ignored").unwrap();
    }
    workbook.save_to_buffer().unwrap()
}

#[test]
fn parses_csv_rows() {
    let data = parse_file("people.csv", b"Email,Name\na@b.com,Ann\n,\nc@d.com,Cy\n".to_vec())
        .expect("parse csv");
    assert_eq!(data.file_name, "people.csv");
    assert!(data.sheet_list.is_empty());
    assert_eq!(data.rows.len(), 3);
    assert_eq!(data.rows[2].index, 2);
    assert_eq!(data.rows[2].values, vec!["c@d.com", "Cy"]);
}

#[test]
fn parses_tsv_rows() {
    let data = parse_file("people.tsv", b"Email\tName\na@b.com\tAnn\n".to_vec()).unwrap();
    assert_eq!(data.rows[1].values, vec!["a@b.com", "Ann"]);
}

#[test]
fn reads_only_first_workbook_sheet() {
    let data = parse_file("contacts.xlsx", two_sheet_workbook()).expect("parse workbook");
    assert_eq!(data.sheet_list, vec!["Contacts", "Archive"]);
    assert!(data.has_multiple_sheets());
    assert_eq!(data.first_sheet(), Some("Contacts"));
    // the empty row between header and data is dropped
    assert_eq!(data.rows.len(), 2);
    assert_eq!(data.rows[0].values, vec!["Email", "Age"]);
    assert_eq!(data.rows[1].values, vec!["a@b.com", "42"]);
    assert!(
        data.rows
            .iter()
            .all(|row| !row.values.iter().any(|v| v.contains("ignored")))
    );
}

#[test]
fn garbled_workbook_is_an_input_error() {
    let err = parse_file("broken.xlsx", b"PK\x03\x04 not really".to_vec()).unwrap_err();
    assert!(matches!(err, IngestError::Workbook { .. }));
}

#[test]
fn empty_csv_yields_no_rows() {
    let data = parse_file("empty.csv", b"\n , \n".to_vec()).unwrap();
    assert!(data.is_empty());
}

#[tokio::test]
async fn rejects_unsupported_type_before_reading() {
    // the file does not exist: a read attempt would surface FileRead instead
    let err = read_file(Path::new("/nonexistent/scan.pdf")).await.unwrap_err();
    match err {
        IngestError::UnsupportedFileType { extension, .. } => assert_eq!(extension, "pdf"),
        other => panic!("unexpected error: {other}"),
    }
    let message = read_file(Path::new("scan.pdf"))
        .await
        .unwrap_err()
        .to_string();
    assert!(message.contains("csv, tsv, xls, xlsx"));
}

#[tokio::test]
async fn reads_csv_from_disk() {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("temp file");
    write!(file, "Email\na@b.com\n").unwrap();
    let data = read_file(file.path()).await.expect("read csv");
    assert_eq!(data.rows.len(), 2);
    assert_eq!(data.rows[1].values, vec!["a@b.com"]);
}

#[tokio::test]
async fn missing_file_is_a_read_error() {
    let err = read_file(Path::new("/nonexistent/dir/data.csv"))
        .await
        .unwrap_err();
    assert!(matches!(err, IngestError::FileRead { .. }));
}

proptest! {
    #[test]
    fn parsed_rows_are_never_blank(
        rows in prop::collection::vec(
            prop::collection::vec(prop_oneof!["", " ", "[a-z]{1,4}"], 1..4),
            0..12
        )
    ) {
        let text: String = rows.iter().map(|row| row.join(",") + "\n").collect();
        let data = parse_file("grid.csv", text.into_bytes()).unwrap();
        let expected = rows.iter().filter(|row| !is_blank_row(row)).count();
        prop_assert_eq!(data.rows.len(), expected);
        for (index, row) in data.rows.iter().enumerate() {
            prop_assert_eq!(row.index, index);
            prop_assert!(!is_blank_row(&row.values));
        }
    }
}
