//! CSV/TSV parsing.

use csv::ReaderBuilder;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Raw rows of a delimited file plus row-level warnings.
#[derive(Debug, Default)]
pub(crate) struct DelimitedRows {
    pub rows: Vec<Vec<String>>,
    pub errors: Vec<String>,
}

/// Parses delimited text into raw rows.
///
/// Records may have differing lengths. Undecodable bytes are replaced and
/// reported; a record the reader rejects is reported and skipped. Neither
/// aborts the parse.
pub(crate) fn parse_delimited(bytes: &[u8], delimiter: u8) -> DelimitedRows {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(bytes);

    let mut parsed = DelimitedRows::default();
    for (ordinal, record) in reader.byte_records().enumerate() {
        let line = ordinal + 1;
        match record {
            Ok(record) => {
                let line = record.position().map_or(line as u64, |pos| pos.line());
                let mut lossy = false;
                let row = record
                    .iter()
                    .map(|field| match std::str::from_utf8(field) {
                        Ok(text) => text.to_string(),
                        Err(_) => {
                            lossy = true;
                            String::from_utf8_lossy(field).into_owned()
                        }
                    })
                    .collect();
                if lossy {
                    parsed
                        .errors
                        .push(format!("Row {line}: invalid UTF-8 replaced"));
                }
                parsed.rows.push(row);
            }
            Err(err) => {
                tracing::warn!(line, error = %err, "skipping malformed row");
                parsed.errors.push(format!("Row {line}: {err}"));
                if err.is_io_error() {
                    break;
                }
            }
        }
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quoted_fields() {
        let parsed = parse_delimited(b"name,note\n\"Doe, Jane\",\"said \"\"hi\"\"\"\n", b',');
        assert_eq!(parsed.rows[1], vec!["Doe, Jane", "said \"hi\""]);
        assert!(parsed.errors.is_empty());
    }

    #[test]
    fn strips_byte_order_mark() {
        let parsed = parse_delimited(b"\xEF\xBB\xBFEmail\na@b.com\n", b',');
        assert_eq!(parsed.rows[0], vec!["Email"]);
    }

    #[test]
    fn parses_tabs() {
        let parsed = parse_delimited(b"a\tb,c\n1\t2\n", b'\t');
        assert_eq!(parsed.rows[0], vec!["a", "b,c"]);
        assert_eq!(parsed.rows[1], vec!["1", "2"]);
    }

    #[test]
    fn keeps_ragged_records() {
        let parsed = parse_delimited(b"a,b,c\n1\n", b',');
        assert_eq!(parsed.rows[1], vec!["1"]);
    }

    #[test]
    fn reports_invalid_utf8_without_aborting() {
        let parsed = parse_delimited(b"name\nca\xFFfe\nlast\n", b',');
        assert_eq!(parsed.rows.len(), 3);
        assert_eq!(parsed.errors, vec!["Row 2: invalid UTF-8 replaced"]);
        assert_eq!(parsed.rows[2], vec!["last"]);
    }
}
