//! Mapping overrides given on the command line.

use importer_model::UploadColumn;

/// A `--map COLUMN=KEY` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingOverride {
    /// Uploaded column, by header text or zero-based index.
    pub column: String,
    /// Template key; empty to leave the column unmapped.
    pub key: String,
}

/// Parses a `COLUMN=KEY` argument.
///
/// The split is on the last `=`, so header text may itself contain `=`.
pub fn parse_mapping_override(raw: &str) -> Result<MappingOverride, String> {
    let (column, key) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected COLUMN=KEY, got '{raw}'"))?;
    let column = column.trim();
    if column.is_empty() {
        return Err(format!("missing column in '{raw}'"));
    }
    Ok(MappingOverride {
        column: column.to_string(),
        key: key.trim().to_string(),
    })
}

/// Finds the uploaded column named by `selector`.
///
/// Header text matches case-insensitively after trimming and takes
/// precedence over a numeric index.
pub fn resolve_column(columns: &[UploadColumn], selector: &str) -> Option<usize> {
    let wanted = selector.trim();
    columns
        .iter()
        .find(|column| column.name.trim().eq_ignore_ascii_case(wanted))
        .map(|column| column.index)
        .or_else(|| {
            wanted
                .parse::<usize>()
                .ok()
                .filter(|index| columns.iter().any(|column| column.index == *index))
        })
}
