use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Result handed to the embedding application on completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportPayload {
    pub num_rows: usize,
    pub num_columns: usize,
    pub columns: Vec<OutputColumn>,
    pub rows: Vec<OutputRow>,
    /// Always `None` for an assembled payload; failures never reach assembly.
    pub error: Option<String>,
}

/// An included column of the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputColumn {
    /// Template key.
    pub key: String,
    /// Same as `key`, kept for consumers of the original payload shape.
    pub name: String,
    /// Header text of the uploaded column the values came from.
    pub source_header: String,
}

/// A data row keyed by template column key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    pub index: usize,
    pub values: BTreeMap<String, String>,
}
