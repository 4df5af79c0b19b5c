use std::path::PathBuf;

use importer_core::StageError;
use importer_map::{MappingSummary, MatchSource};
use importer_model::ImportPayload;

#[derive(Debug)]
pub struct ImportResult {
    pub file_name: String,
    pub header_row: usize,
    pub columns: Vec<ColumnReport>,
    pub summary: MappingSummary,
    pub notices: Vec<String>,
    pub errors: Vec<StageError>,
    pub payload: Option<ImportPayload>,
    /// Where the payload was written; `None` for stdout.
    pub output: Option<PathBuf>,
}

impl ImportResult {
    pub fn is_complete(&self) -> bool {
        self.payload.is_some()
    }
}

#[derive(Debug)]
pub struct ColumnReport {
    pub index: usize,
    pub header: String,
    pub sample: Option<String>,
    pub key: Option<String>,
    pub required: bool,
    pub included: bool,
    pub source: Option<MatchSource>,
}
