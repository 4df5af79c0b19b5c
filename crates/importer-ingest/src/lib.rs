//! Spreadsheet ingestion.
//!
//! This crate turns an uploaded file into [`FileData`]: a rectangular grid of
//! raw string cells with blank rows removed.
//!
//! # Features
//!
//! - **File type dispatch**: `csv`, `tsv`, `xls` and `xlsx` by extension; any
//!   other extension is rejected before the file is read
//! - **Delimited text**: parsed with the `csv` crate, no header inference
//! - **Workbooks**: first sheet only, via `calamine`; all sheet names are kept
//! - **Row warnings**: malformed rows are reported, not fatal
//!
//! # Example
//!
//! ```ignore
//! use importer_ingest::read_file;
//!
//! let data = read_file(Path::new("contacts.xlsx")).await?;
//! println!("{} rows from {:?}", data.rows.len(), data.first_sheet());
//! ```

mod delimited;
mod error;
mod kind;
mod reader;
mod rows;
mod workbook;

// === Error Types ===
pub use error::{IngestError, Result};

// === File Types ===
pub use kind::{ACCEPTED_EXTENSIONS, FileKind};

// === Parsing ===
pub use reader::{parse_file, read_file};
pub use rows::{build_file_data, is_blank_row};

pub use importer_model::{FileData, FileRow};
