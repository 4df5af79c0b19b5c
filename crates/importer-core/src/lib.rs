//! Import pipeline core.
//!
//! Sequences the import stages as an explicit state machine:
//!
//! 1. **Upload** - a file is chosen and parsed ([`importer_ingest`])
//! 2. **RowSelection** - the header row is picked (skipped in skip-header mode)
//! 3. **MapColumns** - uploaded columns are mapped onto the template
//! 4. **Complete** - the payload has been assembled and delivered
//!
//! [`PipelineState::transition`] is the pure reducer driving these stages;
//! [`Importer`] wraps it with file reads, step persistence and the
//! completion callback.

pub mod config;
pub mod error;
pub mod header;
pub mod importer;
pub mod output;
pub mod pipeline;
pub mod step;
pub mod store;

pub use config::ImporterConfig;
pub use error::{ImportError, Result, StageError};
pub use header::{
    HeaderResolution, HeaderSelection, MAX_HEADER_CANDIDATES, resolve_header, sheet_notice,
    upload_columns,
};
pub use importer::{Importer, load_upload};
pub use output::assemble_output;
pub use pipeline::{Event, PipelineState};
pub use step::{Step, StepController};
pub use store::{
    DEFAULT_STEP_KEY, JsonFileStepStore, MemoryStepStore, StepRecord, StepStore, StorageKey,
    StoreError,
};
