//! Pipeline state machine.
//!
//! [`PipelineState::transition`] consumes the state and an [`Event`] and
//! returns the next state. Failures never panic or abort the pipeline: they
//! are recorded as [`StageError`]s against the step where they happened and
//! the step stays put.

use importer_ingest::{FileKind, IngestError};
use importer_map::MappingTable;
use importer_model::{FileData, ImportPayload, Template};

use crate::config::ImporterConfig;
use crate::error::{ImportError, Result, StageError};
use crate::header::{
    HeaderResolution, HeaderSelection, resolve_header, sheet_notice, upload_columns,
};
use crate::output::assemble_output;
use crate::step::{Step, StepController};

/// Input to the pipeline.
#[derive(Debug)]
pub enum Event {
    /// A file was chosen; its type is checked before it is read.
    UploadStarted { file_name: String },
    /// Parsing finished for the upload attempt `attempt`.
    FileParsed {
        attempt: u64,
        result: std::result::Result<FileData, IngestError>,
    },
    /// Header row chosen by index among the candidates.
    SelectHeaderRow(usize),
    Next,
    Back,
    /// Assigns an uploaded column to a template key; an empty key clears it.
    SetMapping { column: usize, key: String },
    SetInclusion { column: usize, include: bool },
    Submit,
    /// Discards all progress and returns to the upload step.
    Reload,
}

impl Event {
    fn action(&self) -> &'static str {
        match self {
            Self::UploadStarted { .. } => "upload",
            Self::FileParsed { .. } => "file parsing",
            Self::SelectHeaderRow(_) => "header selection",
            Self::Next => "next",
            Self::Back => "back",
            Self::SetMapping { .. } => "column mapping",
            Self::SetInclusion { .. } => "column inclusion",
            Self::Submit => "submit",
            Self::Reload => "reload",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingUpload {
    attempt: u64,
    file_name: String,
}

/// Complete state of one import.
#[derive(Debug, Clone)]
pub struct PipelineState {
    template: Template,
    show_download_template: bool,
    steps: StepController,
    attempts: u64,
    pending: Option<PendingUpload>,
    file: Option<FileData>,
    header: Option<HeaderSelection>,
    header_row: Option<usize>,
    mapping: Option<MappingTable>,
    output: Option<ImportPayload>,
    notices: Vec<String>,
    errors: Vec<StageError>,
}

impl PipelineState {
    /// Creates the initial state, validating the configured template.
    pub fn new(config: &ImporterConfig) -> Result<Self> {
        let template = config.template()?;
        tracing::info!(
            columns = template.len(),
            required = template.required_columns().count(),
            skip_header = config.skip_header_row_selection,
            "importer initialized"
        );
        Ok(Self {
            template,
            show_download_template: config.show_download_template_button,
            steps: StepController::new(config.skip_header_row_selection),
            attempts: 0,
            pending: None,
            file: None,
            header: None,
            header_row: None,
            mapping: None,
            output: None,
            notices: Vec::new(),
            errors: Vec::new(),
        })
    }

    /// Applies `event` and returns the resulting state.
    #[must_use]
    pub fn transition(mut self, event: Event) -> Self {
        self.apply(event);
        self
    }

    pub(crate) fn apply(&mut self, event: Event) {
        let step = self.step();
        let action = event.action();
        if let Event::FileParsed { attempt, .. } = &event
            && !self.is_pending(*attempt)
        {
            tracing::warn!(attempt, "discarding stale upload result");
            return;
        }

        self.errors.clear();
        let outcome = match event {
            Event::UploadStarted { file_name } => self.start_upload(file_name),
            Event::FileParsed { result, .. } => self.finish_upload(result),
            Event::SelectHeaderRow(index) => self.select_header(index),
            Event::Next => self.next(),
            Event::Back => {
                self.back();
                Ok(())
            }
            Event::SetMapping { column, key } => self
                .mapping_mut(action)
                .and_then(|table| {
                    table
                        .set_mapping(column, &key)
                        .map(drop)
                        .map_err(ImportError::from)
                }),
            Event::SetInclusion { column, include } => self
                .mapping_mut(action)
                .and_then(|table| {
                    table
                        .set_inclusion(column, include)
                        .map(drop)
                        .map_err(ImportError::from)
                }),
            Event::Submit => self.submit(),
            Event::Reload => {
                self.reload();
                Ok(())
            }
        };

        if let Err(error) = outcome {
            tracing::warn!(step = %step, code = error.code(), "{error}");
            self.errors.push(StageError::new(step, &error));
        }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn step(&self) -> Step {
        self.steps.current()
    }

    pub fn steps(&self) -> &StepController {
        &self.steps
    }

    /// Parsed upload, once a file has been read successfully.
    pub fn file(&self) -> Option<&FileData> {
        self.file.as_ref()
    }

    /// Header candidates and selection, while selecting a header row.
    pub fn header_selection(&self) -> Option<&HeaderSelection> {
        self.header.as_ref()
    }

    /// Header row in effect for the mapping step.
    pub fn header_row(&self) -> Option<usize> {
        self.header_row
    }

    pub fn mapping(&self) -> Option<&MappingTable> {
        self.mapping.as_ref()
    }

    /// Assembled payload, once submitted.
    pub fn output(&self) -> Option<&ImportPayload> {
        self.output.as_ref()
    }

    /// Informational messages, such as the multi-sheet notice.
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Errors raised by the most recent event.
    pub fn errors(&self) -> &[StageError] {
        &self.errors
    }

    /// Attempt id of the upload still being read, if any.
    pub fn pending_attempt(&self) -> Option<u64> {
        self.pending.as_ref().map(|pending| pending.attempt)
    }

    /// Name of the file still being read, if any.
    pub fn pending_file_name(&self) -> Option<&str> {
        self.pending.as_ref().map(|pending| pending.file_name.as_str())
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Example CSV for download, when the download is enabled.
    pub fn download_template(&self) -> Result<Option<String>> {
        if !self.show_download_template {
            return Ok(None);
        }
        Ok(Some(self.template.example_csv()?))
    }

    /// Re-enters a finished import after a restart.
    ///
    /// Only [`Step::Complete`] is restored; the upload itself is not persisted
    /// so any earlier step starts over from the upload step.
    pub(crate) fn resume(&mut self, step: Step) -> bool {
        step == Step::Complete && self.steps.restore(step)
    }

    fn is_pending(&self, attempt: u64) -> bool {
        self.pending_attempt() == Some(attempt)
    }

    fn require_step(&self, expected: Step, action: &'static str) -> Result<()> {
        let step = self.step();
        if step == expected {
            Ok(())
        } else {
            Err(ImportError::InvalidAction { action, step })
        }
    }

    fn start_upload(&mut self, file_name: String) -> Result<()> {
        self.require_step(Step::Upload, "upload")?;
        // a new drop supersedes any read in flight, even when it is rejected
        if let Some(superseded) = self.pending.take() {
            tracing::debug!(attempt = superseded.attempt, "superseded upload");
        }
        self.file = None;
        self.clear_progress();
        self.notices.clear();
        FileKind::from_file_name(&file_name)?;
        self.attempts += 1;
        tracing::info!(file = %file_name, attempt = self.attempts, "reading upload");
        self.pending = Some(PendingUpload {
            attempt: self.attempts,
            file_name,
        });
        Ok(())
    }

    fn finish_upload(&mut self, result: std::result::Result<FileData, IngestError>) -> Result<()> {
        self.pending = None;
        let file = result?;
        if file.is_empty() {
            return Err(ImportError::EmptyFile {
                file_name: file.file_name,
            });
        }

        self.notices = sheet_notice(&file).into_iter().collect();
        self.file = Some(file);
        self.advance_from_upload();
        Ok(())
    }

    fn select_header(&mut self, index: usize) -> Result<()> {
        self.require_step(Step::RowSelection, "header selection")?;
        match self.header.as_mut() {
            Some(selection) => selection.select(index),
            None => Err(ImportError::NoFileLoaded),
        }
    }

    fn next(&mut self) -> Result<()> {
        match self.step() {
            Step::Upload => {
                if self.file.is_none() {
                    return Err(ImportError::NoFileLoaded);
                }
                self.advance_from_upload();
                Ok(())
            }
            Step::RowSelection => {
                let row = self
                    .header
                    .as_ref()
                    .ok_or(ImportError::NoHeaderRowSelected)?
                    .confirm()?;
                self.enter_mapping(row);
                Ok(())
            }
            Step::MapColumns => self.submit(),
            Step::Complete => Ok(()),
        }
    }

    fn back(&mut self) {
        let from = self.step();
        let to = self.steps.back();
        if from == Step::MapColumns && to != from {
            self.mapping = None;
            self.header_row = None;
        }
    }

    fn submit(&mut self) -> Result<()> {
        self.require_step(Step::MapColumns, "submit")?;
        let (Some(file), Some(header_row), Some(table)) =
            (self.file.as_ref(), self.header_row, self.mapping.as_ref())
        else {
            return Err(ImportError::NoFileLoaded);
        };

        let missing: Vec<String> = table
            .missing_required()
            .iter()
            .map(|column| column.name.clone())
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::MissingRequiredColumns { columns: missing });
        }

        self.output = Some(assemble_output(file, header_row, table.mappings()));
        self.steps.next();
        Ok(())
    }

    fn reload(&mut self) {
        tracing::info!("reloading importer");
        self.pending = None;
        self.file = None;
        self.clear_progress();
        self.notices.clear();
        self.steps.reset();
    }

    fn clear_progress(&mut self) {
        self.header = None;
        self.header_row = None;
        self.mapping = None;
        self.output = None;
    }

    fn advance_from_upload(&mut self) {
        let Some(file) = self.file.as_ref() else {
            return;
        };
        match resolve_header(file, self.steps.skip_header()) {
            HeaderResolution::Fixed(row) => {
                self.steps.next();
                self.enter_mapping_at(row);
            }
            HeaderResolution::Select(selection) => {
                // keep an earlier choice when returning from the upload step
                if self.header.is_none() {
                    self.header = Some(selection);
                }
                self.steps.next();
            }
        }
    }

    fn enter_mapping(&mut self, header_row: usize) {
        self.steps.next();
        self.enter_mapping_at(header_row);
    }

    fn enter_mapping_at(&mut self, header_row: usize) {
        let Some(file) = self.file.as_ref() else {
            return;
        };
        let columns = upload_columns(file, header_row);
        self.header_row = Some(header_row);
        self.mapping = Some(MappingTable::new(self.template.clone(), columns));
    }

    fn mapping_mut(&mut self, action: &'static str) -> Result<&mut MappingTable> {
        self.require_step(Step::MapColumns, action)?;
        self.mapping.as_mut().ok_or(ImportError::NoFileLoaded)
    }
}
