//! Importer driver.
//!
//! Owns a [`PipelineState`], reads uploads, persists the current step and
//! delivers the payload to the completion callback.

use std::path::Path;

use importer_ingest::{IngestError, read_file};
use importer_model::{FileData, ImportPayload};

use crate::config::ImporterConfig;
use crate::error::Result;
use crate::pipeline::{Event, PipelineState};
use crate::step::Step;
use crate::store::{StepRecord, StepStore, StorageKey};

type CompletionCallback = Box<dyn FnMut(&ImportPayload)>;

/// Reads and parses an upload without touching any importer.
///
/// Pair with [`Importer::begin_upload`] and [`Importer::finish_upload`] when
/// several reads may be in flight; only the latest attempt is applied.
pub async fn load_upload(path: &Path) -> std::result::Result<FileData, IngestError> {
    read_file(path).await
}

/// A running import.
pub struct Importer {
    state: PipelineState,
    store: Box<dyn StepStore>,
    key: StorageKey,
    on_complete: CompletionCallback,
}

impl std::fmt::Debug for Importer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Importer")
            .field("state", &self.state)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl Importer {
    /// Starts an importer.
    ///
    /// Fails only on configuration errors. A persisted
    /// [`Step::Complete`] under this importer's storage key is restored.
    pub fn new(
        config: &ImporterConfig,
        store: Box<dyn StepStore>,
        on_complete: impl FnMut(&ImportPayload) + 'static,
    ) -> Result<Self> {
        let mut state = PipelineState::new(config)?;
        let key = config.storage_key();
        match store.load(&key) {
            Ok(Some(record)) => {
                if state.resume(record.step) {
                    tracing::info!(key = %key, "restored completed import");
                } else {
                    tracing::debug!(key = %key, step = %record.step, "not restoring step");
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(key = %key, "failed to load saved step: {e}"),
        }
        Ok(Self {
            state,
            store,
            key,
            on_complete: Box::new(on_complete),
        })
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    pub fn step(&self) -> Step {
        self.state.step()
    }

    pub fn storage_key(&self) -> &StorageKey {
        &self.key
    }

    /// Applies `event`, persisting the step and firing the completion
    /// callback when the import finishes.
    pub fn dispatch(&mut self, event: Event) -> &PipelineState {
        let before = self.state.step();
        self.state.apply(event);
        let after = self.state.step();
        if before == after {
            return &self.state;
        }

        self.persist_step();
        if after == Step::Complete
            && let Some(payload) = self.state.output()
        {
            tracing::info!(
                rows = payload.num_rows,
                columns = payload.num_columns,
                "import complete"
            );
            (self.on_complete)(payload);
        }
        &self.state
    }

    /// Registers an upload of `file_name` and returns its attempt id, or
    /// `None` if the upload was rejected.
    pub fn begin_upload(&mut self, file_name: impl Into<String>) -> Option<u64> {
        self.dispatch(Event::UploadStarted {
            file_name: file_name.into(),
        });
        self.state.pending_attempt()
    }

    /// Applies the parse result of upload `attempt`; stale attempts are
    /// ignored.
    pub fn finish_upload(
        &mut self,
        attempt: u64,
        result: std::result::Result<FileData, IngestError>,
    ) -> &PipelineState {
        self.dispatch(Event::FileParsed { attempt, result })
    }

    /// Reads `path` and applies the result.
    pub async fn upload(&mut self, path: &Path) -> &PipelineState {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let Some(attempt) = self.begin_upload(file_name) else {
            return &self.state;
        };
        let result = load_upload(path).await;
        self.finish_upload(attempt, result)
    }

    fn persist_step(&mut self) {
        let record = StepRecord::new(self.state.step(), self.state.steps().index());
        if let Err(e) = self.store.save(&self.key, &record) {
            tracing::warn!(key = %self.key, "failed to save step: {e}");
        }
    }
}
