//! Step persistence.
//!
//! The current step is saved under a storage key whenever it changes so a
//! reopened importer can tell whether the last import finished.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::step::Step;

/// Storage key shared by every importer without an instance id.
pub const DEFAULT_STEP_KEY: &str = "importer:step";

/// Key a step record is stored under.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageKey(String);

impl StorageKey {
    /// The key shared by all importers.
    pub fn shared() -> Self {
        Self(DEFAULT_STEP_KEY.to_string())
    }

    /// A key private to one importer instance.
    pub fn for_instance(instance_id: &str) -> Self {
        Self(format!("importer:{instance_id}:step"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persisted step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRecord {
    pub step: Step,
    /// Position within the step sequence at the time of saving.
    pub index: usize,
    pub updated_at: DateTime<Utc>,
}

impl StepRecord {
    pub fn new(step: Step, index: usize) -> Self {
        Self {
            step,
            index,
            updated_at: Utc::now(),
        }
    }
}

/// Errors raised by step stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("step store {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Storage for step records.
pub trait StepStore {
    fn load(&self, key: &StorageKey) -> Result<Option<StepRecord>, StoreError>;

    fn save(&mut self, key: &StorageKey, record: &StepRecord) -> Result<(), StoreError>;

    fn clear(&mut self, key: &StorageKey) -> Result<(), StoreError>;
}

/// In-memory store, for tests and embedders without durable storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStepStore {
    records: BTreeMap<StorageKey, StepRecord>,
}

impl MemoryStepStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StepStore for MemoryStepStore {
    fn load(&self, key: &StorageKey) -> Result<Option<StepRecord>, StoreError> {
        Ok(self.records.get(key).cloned())
    }

    fn save(&mut self, key: &StorageKey, record: &StepRecord) -> Result<(), StoreError> {
        self.records.insert(key.clone(), record.clone());
        Ok(())
    }

    fn clear(&mut self, key: &StorageKey) -> Result<(), StoreError> {
        self.records.remove(key);
        Ok(())
    }
}

/// Store backed by one JSON file holding every key's record.
///
/// Writes go to a temp file that is then renamed over the target.
#[derive(Debug, Clone)]
pub struct JsonFileStepStore {
    path: PathBuf,
}

impl JsonFileStepStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<StorageKey, StepRecord>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(StoreError::Io {
                    operation: "read",
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        serde_json::from_str(&text).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            source: e,
        })
    }

    fn write_all(&self, records: &BTreeMap<StorageKey, StepRecord>) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(records).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            source: e,
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                operation: "create directory",
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let mut file = File::create(&temp_path).map_err(|e| StoreError::Io {
            operation: "create",
            path: temp_path.clone(),
            source: e,
        })?;
        file.write_all(&bytes).map_err(|e| StoreError::Io {
            operation: "write",
            path: temp_path.clone(),
            source: e,
        })?;
        file.sync_all().map_err(|e| StoreError::Io {
            operation: "sync",
            path: temp_path.clone(),
            source: e,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| StoreError::Io {
            operation: "rename",
            path: self.path.clone(),
            source: e,
        })?;
        Ok(())
    }
}

impl StepStore for JsonFileStepStore {
    fn load(&self, key: &StorageKey) -> Result<Option<StepRecord>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn save(&mut self, key: &StorageKey, record: &StepRecord) -> Result<(), StoreError> {
        let mut records = self.read_all()?;
        records.insert(key.clone(), record.clone());
        self.write_all(&records)?;
        tracing::debug!(key = %key, step = %record.step, "saved step");
        Ok(())
    }

    fn clear(&mut self, key: &StorageKey) -> Result<(), StoreError> {
        let mut records = self.read_all()?;
        if records.remove(key).is_some() {
            self.write_all(&records)?;
        }
        Ok(())
    }
}
