use serde::{Deserialize, Serialize};

/// Assignment of one uploaded column to a template column.
///
/// An empty `key` means the column is unmapped; `include` is only ever true
/// for mapped columns. The `template`/`use` spellings of the id-based mapping
/// format are accepted on input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    #[serde(alias = "template")]
    pub key: String,
    #[serde(alias = "use")]
    pub include: bool,
}

impl ColumnMapping {
    /// A column with no template assignment.
    pub fn unmapped() -> Self {
        Self::default()
    }

    /// A column mapped to `key` and included in output.
    pub fn mapped(key: impl Into<String>) -> Self {
        let key = key.into();
        let include = !key.is_empty();
        Self { key, include }
    }

    pub fn is_mapped(&self) -> bool {
        !self.key.is_empty()
    }

    /// Returns true if this column contributes to output.
    pub fn is_included(&self) -> bool {
        self.include && self.is_mapped()
    }
}

/// An uploaded column as seen by the mapping step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadColumn {
    /// Position of the column in the file.
    pub index: usize,
    /// Header cell text.
    pub name: String,
    /// First non-blank value below the header row.
    pub sample: Option<String>,
}

impl UploadColumn {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            sample: None,
        }
    }

    #[must_use]
    pub fn with_sample(mut self, sample: Option<String>) -> Self {
        self.sample = sample;
        self
    }
}
