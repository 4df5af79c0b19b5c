//! Template schema and validation.
//!
//! The caller hands the pipeline a template either as a JSON string or as an
//! already parsed JSON value. [`validate_template`] normalizes it into an
//! immutable [`Template`]: keys are derived where missing, and every
//! structural rule is checked in column order so the first failure names the
//! offending column.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, TemplateError};

/// File name offered for the downloadable example CSV.
pub const EXAMPLE_CSV_FILE_NAME: &str = "example.csv";

/// A destination column described by the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateColumn {
    /// Display name.
    pub name: String,
    /// Unique key used in the output payload.
    pub key: String,
    /// Optional help text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether submission requires this column to be mapped and included.
    #[serde(default)]
    pub required: bool,
    /// Uploaded header names that map to this column outright.
    #[serde(default)]
    pub suggested_mappings: Vec<String>,
}

impl TemplateColumn {
    /// Returns true if `header` is one of this column's suggested mappings.
    ///
    /// Comparison ignores case and surrounding whitespace.
    pub fn has_hint(&self, header: &str) -> bool {
        let needle = header.trim().to_lowercase();
        !needle.is_empty()
            && self
                .suggested_mappings
                .iter()
                .any(|hint| hint.trim().to_lowercase() == needle)
    }
}

/// Validated destination schema.
///
/// Only [`validate_template`] constructs a `Template`, so every instance
/// upholds the key and hint uniqueness rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    columns: Vec<TemplateColumn>,
}

impl Template {
    /// Columns in declaration order.
    pub fn columns(&self) -> &[TemplateColumn] {
        &self.columns
    }

    /// Looks up a column by key.
    pub fn column(&self, key: &str) -> Option<&TemplateColumn> {
        self.columns.iter().find(|column| column.key == key)
    }

    /// Returns true if `key` names a template column.
    pub fn contains_key(&self, key: &str) -> bool {
        self.column(key).is_some()
    }

    /// Columns flagged as required.
    pub fn required_columns(&self) -> impl Iterator<Item = &TemplateColumn> {
        self.columns.iter().filter(|column| column.required)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Renders a CSV with the column names as its only (header) row.
    pub fn example_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(self.columns.iter().map(|column| column.name.as_str()))
            .map_err(|e| TemplateError::CsvExport {
                message: e.to_string(),
            })?;
        let bytes = writer.into_inner().map_err(|e| TemplateError::CsvExport {
            message: e.to_string(),
        })?;
        String::from_utf8(bytes).map_err(|e| TemplateError::CsvExport {
            message: e.to_string(),
        })
    }
}

/// Derives a column key from its name.
///
/// Lower-cases the trimmed name and replaces every whitespace or
/// non-ASCII-alphanumeric character with `_`.
pub fn derive_key(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect()
}

/// Validates a template given as a JSON string.
pub fn validate_template_str(text: &str) -> Result<Template> {
    let value: Value = serde_json::from_str(text).map_err(|e| TemplateError::InvalidJson {
        message: e.to_string(),
    })?;
    validate_parsed(&value)
}

/// Validates a template given as a JSON value.
///
/// A JSON string value is treated as serialized template text and parsed
/// first, so configuration may carry the template either way.
pub fn validate_template(raw: &Value) -> Result<Template> {
    match raw {
        Value::String(text) => validate_template_str(text),
        other => validate_parsed(other),
    }
}

fn validate_parsed(value: &Value) -> Result<Template> {
    let object = match value {
        Value::Object(object) if !object.is_empty() => object,
        _ => return Err(TemplateError::MissingTemplate),
    };
    let entries = match object.get("columns") {
        None | Some(Value::Null) => return Err(TemplateError::MissingTemplate),
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(TemplateError::ColumnsNotArray),
    };

    let mut keys = BTreeSet::new();
    let mut hints = BTreeSet::new();
    let mut columns = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let column = validate_column(index, entry, &mut keys, &mut hints)?;
        columns.push(column);
    }

    if columns.is_empty() {
        return Err(TemplateError::EmptyTemplate);
    }
    Ok(Template { columns })
}

fn validate_column(
    index: usize,
    entry: &Value,
    keys: &mut BTreeSet<String>,
    hints: &mut BTreeSet<String>,
) -> Result<TemplateColumn> {
    let empty = Map::new();
    let fields = entry.as_object().unwrap_or(&empty);

    let name = string_field(fields, "name").unwrap_or_default();
    if name.trim().is_empty() {
        return Err(TemplateError::MissingColumnName { index });
    }

    let key = string_field(fields, "key")
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .unwrap_or_else(|| derive_key(&name));
    if !keys.insert(key.clone()) {
        return Err(TemplateError::DuplicateColumnKey { index, key });
    }

    let suggested_mappings = match fields.get("suggested_mappings") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(values)) => {
            let mut mappings = Vec::with_capacity(values.len());
            for value in values {
                let hint = value.as_str().unwrap_or_default();
                if hint.trim().is_empty() || !hints.insert(hint.trim().to_lowercase()) {
                    return Err(TemplateError::InvalidSuggestedMapping {
                        index,
                        value: value_text(value),
                    });
                }
                mappings.push(hint.to_string());
            }
            mappings
        }
        Some(other) => {
            return Err(TemplateError::InvalidSuggestedMapping {
                index,
                value: value_text(other),
            });
        }
    };

    Ok(TemplateColumn {
        name,
        key,
        description: string_field(fields, "description"),
        required: fields
            .get("required")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        suggested_mappings,
    })
}

fn string_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields.get(name).and_then(Value::as_str).map(str::to_string)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
