//! Mapping state for the interactive mapping step.
//!
//! [`MappingTable`] holds one [`ColumnMapping`] per uploaded column and keeps
//! the mapping one-to-one: assigning a template column that another uploaded
//! column already holds clears the other assignment.

use std::collections::BTreeMap;

use importer_model::{ColumnMapping, Template, TemplateColumn, UploadColumn};
use serde::Serialize;

use crate::engine::{MatchSource, SuggestionEngine};
use crate::error::MappingError;

/// Current mapping of uploaded columns onto a template.
#[derive(Debug, Clone)]
pub struct MappingTable {
    template: Template,
    columns: Vec<UploadColumn>,
    mappings: BTreeMap<usize, ColumnMapping>,
    /// How each still-unedited suggestion was found.
    sources: BTreeMap<usize, MatchSource>,
}

impl MappingTable {
    /// Creates the table with suggestions from the engine.
    pub fn new(template: Template, columns: Vec<UploadColumn>) -> Self {
        let engine = SuggestionEngine::new(&template);
        let suggestions = engine.suggest(&columns);
        let mut mappings: BTreeMap<usize, ColumnMapping> = columns
            .iter()
            .map(|column| (column.index, ColumnMapping::unmapped()))
            .collect();
        let mut sources = BTreeMap::new();
        for suggestion in suggestions {
            sources.insert(suggestion.upload_column, suggestion.source);
            mappings.insert(
                suggestion.upload_column,
                ColumnMapping::mapped(suggestion.key),
            );
        }
        tracing::info!(
            columns = columns.len(),
            suggested = sources.len(),
            "initialized column mapping"
        );
        Self {
            template,
            columns,
            mappings,
            sources,
        }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Uploaded columns in file order.
    pub fn columns(&self) -> &[UploadColumn] {
        &self.columns
    }

    /// All mappings keyed by uploaded column index.
    pub fn mappings(&self) -> &BTreeMap<usize, ColumnMapping> {
        &self.mappings
    }

    pub fn mapping(&self, column: usize) -> Option<&ColumnMapping> {
        self.mappings.get(&column)
    }

    /// How the current assignment of `column` was suggested, if it is an
    /// untouched suggestion.
    pub fn source(&self, column: usize) -> Option<MatchSource> {
        self.sources.get(&column).copied()
    }

    /// Uploaded column currently holding `key`.
    pub fn column_for_key(&self, key: &str) -> Option<usize> {
        self.mappings
            .iter()
            .find(|(_, mapping)| mapping.is_mapped() && mapping.key == key)
            .map(|(&index, _)| index)
    }

    /// Assigns `column` to the template column `key`; an empty key clears it.
    ///
    /// A mapped column is included. If another uploaded column held `key`,
    /// its assignment is cleared and its index returned.
    pub fn set_mapping(&mut self, column: usize, key: &str) -> Result<Option<usize>, MappingError> {
        self.ensure_column(column)?;
        if !key.is_empty() && !self.template.contains_key(key) {
            return Err(MappingError::UnknownTemplateColumn(key.to_string()));
        }

        let displaced = if key.is_empty() {
            None
        } else {
            self.column_for_key(key).filter(|&holder| holder != column)
        };
        if let Some(holder) = displaced {
            self.mappings.insert(holder, ColumnMapping::unmapped());
            self.sources.remove(&holder);
            tracing::debug!(column = holder, key, "cleared conflicting mapping");
        }

        self.mappings.insert(column, ColumnMapping::mapped(key));
        self.sources.remove(&column);
        Ok(displaced)
    }

    /// Includes or excludes a mapped column.
    ///
    /// Returns `false` without changing anything when `column` is unmapped.
    pub fn set_inclusion(&mut self, column: usize, include: bool) -> Result<bool, MappingError> {
        self.ensure_column(column)?;
        match self.mappings.get_mut(&column) {
            Some(mapping) if mapping.is_mapped() => {
                mapping.include = include;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Template columns `column` may choose from.
    ///
    /// Excludes columns claimed by other uploaded columns but keeps the
    /// row's own current choice.
    pub fn options_for(&self, column: usize) -> Result<Vec<&TemplateColumn>, MappingError> {
        self.ensure_column(column)?;
        Ok(self
            .template
            .columns()
            .iter()
            .filter(|candidate| {
                self.column_for_key(&candidate.key)
                    .is_none_or(|holder| holder == column)
            })
            .collect())
    }

    /// Required template columns without an included mapping.
    pub fn missing_required(&self) -> Vec<&TemplateColumn> {
        self.template
            .required_columns()
            .filter(|required| !has_included(&self.mappings, &required.key))
            .collect()
    }

    /// Returns true if every required column is mapped and included.
    pub fn is_complete(&self) -> bool {
        verify_required(&self.template, &self.mappings)
    }

    pub fn summary(&self) -> MappingSummary {
        let required_total = self.template.required_columns().count();
        MappingSummary {
            total_columns: self.columns.len(),
            mapped: self.mappings.values().filter(|m| m.is_mapped()).count(),
            included: self.mappings.values().filter(|m| m.is_included()).count(),
            required_total,
            required_mapped: required_total - self.missing_required().len(),
        }
    }

    fn ensure_column(&self, column: usize) -> Result<(), MappingError> {
        if self.mappings.contains_key(&column) {
            Ok(())
        } else {
            Err(MappingError::UnknownUploadColumn(column))
        }
    }
}

/// Returns true if every required template column has an included mapping.
pub fn verify_required(template: &Template, mappings: &BTreeMap<usize, ColumnMapping>) -> bool {
    template
        .required_columns()
        .all(|required| has_included(mappings, &required.key))
}

fn has_included(mappings: &BTreeMap<usize, ColumnMapping>, key: &str) -> bool {
    mappings
        .values()
        .any(|mapping| mapping.is_included() && mapping.key == key)
}

/// Summary of mapping counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MappingSummary {
    /// Uploaded columns.
    pub total_columns: usize,
    /// Uploaded columns assigned to a template column.
    pub mapped: usize,
    /// Mapped columns included in output.
    pub included: usize,
    /// Required template columns.
    pub required_total: usize,
    /// Required template columns with an included mapping.
    pub required_mapped: usize,
}
