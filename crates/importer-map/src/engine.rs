//! Mapping suggestion engine.

use std::collections::{BTreeMap, BTreeSet};

use importer_model::{ColumnMapping, Template, TemplateColumn, UploadColumn};
use serde::Serialize;

use crate::score::similarity_score;

/// Minimum similarity a suggestion must exceed (strictly).
pub const SUGGESTION_THRESHOLD: f64 = 0.9;

/// Why a template column was suggested for an uploaded column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum MatchSource {
    /// Header listed in the template column's suggested mappings.
    Hint,
    /// Header similar enough to the template key.
    Similarity(f64),
}

impl MatchSource {
    /// Confidence in `[0, 1]`; hints count as certain.
    pub fn confidence(self) -> f64 {
        match self {
            Self::Hint => 1.0,
            Self::Similarity(score) => score,
        }
    }
}

/// A suggested assignment of an uploaded column to a template column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub upload_column: usize,
    pub key: String,
    pub source: MatchSource,
}

/// Engine producing initial one-to-one mapping suggestions.
///
/// Uploaded columns are visited in file order. For each one:
/// 1. an unclaimed template column listing the header as a suggested
///    mapping wins outright, regardless of similarity;
/// 2. otherwise every unclaimed template key (underscores read as spaces) is
///    scored against the lower-cased header, and the best is taken if it
///    exceeds the threshold. Ties go to the earlier template column.
///
/// A template column claimed either way is never offered again.
#[derive(Debug, Clone)]
pub struct SuggestionEngine<'a> {
    template: &'a Template,
    threshold: f64,
}

impl<'a> SuggestionEngine<'a> {
    pub fn new(template: &'a Template) -> Self {
        Self {
            template,
            threshold: SUGGESTION_THRESHOLD,
        }
    }

    /// Overrides the similarity threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Suggests template columns for the given uploaded columns.
    pub fn suggest(&self, columns: &[UploadColumn]) -> Vec<Suggestion> {
        let mut claimed: BTreeSet<&str> = BTreeSet::new();
        let mut suggestions = Vec::new();

        for column in columns {
            let available: Vec<&TemplateColumn> = self
                .template
                .columns()
                .iter()
                .filter(|candidate| !claimed.contains(candidate.key.as_str()))
                .collect();

            // hints only reach unclaimed columns so suggestions stay one-to-one
            let hinted = available
                .iter()
                .copied()
                .find(|candidate| candidate.has_hint(&column.name));
            let found = match hinted {
                Some(candidate) => Some((candidate, MatchSource::Hint)),
                None => self
                    .best_similar(available.iter().copied(), &column.name)
                    .map(|(candidate, score)| (candidate, MatchSource::Similarity(score))),
            };

            if let Some((candidate, source)) = found {
                tracing::debug!(
                    column = column.index,
                    header = %column.name,
                    key = %candidate.key,
                    source = ?source,
                    "suggested mapping"
                );
                claimed.insert(candidate.key.as_str());
                suggestions.push(Suggestion {
                    upload_column: column.index,
                    key: candidate.key.clone(),
                    source,
                });
            }
        }

        suggestions
    }

    /// Suggestions as a complete mapping; unmatched columns stay unmapped.
    pub fn mappings(&self, columns: &[UploadColumn]) -> BTreeMap<usize, ColumnMapping> {
        let mut mappings: BTreeMap<usize, ColumnMapping> = columns
            .iter()
            .map(|column| (column.index, ColumnMapping::unmapped()))
            .collect();
        for suggestion in self.suggest(columns) {
            mappings.insert(
                suggestion.upload_column,
                ColumnMapping::mapped(suggestion.key),
            );
        }
        mappings
    }

    fn best_similar<'t>(
        &self,
        candidates: impl Iterator<Item = &'t TemplateColumn>,
        header: &str,
    ) -> Option<(&'t TemplateColumn, f64)> {
        let header = header.to_lowercase();
        let mut best: Option<(&TemplateColumn, f64)> = None;
        for candidate in candidates {
            let score = similarity_score(&candidate.key.replace('_', " "), &header);
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((candidate, score));
            }
        }
        best.filter(|(_, score)| *score > self.threshold)
    }
}

/// Initial mapping for every uploaded column, keyed by column index.
pub fn suggest_mappings(
    columns: &[UploadColumn],
    template: &Template,
) -> BTreeMap<usize, ColumnMapping> {
    SuggestionEngine::new(template).mappings(columns)
}

#[cfg(test)]
mod tests {
    use importer_model::validate_template;
    use serde_json::json;

    use super::*;

    fn columns(names: &[&str]) -> Vec<UploadColumn> {
        names
            .iter()
            .enumerate()
            .map(|(index, name)| UploadColumn::new(index, *name))
            .collect()
    }

    #[test]
    fn hint_beats_similarity() {
        let template = validate_template(&json!({
            "columns": [
                { "name": "Mail" },
                { "name": "Email", "suggested_mappings": ["MAIL"] }
            ]
        }))
        .unwrap();
        let suggestions = SuggestionEngine::new(&template).suggest(&columns(&["Mail"]));
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].key, "email");
        assert_eq!(suggestions[0].source, MatchSource::Hint);
    }

    #[test]
    fn tie_goes_to_first_declared_column() {
        let template = validate_template(&json!({
            "columns": [
                { "name": "Email", "key": "email" },
                { "name": "Email 2", "key": "email_2" }
            ]
        }))
        .unwrap();
        // "email" scores 1.0 against both keys
        let suggestions = SuggestionEngine::new(&template).suggest(&columns(&["email"]));
        assert_eq!(suggestions[0].key, "email");
    }

    #[test]
    fn threshold_is_exclusive() {
        let template = validate_template(&json!({ "columns": [{ "name": "Phones" }] })).unwrap();
        let cols = columns(&["phone"]);
        assert!(SuggestionEngine::new(&template).suggest(&cols).is_empty());
        let relaxed = SuggestionEngine::new(&template).with_threshold(0.8);
        assert_eq!(relaxed.suggest(&cols).len(), 1);
    }
}
