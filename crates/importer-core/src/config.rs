//! Importer configuration.

use std::path::Path;

use importer_model::{Template, validate_template};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ImportError, Result};
use crate::store::StorageKey;

/// Caller-supplied importer options.
///
/// Mirrors the embedding configuration object: keys are camelCase and
/// presentation-only keys (titles, theme, and the like) are accepted and
/// ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImporterConfig {
    /// Raw template, as an object or a JSON string.
    pub template: Value,

    /// Treat row 0 as the header and drop the row selection step.
    #[serde(default)]
    pub skip_header_row_selection: bool,

    /// Offer the example CSV download on the upload step.
    #[serde(default = "default_true")]
    pub show_download_template_button: bool,

    /// Scopes step persistence to this instance.
    #[serde(default)]
    pub instance_id: Option<String>,
}

fn default_true() -> bool {
    true
}

impl ImporterConfig {
    pub fn new(template: Value) -> Self {
        Self {
            template,
            skip_header_row_selection: false,
            show_download_template_button: true,
            instance_id: None,
        }
    }

    #[must_use]
    pub fn with_skip_header(mut self, skip: bool) -> Self {
        self.skip_header_row_selection = skip;
        self
    }

    #[must_use]
    pub fn with_instance_id(mut self, id: impl Into<String>) -> Self {
        self.instance_id = Some(id.into());
        self
    }

    /// Parses a JSON configuration document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| ImportError::Config {
            message: e.to_string(),
        })
    }

    /// Reads a JSON configuration file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ImportError::Config {
            message: format!("{}: {e}", path.display()),
        })?;
        Self::from_json_str(&text)
    }

    /// Validates the template.
    pub fn template(&self) -> Result<Template> {
        Ok(validate_template(&self.template)?)
    }

    /// Key the current step is persisted under.
    pub fn storage_key(&self) -> StorageKey {
        match self.instance_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => StorageKey::for_instance(id),
            _ => StorageKey::shared(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_defaults_and_ignores_presentation_keys() {
        let config = ImporterConfig::from_json_str(
            r##"{
                "template": { "columns": [{ "name": "Email" }] },
                "primaryColor": "#7A5EF8",
                "darkMode": true
            }"##,
        )
        .unwrap();
        assert!(!config.skip_header_row_selection);
        assert!(config.show_download_template_button);
        assert_eq!(config.storage_key(), StorageKey::shared());
        assert_eq!(config.template().unwrap().len(), 1);
    }

    #[test]
    fn template_may_be_a_json_string() {
        let config = ImporterConfig::from_json_str(
            r#"{ "template": "{\"columns\": [{\"name\": \"Email\"}]}", "instanceId": "crm" }"#,
        )
        .unwrap();
        assert!(config.template().unwrap().contains_key("email"));
        assert_eq!(config.storage_key().as_str(), "importer:crm:step");
    }

    #[test]
    fn missing_template_is_a_config_error() {
        let err = ImporterConfig::from_json_str("{}").unwrap_err();
        assert_eq!(err.code(), "InvalidConfig");
        let err = ImporterConfig::new(Value::Null).template().unwrap_err();
        assert_eq!(err.code(), "MissingTemplate");
    }
}
