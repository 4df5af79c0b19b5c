//! Tests for the CLI library components.

use importer_cli::logging::{LogConfig, REDACTED_VALUE, log_data_enabled, redact_value};
use importer_cli::overrides::{parse_mapping_override, resolve_column};
use importer_model::UploadColumn;
use tracing::level_filters::LevelFilter;

fn columns() -> Vec<UploadColumn> {
    vec![
        UploadColumn::new(0, "Email"),
        UploadColumn::new(1, "2024"),
        UploadColumn::new(2, "Notes"),
    ]
}

#[test]
fn mapping_override_splits_on_last_equals() {
    let parsed = parse_mapping_override(" a=b = email ").unwrap();
    insta::assert_debug_snapshot!(parsed, @r#"
    MappingOverride {
        column: "a=b",
        key: "email",
    }
    "#);
}

#[test]
fn resolves_by_header_then_index() {
    let columns = columns();
    assert_eq!(resolve_column(&columns, " email "), Some(0));
    assert_eq!(resolve_column(&columns, "2"), Some(2));
    // header text wins over an index of the same spelling
    assert_eq!(resolve_column(&columns, "2024"), Some(1));
    assert_eq!(resolve_column(&columns, "7"), None);
    assert_eq!(resolve_column(&columns, "Phone"), None);
}

#[test]
fn cell_values_are_redacted_by_default() {
    assert!(!log_data_enabled());
    assert_eq!(redact_value("a@b.com"), REDACTED_VALUE);
}

#[test]
fn directives_cover_importer_crates() {
    let directives = LogConfig::default()
        .with_level(LevelFilter::DEBUG)
        .directives();
    assert!(directives.starts_with("warn,"));
    assert!(directives.contains("importer_core=debug"));
    assert!(directives.contains("importer_ingest=debug"));
}
