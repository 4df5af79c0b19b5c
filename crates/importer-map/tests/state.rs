use importer_map::{MappingError, MappingTable, verify_required};
use importer_model::{ColumnMapping, Template, UploadColumn, validate_template};
use serde_json::json;

fn template() -> Template {
    validate_template(&json!({
        "columns": [
            { "name": "Email", "required": true },
            { "name": "Name" },
            { "name": "Phone" }
        ]
    }))
    .unwrap()
}

fn table(headers: &[&str]) -> MappingTable {
    let columns = headers
        .iter()
        .enumerate()
        .map(|(index, name)| UploadColumn::new(index, *name))
        .collect();
    MappingTable::new(template(), columns)
}

#[test]
fn reassigning_a_claimed_key_clears_the_previous_holder() {
    let mut table = table(&["Email", "Work Address"]);
    assert_eq!(table.column_for_key("email"), Some(0));

    let displaced = table.set_mapping(1, "email").unwrap();
    assert_eq!(displaced, Some(0));
    assert_eq!(table.mapping(1), Some(&ColumnMapping::mapped("email")));
    assert_eq!(table.mapping(0), Some(&ColumnMapping::unmapped()));
    assert_eq!(table.column_for_key("email"), Some(1));
}

#[test]
fn reassigning_own_key_displaces_nobody() {
    let mut table = table(&["Email"]);
    assert_eq!(table.set_mapping(0, "email").unwrap(), None);
    assert!(table.mapping(0).unwrap().include);
}

#[test]
fn empty_key_clears_mapping() {
    let mut table = table(&["Email"]);
    table.set_mapping(0, "").unwrap();
    let mapping = table.mapping(0).unwrap();
    assert!(!mapping.is_mapped());
    assert!(!mapping.include);
}

#[test]
fn rejects_unknown_columns_and_keys() {
    let mut table = table(&["Email"]);
    assert_eq!(
        table.set_mapping(5, "email"),
        Err(MappingError::UnknownUploadColumn(5))
    );
    assert_eq!(
        table.set_mapping(0, "fax"),
        Err(MappingError::UnknownTemplateColumn("fax".to_string()))
    );
}

#[test]
fn options_hide_keys_claimed_elsewhere_but_keep_own_choice() {
    let table = table(&["Email", "Name", "Misc"]);
    let keys = |column| -> Vec<String> {
        table
            .options_for(column)
            .unwrap()
            .iter()
            .map(|c| c.key.clone())
            .collect()
    };
    assert_eq!(keys(0), vec!["email", "phone"]);
    assert_eq!(keys(1), vec!["name", "phone"]);
    assert_eq!(keys(2), vec!["phone"]);
}

#[test]
fn inclusion_requires_a_mapping() {
    let mut table = table(&["Email", "Misc"]);
    assert_eq!(table.set_inclusion(1, true), Ok(false));
    assert!(!table.mapping(1).unwrap().include);

    assert_eq!(table.set_inclusion(0, false), Ok(true));
    assert!(!table.mapping(0).unwrap().include);
    assert_eq!(table.summary().mapped, 1);
    assert_eq!(table.summary().included, 0);
}

#[test]
fn required_check_flips_when_mapping_added() {
    let mut table = table(&["Misc"]);
    assert!(!table.is_complete());
    assert_eq!(table.missing_required()[0].key, "email");

    table.set_mapping(0, "email").unwrap();
    assert!(table.is_complete());
    assert!(table.missing_required().is_empty());

    table.set_inclusion(0, false).unwrap();
    assert!(!verify_required(table.template(), table.mappings()));
}
