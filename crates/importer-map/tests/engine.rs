use std::collections::BTreeSet;

use importer_map::{MatchSource, SuggestionEngine, suggest_mappings};
use importer_model::{Template, UploadColumn, validate_template};
use proptest::prelude::*;
use serde_json::json;

fn contact_template() -> Template {
    validate_template(&json!({
        "columns": [
            { "name": "First Name", "required": true },
            { "name": "Last Name" },
            { "name": "Email", "required": true, "suggested_mappings": ["e-mail address"] },
            { "name": "Phone" }
        ]
    }))
    .unwrap()
}

fn columns(names: &[&str]) -> Vec<UploadColumn> {
    names
        .iter()
        .enumerate()
        .map(|(index, name)| UploadColumn::new(index, *name))
        .collect()
}

#[test]
fn suggests_by_similarity_and_hint() {
    let template = contact_template();
    let mappings = suggest_mappings(
        &columns(&["first name", "E-Mail Address", "Notes", "PHONE"]),
        &template,
    );

    assert_eq!(mappings[&0].key, "first_name");
    assert!(mappings[&0].include);
    assert_eq!(mappings[&1].key, "email");
    assert_eq!(mappings[&2].key, "");
    assert!(!mappings[&2].include);
    assert_eq!(mappings[&3].key, "phone");
}

#[test]
fn claimed_column_is_not_offered_again() {
    let template = contact_template();
    let suggestions = SuggestionEngine::new(&template).suggest(&columns(&["Email", "email"]));
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].upload_column, 0);
}

#[test]
fn hint_claims_column_before_later_similar_header() {
    let template = contact_template();
    let suggestions =
        SuggestionEngine::new(&template).suggest(&columns(&["e-mail address", "Email"]));
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].key, "email");
    assert_eq!(suggestions[0].source, MatchSource::Hint);
}

#[test]
fn hint_does_not_reclaim_column_taken_by_similarity() {
    let template = contact_template();
    let suggestions =
        SuggestionEngine::new(&template).suggest(&columns(&["Email", "e-mail address"]));
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].upload_column, 0);
    assert_eq!(suggestions[0].key, "email");
    assert!(matches!(suggestions[0].source, MatchSource::Similarity(_)));
}

#[test]
fn dissimilar_header_is_not_suggested() {
    let template = validate_template(&json!({
        "columns": [{ "name": "Email", "required": true }]
    }))
    .unwrap();
    let mappings = suggest_mappings(&columns(&["Phone"]), &template);
    assert_eq!(mappings[&0].key, "");
    assert!(!mappings[&0].include);
}

proptest! {
    #[test]
    fn suggestions_are_one_to_one_and_repeatable(
        headers in prop::collection::vec(
            prop_oneof![
                Just("Email".to_string()),
                Just("first name".to_string()),
                Just("Last  Name".to_string()),
                Just("e-mail address".to_string()),
                "[a-z ]{0,10}",
            ],
            0..8
        )
    ) {
        let template = contact_template();
        let names: Vec<&str> = headers.iter().map(String::as_str).collect();
        let upload = columns(&names);

        let first = suggest_mappings(&upload, &template);
        let keys: Vec<&str> = first
            .values()
            .filter(|m| m.is_mapped())
            .map(|m| m.key.as_str())
            .collect();
        let unique: BTreeSet<&str> = keys.iter().copied().collect();
        prop_assert_eq!(keys.len(), unique.len());
        prop_assert_eq!(first.len(), upload.len());

        let second = suggest_mappings(&upload, &template);
        prop_assert_eq!(first, second);
    }
}
