// crates/dash-docs-content/src/schemas/tests.rs
// ============================================================================
// Module: YAML Schema Collection Unit Tests
// Description: Unit tests for the schema document shape.
// Purpose: Pin accepted and rejected document shapes.
// Dependencies: dash-docs-content
// ============================================================================

//! ## Overview
//! Parses in-memory YAML documents against the collection shape.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::missing_docs_in_private_items,
    clippy::use_debug,
    reason = "Test-only validation helpers use panic-based assertions for clarity."
)]

use super::PropertyDefault;
use super::PropertyEntry;
use super::entry_id;
use super::parse_document;

const HEADER: &str = "$schema: https://json-schema.org/draft/2020-12/schema\n$id: test.schema.json\ntitle: Test\ntype: object\n";

#[test]
fn minimal_document_is_accepted() {
    let document = parse_document(HEADER).expect("document");
    assert_eq!(document.id, "test.schema.json");
    assert!(document.properties.is_none());
}

#[test]
fn unknown_keys_are_ignored() {
    let text = format!("{HEADER}additionalProperties: false\nrequired: [key]\n");
    assert!(parse_document(&text).is_ok());
}

#[test]
fn missing_required_field_is_rejected() {
    let err = parse_document("$id: a.json\ntitle: A\ntype: object\n").unwrap_err();
    assert!(err.contains("$schema"));
}

#[test]
fn document_schematize_requires_details() {
    let text = format!("{HEADER}schematize:\n  weight: 1\n");
    assert!(parse_document(&text).unwrap_err().contains("details"));
    let text = format!("{HEADER}schematize:\n  weight: 1\n  details: Long form.\n");
    assert!(parse_document(&text).is_ok());
}

#[test]
fn properties_accept_titled_and_link_entries() {
    let text = format!(
        "{HEADER}properties:\n  theme:\n    $ref: ./schema/theme.json\n    schematize:\n      weight: 6\n  prSections:\n    title: PR Sections\n    type: array\n    default:\n      - title: Mine\n        filters: is:open author:@me\n  confirmQuit:\n    title: Confirm Quit\n    type: boolean\n    default: false\n  author:\n    title: Author\n    type: object\n    properties: null\n"
    );
    let document = parse_document(&text).expect("document");
    let properties = document.properties.expect("properties");
    assert!(matches!(properties.get("theme"), Some(PropertyEntry::Link(_))));
    let Some(PropertyEntry::Titled(sections)) = properties.get("prSections") else {
        panic!("prSections should be titled");
    };
    assert!(matches!(sections.default, Some(PropertyDefault::Sections(ref list)) if list.len() == 1));
    let Some(PropertyEntry::Titled(quit)) = properties.get("confirmQuit") else {
        panic!("confirmQuit should be titled");
    };
    assert_eq!(quit.default, Some(PropertyDefault::Boolean(false)));
}

#[test]
fn property_without_title_or_ref_is_rejected() {
    let text = format!("{HEADER}properties:\n  pager:\n    type: object\n");
    assert!(parse_document(&text).is_err());
}

#[test]
fn array_default_must_hold_sections() {
    let text = format!(
        "{HEADER}properties:\n  repoPaths:\n    title: Repo Paths\n    type: array\n    default: [1, 2]\n"
    );
    assert!(parse_document(&text).is_err());
}

#[test]
fn nested_properties_are_free_form() {
    let text = format!(
        "{HEADER}properties:\n  ui:\n    title: UI\n    type: object\n    properties:\n      table:\n        type: object\n      compact: true\n"
    );
    let document = parse_document(&text).expect("nested properties accepted");
    let properties = document.properties.expect("properties");
    let Some(PropertyEntry::Titled(ui)) = properties.get("ui") else {
        panic!("ui should be a titled property");
    };
    let nested = ui.properties.as_ref().expect("nested properties");
    assert_eq!(nested.len(), 2);
    assert!(nested.contains_key("table"));
}

#[test]
fn blank_top_level_title_is_rejected() {
    let text = format!("{HEADER}properties:\n  ui:\n    title: \"\"\n    type: object\n");
    let err = parse_document(&text).unwrap_err();
    assert!(err.contains("properties/ui"));
}

#[test]
fn entry_id_drops_extension() {
    assert_eq!(entry_id("schema/layout/options.yaml"), "schema/layout/options");
    assert_eq!(entry_id("schema.yml"), "schema");
}
