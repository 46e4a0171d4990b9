// crates/dash-docs-schema/tests/schema_validation.rs
// ============================================================================
// Module: Schema Validation Tests
// Description: Validates sample configuration values against rendered documents.
// Purpose: Ensure served documents behave as JSON Schema 2020-12 validators.
// Dependencies: dash-docs-schema, jsonschema, serde_json
// ============================================================================

//! ## Overview
//! Compiles self-contained documents with a JSON Schema validator and checks
//! representative accepted and rejected configuration values.

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

// ============================================================================
// SECTION: Imports
// ============================================================================

use dash_docs_schema::SchemaRegistry;
use dash_docs_schema::registry::render_json;
use jsonschema::Draft;
use jsonschema::Validator;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Compiles the served bytes of the document at `path`.
fn compile_document(path: &str) -> Validator {
    let registry = SchemaRegistry::builtin();
    let node = registry.get(path).expect("registered document");
    let bytes = render_json(node).expect("render");
    let mut schema: Value = serde_json::from_slice(&bytes).expect("parse");
    if let Some(object) = schema.as_object_mut() {
        object.remove("$id");
    }
    jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .expect("schema compilation failed")
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn theme_accepts_short_and_long_hex_colors() {
    let theme = compile_document("/schema/theme.json");
    assert!(theme.is_valid(&json!({ "colors": { "text": { "primary": "#aa33cc" } } })));
    assert!(theme.is_valid(&json!({ "colors": { "text": { "primary": "#abc" } } })));
}

#[test]
fn theme_rejects_invalid_hex_colors() {
    let theme = compile_document("/schema/theme.json");
    assert!(!theme.is_valid(&json!({ "colors": { "text": { "primary": "#gg33cc" } } })));
    assert!(!theme.is_valid(&json!({ "colors": { "border": { "faint": "808080" } } })));
    assert!(!theme.is_valid(&json!({ "colors": { "icon": { "owner": "#12345" } } })));
}

#[test]
fn theme_default_validates_against_theme() {
    let registry = SchemaRegistry::builtin();
    let default = registry
        .get("/schema/theme.json")
        .and_then(|node| node.default.clone())
        .expect("theme default");
    assert!(compile_document("/schema/theme.json").is_valid(&default));
}

#[test]
fn color_definition_accepts_hex_and_ansi_indices() {
    let color = compile_document("/schema/definitions/hexcolor.json");
    for accepted in ["#aa33cc", "#abc", "0", "99", "255"] {
        assert!(color.is_valid(&json!(accepted)), "{accepted}");
    }
    for rejected in ["#gg33cc", "256", "abc"] {
        assert!(!color.is_valid(&json!(rejected)), "{rejected}");
    }
}

#[test]
fn keybinding_entry_requires_key() {
    let entry = compile_document("/schema/keybindings/entry.json");
    assert!(entry.is_valid(&json!({ "key": "c", "command": "gh pr checkout {{.PrNumber}}" })));
    assert!(!entry.is_valid(&json!({ "command": "echo" })));
    assert!(!entry.is_valid(&json!({ "key": 1 })));
}

#[test]
fn layout_options_bound_width() {
    let options = compile_document("/schema/layout/options.json");
    assert!(options.is_valid(&json!({ "width": 0, "hidden": true, "grow": false })));
    assert!(!options.is_valid(&json!({ "width": -1 })));
    assert!(!options.is_valid(&json!({ "hidden": "yes" })));
}
