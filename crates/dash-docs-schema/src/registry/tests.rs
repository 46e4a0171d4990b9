// crates/dash-docs-schema/src/registry/tests.rs
// ============================================================================
// Module: Schema Registry Unit Tests
// Description: Unit tests for reference resolution, validation, and defaults.
// Purpose: Validate registry behavior against built-in and synthetic documents.
// Dependencies: dash-docs-schema, serde_json
// ============================================================================

//! ## Overview
//! Exercises `$ref` resolution, authoring validation, and default composition.

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

use serde_json::Value;
use serde_json::json;

use super::ROOT_SCHEMA_PATH;
use super::SchemaDocument;
use super::SchemaRegistry;
use super::render_json;
use super::render_yaml;
use crate::RegistryError;
use crate::node::SchemaNode;
use crate::node::SchemaType;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn issues_of(registry: &SchemaRegistry) -> Vec<String> {
    match registry.validate() {
        Err(RegistryError::Invalid(issues)) => issues,
        other => panic!("expected invalid registry, got {other:?}"),
    }
}

fn root_with(property: &str, node: SchemaNode) -> SchemaDocument {
    SchemaDocument::new(
        ROOT_SCHEMA_PATH,
        SchemaNode::document("gh-dash.schema.json", "Root")
            .with_type(SchemaType::Object)
            .with_property(property, node),
    )
}

// ============================================================================
// SECTION: Built-in Registry
// ============================================================================

#[test]
fn builtin_registry_is_valid() {
    SchemaRegistry::builtin().validate().expect("builtin registry");
}

#[test]
fn builtin_registry_serves_thirteen_documents() {
    let registry = SchemaRegistry::builtin();
    assert_eq!(registry.documents().len(), 13);
    for path in [
        "/schema.json",
        "/schema/pr-section.json",
        "/schema/issue-section.json",
        "/schema/defaults.json",
        "/schema/layout/pr.json",
        "/schema/layout/issue.json",
        "/schema/layout/options.json",
        "/schema/keybindings/prs.json",
        "/schema/keybindings/issues.json",
        "/schema/keybindings/entry.json",
        "/schema/theme.json",
        "/schema/definitions/hexcolor.json",
        "/schema/definitions/grow.json",
    ] {
        assert!(registry.get(path).is_some(), "missing {path}");
    }
}

#[test]
fn root_declares_expected_properties() {
    let registry = SchemaRegistry::builtin();
    let root = registry.root().expect("root");
    assert_eq!(root.id.as_deref(), Some("gh-dash.schema.json"));
    for name in [
        "prSections",
        "issuesSections",
        "defaults",
        "repoPaths",
        "keybindings",
        "theme",
        "pager",
        "showAuthorIcons",
        "smartFilteringAtLaunch",
        "confirmQuit",
    ] {
        assert!(root.property(name).is_some(), "missing root property {name}");
    }
}

// ============================================================================
// SECTION: Reference Resolution
// ============================================================================

#[test]
fn references_resolve_relative_to_referencing_document() {
    let registry = SchemaRegistry::builtin();
    assert_eq!(
        registry.resolve_reference("/schema.json", "./schema/pr-section.json").unwrap(),
        "/schema/pr-section.json"
    );
    assert_eq!(
        registry.resolve_reference("/schema/pr-section.json", "./layout/pr.json").unwrap(),
        "/schema/layout/pr.json"
    );
    assert_eq!(
        registry.resolve_reference("/schema/layout/pr.json", "./options.json").unwrap(),
        "/schema/layout/options.json"
    );
    assert_eq!(
        registry.resolve_reference("/schema/layout/pr.json", "../defaults.json").unwrap(),
        "/schema/defaults.json"
    );
}

#[test]
fn references_outside_the_registry_are_rejected() {
    let registry = SchemaRegistry::builtin();
    for reference in ["./missing.json", "#/definitions/x", "https://example.com/schema.json"] {
        let err = registry.resolve_reference("/schema.json", reference).unwrap_err();
        assert!(matches!(err, RegistryError::UnresolvedReference { .. }), "{reference}");
    }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

#[test]
fn dangling_reference_is_reported() {
    let registry = SchemaRegistry::from_documents(vec![root_with(
        "layout",
        SchemaNode::reference("./schema/layout/missing.json"),
    )]);
    let issues = issues_of(&registry);
    assert!(issues.iter().any(|issue| issue.contains("layout/missing.json")), "{issues:?}");
}

#[test]
fn duplicate_ids_and_paths_are_reported() {
    let grow = SchemaNode::document("grow.schema.json", "Grow").with_type(SchemaType::Boolean);
    let registry = SchemaRegistry::from_documents(vec![
        root_with("flag", SchemaNode::typed(SchemaType::Boolean, "Flag")),
        SchemaDocument::new("/schema/a.json", grow.clone()),
        SchemaDocument::new("/schema/a.json", grow),
    ]);
    let issues = issues_of(&registry);
    assert!(issues.iter().any(|issue| issue.contains("duplicate document path")));
    assert!(issues.iter().any(|issue| issue.contains("duplicate $id grow.schema.json")));
}

#[test]
fn default_with_wrong_shape_is_reported() {
    let registry = SchemaRegistry::from_documents(vec![root_with(
        "confirmQuit",
        SchemaNode::typed(SchemaType::Boolean, "Confirm Quit").with_default(json!("")),
    )]);
    let issues = issues_of(&registry);
    assert_eq!(issues.len(), 1, "{issues:?}");
    assert!(issues[0].contains("confirmQuit"));
    assert!(issues[0].contains("boolean"));
}

#[test]
fn default_outside_enum_is_reported() {
    let registry = SchemaRegistry::from_documents(vec![root_with(
        "view",
        SchemaNode::typed(SchemaType::String, "View")
            .with_enum(&["issues", "prs"])
            .with_default(json!("branches")),
    )]);
    let issues = issues_of(&registry);
    assert!(issues[0].contains("not an enumerated value"));
}

#[test]
fn missing_root_is_reported() {
    let registry = SchemaRegistry::from_documents(vec![SchemaDocument::new(
        "/schema/grow.json",
        SchemaNode::document("grow.schema.json", "Grow").with_type(SchemaType::Boolean),
    )]);
    let issues = issues_of(&registry);
    assert!(issues.iter().any(|issue| issue.contains("missing root document")));
}

#[test]
fn every_builtin_default_matches_its_declared_type() {
    fn walk(node: &SchemaNode, path: &str) {
        if let (Some(default), Some(schema_type)) = (&node.default, node.schema_type) {
            assert!(schema_type.admits(default), "{path}: {default}");
        }
        for (segment, child) in node.children() {
            walk(child, &format!("{path}/{segment}"));
        }
    }
    for document in SchemaRegistry::builtin().documents() {
        walk(&document.node, &document.path);
    }
}

// ============================================================================
// SECTION: Default Composition
// ============================================================================

#[test]
fn default_tree_follows_links_into_linked_documents() {
    let tree = SchemaRegistry::builtin().default_tree().expect("default tree");
    assert_eq!(tree["defaults"]["prsLimit"], json!(20));
    assert_eq!(tree["defaults"]["view"], json!("prs"));
    assert_eq!(tree["defaults"]["preview"]["width"], json!(0.45));
    assert_eq!(tree["defaults"]["layout"]["prs"]["lines"]["width"], json!(16));
    assert_eq!(tree["defaults"]["layout"]["issues"]["creator"]["width"], json!(10));
    assert_eq!(tree["theme"]["colors"]["text"]["primary"], json!("#ffffff"));
    assert_eq!(tree["pager"]["diff"], json!("less"));
    assert_eq!(tree["confirmQuit"], json!(false));
    assert_eq!(
        tree["prSections"],
        json!([
            { "title": "My Pull Requests", "filters": "is:open author:@me" },
            { "title": "Needs My Review", "filters": "is:open review-requested:@me" },
            { "title": "Involved", "filters": "is:open involves:@me -author:@me" }
        ])
    );
    assert_eq!(
        tree["issuesSections"],
        json!([
            { "title": "My Issues", "filters": "is:open author:@me" },
            { "title": "Assigned", "filters": "is:open assignee:@me" },
            { "title": "Involved", "filters": "is:open involves:@me -author:@me" }
        ])
    );
}

#[test]
fn default_tree_keeps_own_default_over_child_defaults() {
    let registry = SchemaRegistry::from_documents(vec![root_with(
        "preview",
        SchemaNode::typed(SchemaType::Object, "Preview")
            .with_default(json!({ "width": 0.6 }))
            .with_property(
                "width",
                SchemaNode::typed(SchemaType::Number, "Width").with_default(json!(0.45)),
            )
            .with_property(
                "open",
                SchemaNode::typed(SchemaType::Boolean, "Open").with_default(json!(true)),
            ),
    )]);
    let tree = registry.default_tree().expect("default tree");
    assert_eq!(tree, json!({ "preview": { "width": 0.6, "open": true } }));
}

#[test]
fn default_tree_rejects_reference_cycles() {
    let registry = SchemaRegistry::from_documents(vec![
        root_with("loop", SchemaNode::reference("./schema/a.json")),
        SchemaDocument::new(
            "/schema/a.json",
            SchemaNode::document("a.schema.json", "A")
                .with_type(SchemaType::Object)
                .with_property("next", SchemaNode::reference("./b.json")),
        ),
        SchemaDocument::new(
            "/schema/b.json",
            SchemaNode::document("b.schema.json", "B")
                .with_type(SchemaType::Object)
                .with_property("next", SchemaNode::reference("./a.json")),
        ),
    ]);
    let err = registry.default_tree().unwrap_err();
    assert!(err.to_string().contains("reference depth"));
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

#[test]
fn render_json_is_deterministic_and_newline_terminated() {
    let registry = SchemaRegistry::builtin();
    let root = registry.root().expect("root");
    let first = render_json(root).expect("render");
    let second = render_json(root).expect("render");
    assert_eq!(first, second);
    assert_eq!(first.last(), Some(&b'\n'));
    let parsed: Value = serde_json::from_slice(&first).expect("parse");
    assert_eq!(parsed["$id"], json!("gh-dash.schema.json"));
    assert_eq!(parsed["properties"]["defaults"]["$ref"], json!("./schema/defaults.json"));
}

#[test]
fn render_yaml_round_trips_to_same_node() {
    let registry = SchemaRegistry::builtin();
    let theme = registry.get("/schema/theme.json").expect("theme");
    let yaml = render_yaml(theme).expect("yaml");
    let parsed: SchemaNode = serde_yaml::from_str(&yaml).expect("parse yaml");
    assert_eq!(&parsed, theme);
}
