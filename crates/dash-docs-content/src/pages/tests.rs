// crates/dash-docs-content/src/pages/tests.rs
// ============================================================================
// Module: Docs Pages Unit Tests
// Description: Unit tests for frontmatter parsing and slug derivation.
// Purpose: Pin slug rules and frontmatter edge cases.
// Dependencies: dash-docs-content
// ============================================================================

//! ## Overview
//! Parses in-memory pages without touching the filesystem.

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

use std::path::Path;

use super::PageTemplate;
use super::parse_page;
use super::slug_for;

#[test]
fn slug_strips_extension_and_collapses_index() {
    assert_eq!(slug_for(Path::new("getting-started/index.mdx")), "getting-started");
    assert_eq!(slug_for(Path::new("configuration/layout/pr.md")), "configuration/layout/pr");
    assert_eq!(slug_for(Path::new("index.mdx")), "");
    assert_eq!(slug_for(Path::new("Donating.md")), "donating");
}

#[test]
fn parses_frontmatter_and_body() {
    let text = "---\ntitle: Theme\ndescription: Colors\nsidebar:\n  order: 3\ntemplate: splash\n---\n# Theme\n";
    let page = parse_page("configuration/theme.mdx", text).expect("page");
    assert_eq!(page.slug, "configuration/theme");
    assert_eq!(page.frontmatter.title, "Theme");
    assert_eq!(page.frontmatter.description.as_deref(), Some("Colors"));
    assert_eq!(page.order(), Some(3));
    assert_eq!(page.frontmatter.template, Some(PageTemplate::Splash));
    assert_eq!(page.body, "# Theme\n");
}

#[test]
fn crlf_frontmatter_is_accepted() {
    let page = parse_page("usage.md", "---\r\ntitle: Usage\r\n---\r\nbody").expect("page");
    assert_eq!(page.frontmatter.title, "Usage");
}

#[test]
fn missing_fence_is_rejected() {
    let err = parse_page("usage.md", "# Usage\n").unwrap_err();
    assert_eq!(err, "missing frontmatter block");
    let err = parse_page("usage.md", "---\ntitle: Usage\n").unwrap_err();
    assert_eq!(err, "missing frontmatter block");
}

#[test]
fn empty_or_blank_title_is_rejected() {
    assert!(parse_page("a.md", "---\n---\n").unwrap_err().contains("title"));
    assert!(parse_page("a.md", "---\ndescription: x\n---\n").unwrap_err().contains("title"));
    assert!(parse_page("a.md", "---\ntitle: \"  \"\n---\n").unwrap_err().contains("title"));
}

#[test]
fn unknown_template_is_rejected() {
    assert!(parse_page("a.md", "---\ntitle: A\ntemplate: wide\n---\n").is_err());
}
