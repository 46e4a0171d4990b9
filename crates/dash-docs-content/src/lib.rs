// crates/dash-docs-content/src/lib.rs
// ============================================================================
// Module: Dash Docs Content Library
// Description: Typed content collections and site navigation for the docs.
// Purpose: Validate docs pages, YAML schema documents, and sidebar links.
// Dependencies: serde, serde_yaml
// ============================================================================

//! ## Overview
//! `dash-docs-content` loads the two content collections of the docs site
//! and the site configuration that wires them together:
//! - [`pages`]: markdown pages with YAML frontmatter, keyed by slug.
//! - [`schemas`]: YAML schema documents checked against a local shape.
//! - [`site`]: title, styling, social links, and the sidebar tree.
//!
//! Loaders visit every file before failing, so one run reports every
//! offending path.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod files;
pub mod pages;
pub mod schemas;
pub mod site;

// ============================================================================
// SECTION: Errors
// ============================================================================

use thiserror::Error;

/// Errors raised while loading or cross-checking content.
///
/// # Invariants
/// - List-carrying variants are never empty and each item names a path or slug.
#[derive(Debug, Error)]
pub enum ContentError {
    /// IO failure while walking or reading a collection.
    #[error("content io error: {0}")]
    Io(String),
    /// One or more entries failed validation.
    #[error("invalid content: {}", .0.join("; "))]
    Invalid(Vec<String>),
    /// Sidebar entries point at missing pages.
    #[error("broken links: {}", .0.join("; "))]
    BrokenLinks(Vec<String>),
}

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use pages::DocsCollection;
pub use pages::DocsPage;
pub use pages::PageFrontmatter;
pub use schemas::YamlSchemaCollection;
pub use schemas::YamlSchemaDocument;
pub use site::SidebarEntry;
pub use site::SiteConfig;
