// crates/dash-docs-schema/src/lib.rs
// ============================================================================
// Module: Dash Docs Schema Library
// Description: Typed JSON Schema registry for the dashboard configuration.
// Purpose: Single source of truth for the schema documents served by the site.
// Dependencies: serde, serde_jcs, serde_json, serde_yaml, sha2, thiserror, url
// ============================================================================

//! ## Overview
//! `dash-docs-schema` defines every JSON Schema document that describes the
//! dashboard's configuration file, registered under the URL path it is
//! served from. The registry validates cross-document `$ref` links, `$id`
//! uniqueness, and default-value shapes, and renders documents with
//! canonical key ordering so served and exported bytes are identical.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod bundle;
pub mod documents;
pub mod node;
pub mod registry;

// ============================================================================
// SECTION: Errors
// ============================================================================

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised when validating or rendering the schema registry.
///
/// # Invariants
/// - [`RegistryError::Invalid`] carries every detected issue, never an empty list.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// One or more authoring defects were found in the registry.
    #[error("schema registry invalid: {}", .0.join("; "))]
    Invalid(Vec<String>),
    /// A `$ref` could not be resolved from the referencing document.
    #[error("unresolved $ref {reference} in {path}")]
    UnresolvedReference {
        /// Path of the referencing document.
        path: String,
        /// Raw reference string.
        reference: String,
    },
    /// Serialization failure while rendering a document.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Errors raised when writing or verifying the schema bundle on disk.
#[derive(Debug, Error)]
pub enum BundleError {
    /// Registry validation or rendering failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// IO failure while reading or writing artifacts.
    #[error("io error: {0}")]
    Io(String),
    /// On-disk bundle does not match the generated bundle.
    #[error("bundle mismatch: {0}")]
    Mismatch(String),
    /// Output path invalid or inaccessible.
    #[error("invalid output path: {}", .0.display())]
    OutputPath(PathBuf),
}

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use bundle::BundleArtifact;
pub use bundle::BundleFormat;
pub use bundle::BundleManifest;
pub use bundle::SchemaBundle;
pub use bundle::SchemaBundleBuilder;
pub use node::SchemaNode;
pub use node::SchemaType;
pub use node::Schematize;
pub use registry::ROOT_SCHEMA_PATH;
pub use registry::SchemaDocument;
pub use registry::SchemaRegistry;
