// crates/dash-docs-content/src/schemas.rs
// ============================================================================
// Module: YAML Schema Collection
// Description: Typed loader for the YAML schema documents collection.
// Purpose: Reject malformed schema documents before the site is built.
// Dependencies: serde, serde_yaml
// ============================================================================

//! ## Overview
//! Every `.yaml` or `.yml` file under the collection root is one schema
//! document. Documents are deserialized into [`YamlSchemaDocument`], a local
//! shape narrower than full JSON Schema: keys the shape does not name are
//! ignored, while named keys must have the declared type. Each property is
//! either a titled property or a `$ref` link.
//!
//! Security posture: collection files are author-controlled build inputs;
//! every failure is reported with its path and the build stops.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use serde_yaml::Value;

use crate::ContentError;
use crate::files::collect_files;
use crate::files::relative_display;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// File extensions recognized as schema documents.
pub const SCHEMA_EXTENSIONS: &[&str] = &["yaml", "yml"];

// ============================================================================
// SECTION: Document Shape
// ============================================================================

/// Rendering hints on a document root; `details` is required here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSchematize {
    /// Sort weight among sibling documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Preferred example format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Long-form markdown details.
    pub details: String,
    /// Rendering hints for the document default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DocumentDefaultHints>,
}

/// Default-value hints on a document root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDefaultHints {
    /// Markdown describing the default.
    pub details: String,
    /// Preferred format for the default example.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Rendering hints on a property; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertySchematize {
    /// Sort weight among sibling properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Long-form markdown details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Preferred example format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Rendering hints for the property default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<PropertyDefaultHints>,
}

/// Default-value hints on a property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDefaultHints {
    /// Markdown describing the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Preferred format for the default example.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Suppress the generated schema table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_schema_render: Option<bool>,
}

/// Section default entry (`{ title, filters }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionDefault {
    /// Section title.
    pub title: String,
    /// Search filters.
    pub filters: String,
}

/// Accepted shapes of a property default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyDefault {
    /// Boolean flag.
    Boolean(bool),
    /// Numeric value.
    Number(f64),
    /// String value.
    Text(String),
    /// List of section defaults.
    Sections(Vec<SectionDefault>),
    /// Nested mapping.
    Map(BTreeMap<String, Value>),
}

/// A property with its own title and type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitledProperty {
    /// Human title.
    pub title: String,
    /// Declared value type.
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Human description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Rendering hints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schematize: Option<PropertySchematize>,
    /// Default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<PropertyDefault>,
    /// Nested properties, kept free-form; an explicit `null` is accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Value>>,
}

/// A link to another schema document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkProperty {
    /// Relative reference to the linked document.
    #[serde(rename = "$ref")]
    pub reference: String,
}

/// One property entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyEntry {
    /// Link entries are tried first so `$ref` with annotations stays a link.
    Link(LinkProperty),
    /// Titled property.
    Titled(Box<TitledProperty>),
}

/// One YAML schema document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YamlSchemaDocument {
    /// Dialect URI.
    #[serde(rename = "$schema")]
    pub schema: String,
    /// Document identifier.
    #[serde(rename = "$id")]
    pub id: String,
    /// Human title.
    pub title: String,
    /// Declared value type.
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Human description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Inclusive numeric lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    /// Rendering hints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schematize: Option<DocumentSchematize>,
    /// Named properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, PropertyEntry>>,
}

// ============================================================================
// SECTION: Collection
// ============================================================================

/// One loaded schema document with its collection identity.
#[derive(Debug, Clone, PartialEq)]
pub struct YamlSchemaEntry {
    /// Entry identifier: relative path without extension.
    pub entry_id: String,
    /// Path relative to the collection root.
    pub path: String,
    /// Parsed document.
    pub document: YamlSchemaDocument,
}

/// Loaded YAML schema documents ordered by path.
///
/// # Invariants
/// - Document `$id` values are unique across the collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YamlSchemaCollection {
    /// Entries ordered by relative path.
    entries: Vec<YamlSchemaEntry>,
}

impl YamlSchemaCollection {
    /// Loads every schema document under `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Io`] when the root cannot be walked and
    /// [`ContentError::Invalid`] listing every document that failed.
    pub fn load(root: &Path) -> Result<Self, ContentError> {
        let files = collect_files(root, SCHEMA_EXTENSIONS)?;
        let mut entries: Vec<YamlSchemaEntry> = Vec::new();
        let mut issues = Vec::new();
        for file in files {
            let path = relative_display(root, &file);
            let parsed = fs::read_to_string(&file)
                .map_err(|err| err.to_string())
                .and_then(|text| parse_document(&text));
            match parsed {
                Ok(document) => {
                    if let Some(existing) =
                        entries.iter().find(|entry| entry.document.id == document.id)
                    {
                        issues.push(format!(
                            "{path}: duplicate $id `{}` (first defined in {})",
                            document.id, existing.path
                        ));
                        continue;
                    }
                    entries.push(YamlSchemaEntry {
                        entry_id: entry_id(&path),
                        path,
                        document,
                    });
                }
                Err(message) => issues.push(format!("{path}: {message}")),
            }
        }
        if issues.is_empty() { Ok(Self { entries }) } else { Err(ContentError::Invalid(issues)) }
    }

    /// Returns the entries in path order.
    #[must_use]
    pub fn entries(&self) -> &[YamlSchemaEntry] {
        &self.entries
    }

    /// Returns the entry with the given identifier.
    #[must_use]
    pub fn get(&self, entry_id: &str) -> Option<&YamlSchemaEntry> {
        self.entries.iter().find(|entry| entry.entry_id == entry_id)
    }

    /// Returns the number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the collection holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Parses and checks one document.
pub(crate) fn parse_document(text: &str) -> Result<YamlSchemaDocument, String> {
    let document: YamlSchemaDocument = serde_yaml::from_str(text).map_err(|err| err.to_string())?;
    for (field, value) in [
        ("$schema", &document.schema),
        ("$id", &document.id),
        ("title", &document.title),
        ("type", &document.schema_type),
    ] {
        if value.trim().is_empty() {
            return Err(format!("{field} must be non-empty"));
        }
    }
    if let Some(properties) = &document.properties {
        check_properties("properties", properties)?;
    }
    Ok(document)
}

/// Rejects blank titles, types, and references among top-level properties.
fn check_properties(
    pointer: &str,
    properties: &BTreeMap<String, PropertyEntry>,
) -> Result<(), String> {
    for (name, entry) in properties {
        let location = format!("{pointer}/{name}");
        match entry {
            PropertyEntry::Link(link) => {
                if link.reference.trim().is_empty() {
                    return Err(format!("{location}: $ref must be non-empty"));
                }
            }
            PropertyEntry::Titled(property) => {
                if property.title.trim().is_empty() || property.schema_type.trim().is_empty() {
                    return Err(format!("{location}: title and type must be non-empty"));
                }
            }
        }
    }
    Ok(())
}

/// Strips the extension from a relative path.
fn entry_id(path: &str) -> String {
    path.rsplit_once('.').map_or(path, |(stem, _)| stem).to_string()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
