// crates/dash-docs-schema/src/registry.rs
// ============================================================================
// Module: Schema Registry
// Description: Path-keyed registry of schema documents.
// Purpose: Resolve cross-document links, validate authoring, compose defaults.
// Dependencies: serde, serde_jcs, serde_json, serde_yaml, url
// ============================================================================

//! ## Overview
//! [`SchemaRegistry`] owns every schema document keyed by the URL path it is
//! served from. `$ref` values are resolved relative to the referencing
//! document's path with URL join semantics, and must land on another
//! registered document.
//!
//! [`SchemaRegistry::validate`] reports every authoring defect in one pass:
//! duplicate paths or identifiers, dangling references, and defaults whose
//! shape disagrees with the declared type. Rendering goes through canonical
//! JSON so repeated renders are byte-identical.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use url::Url;

use crate::RegistryError;
use crate::documents;
use crate::node::SCHEMA_DIALECT;
use crate::node::SchemaNode;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Path the root configuration schema is served from.
pub const ROOT_SCHEMA_PATH: &str = documents::ROOT_PATH;

/// Synthetic origin used to apply URL join rules to document paths.
const RESOLUTION_BASE: &str = "https://schema.invalid/";

/// Maximum number of `$ref` hops followed while composing defaults.
pub const MAX_REF_DEPTH: usize = 16;

// ============================================================================
// SECTION: Documents
// ============================================================================

/// A schema document paired with the URL path it is served from.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    /// Absolute URL path, for example `/schema/theme.json`.
    pub path: String,
    /// Document root node.
    pub node: SchemaNode,
}

impl SchemaDocument {
    /// Creates a document served at `path`.
    #[must_use]
    pub fn new(path: &str, node: SchemaNode) -> Self {
        Self {
            path: path.to_string(),
            node,
        }
    }
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Registry of schema documents keyed by served path.
///
/// # Invariants
/// - Documents keep their registration order; lookups are by exact path.
/// - A registry that passed [`SchemaRegistry::validate`] has unique paths and
///   identifiers, and every `$ref` resolves to a registered document.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    /// Registered documents in registration order.
    documents: Vec<SchemaDocument>,
}

impl SchemaRegistry {
    /// Returns the registry holding the built-in dashboard documents.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_documents(documents::builtin_documents())
    }

    /// Creates a registry from arbitrary documents without validating them.
    #[must_use]
    pub const fn from_documents(documents: Vec<SchemaDocument>) -> Self {
        Self {
            documents,
        }
    }

    /// Returns the registered documents in registration order.
    #[must_use]
    pub fn documents(&self) -> &[SchemaDocument] {
        &self.documents
    }

    /// Returns the document served at `path`, if registered.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&SchemaNode> {
        self.documents.iter().find(|document| document.path == path).map(|document| &document.node)
    }

    /// Returns the root configuration schema, if registered.
    #[must_use]
    pub fn root(&self) -> Option<&SchemaNode> {
        self.get(ROOT_SCHEMA_PATH)
    }

    /// Resolves `reference` relative to the document served at `from_path`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnresolvedReference`] when the reference is
    /// fragment-only, leaves the site origin, or names an unregistered path.
    pub fn resolve_reference(&self, from_path: &str, reference: &str) -> Result<String, RegistryError> {
        let unresolved = || RegistryError::UnresolvedReference {
            path: from_path.to_string(),
            reference: reference.to_string(),
        };
        if reference.starts_with('#') {
            return Err(unresolved());
        }
        let origin = Url::parse(RESOLUTION_BASE).map_err(|_| unresolved())?;
        let base = origin.join(from_path).map_err(|_| unresolved())?;
        let target = base.join(reference).map_err(|_| unresolved())?;
        if target.origin() != origin.origin() || target.query().is_some() || target.fragment().is_some()
        {
            return Err(unresolved());
        }
        let path = target.path().to_string();
        if self.get(&path).is_none() {
            return Err(unresolved());
        }
        Ok(path)
    }

    /// Checks the registry for authoring defects.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Invalid`] listing every defect found.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let mut issues = Vec::new();
        let mut paths = BTreeSet::new();
        let mut ids = BTreeSet::new();
        if self.root().is_none() {
            issues.push(format!("missing root document {ROOT_SCHEMA_PATH}"));
        }
        for document in &self.documents {
            let path = document.path.as_str();
            if !path.starts_with('/') || !path.ends_with(".json") {
                issues.push(format!("{path}: document path must be absolute and end in .json"));
            }
            if !paths.insert(path) {
                issues.push(format!("{path}: duplicate document path"));
            }
            match document.node.id.as_deref() {
                Some(id) if !ids.insert(id) => issues.push(format!("{path}: duplicate $id {id}")),
                Some(_) => {}
                None => issues.push(format!("{path}: document is missing $id")),
            }
            if document.node.schema.as_deref() != Some(SCHEMA_DIALECT) {
                issues.push(format!("{path}: document must declare $schema {SCHEMA_DIALECT}"));
            }
            self.check_node(path, "", &document.node, &mut issues);
        }
        if issues.is_empty() { Ok(()) } else { Err(RegistryError::Invalid(issues)) }
    }

    /// Records defects for `node` and its descendants.
    fn check_node(&self, path: &str, pointer: &str, node: &SchemaNode, issues: &mut Vec<String>) {
        if let Some(reference) = &node.reference {
            match self.resolve_reference(path, reference) {
                Ok(target_path) => {
                    if let Some(default) = &node.default
                        && let Some(target) = self.get(&target_path)
                        && let Some(schema_type) = target.schema_type
                        && !schema_type.admits(default)
                    {
                        issues.push(format!(
                            "{path}#{pointer}: default does not match linked type {}",
                            schema_type.as_str()
                        ));
                    }
                }
                Err(err) => issues.push(format!("{path}#{pointer}: {err}")),
            }
        }
        if let Some(default) = &node.default {
            check_default(path, pointer, node, default, issues);
        }
        for (segment, child) in node.children() {
            self.check_node(path, &format!("{pointer}/{segment}"), child, issues);
        }
    }

    /// Composes the effective default configuration from the root document.
    ///
    /// A node contributes its own default; a link contributes the linked
    /// document's composed default; an object contributes its properties'
    /// composed defaults. When several apply, the node's own default wins
    /// and missing keys are filled in from the others.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the root is missing, a reference does
    /// not resolve, or links nest deeper than [`MAX_REF_DEPTH`].
    pub fn default_tree(&self) -> Result<Value, RegistryError> {
        let root = self.root().ok_or_else(|| {
            RegistryError::Invalid(vec![format!("missing root document {ROOT_SCHEMA_PATH}")])
        })?;
        let composed = self.compose_default(ROOT_SCHEMA_PATH, root, 0)?;
        Ok(composed.unwrap_or_else(|| Value::Object(Map::new())))
    }

    /// Composes the default for one node, following links.
    fn compose_default(
        &self,
        path: &str,
        node: &SchemaNode,
        depth: usize,
    ) -> Result<Option<Value>, RegistryError> {
        if depth > MAX_REF_DEPTH {
            return Err(RegistryError::Invalid(vec![format!(
                "{path}: reference depth exceeds {MAX_REF_DEPTH}"
            )]));
        }
        let mut composed = node.default.clone();
        if let Some(reference) = &node.reference {
            let target_path = self.resolve_reference(path, reference)?;
            if let Some(target) = self.get(&target_path) {
                let linked = self.compose_default(&target_path, target, depth + 1)?;
                composed = merge_optional(composed, linked);
            }
        }
        if let Some(properties) = &node.properties {
            let mut children = Map::new();
            for (name, child) in properties {
                if let Some(value) = self.compose_default(path, child, depth)? {
                    children.insert(name.clone(), value);
                }
            }
            if !children.is_empty() {
                composed = merge_optional(composed, Some(Value::Object(children)));
            }
        }
        Ok(composed)
    }
}

// ============================================================================
// SECTION: Default Checks
// ============================================================================

/// Records defects where a node's default disagrees with its declaration.
fn check_default(
    path: &str,
    pointer: &str,
    node: &SchemaNode,
    default: &Value,
    issues: &mut Vec<String>,
) {
    if let Some(schema_type) = node.schema_type
        && !schema_type.admits(default)
    {
        issues.push(format!(
            "{path}#{pointer}: default does not match type {}",
            schema_type.as_str()
        ));
    }
    if let Some(values) = &node.enum_values
        && !values.contains(default)
    {
        issues.push(format!("{path}#{pointer}: default is not an enumerated value"));
    }
    if let Some(minimum) = node.minimum
        && let Some(number) = default.as_i64()
        && number < minimum
    {
        issues.push(format!("{path}#{pointer}: default {number} is below minimum {minimum}"));
    }
    if let Value::Object(entries) = default {
        for (key, value) in entries {
            if let Some(child) = node.property(key)
                && let Some(schema_type) = child.schema_type
                && !schema_type.admits(value)
            {
                issues.push(format!(
                    "{path}#{pointer}: default.{key} does not match type {}",
                    schema_type.as_str()
                ));
            }
        }
    }
}

// ============================================================================
// SECTION: Default Merging
// ============================================================================

/// Merges two optional defaults, keeping `primary` values on conflict.
fn merge_optional(primary: Option<Value>, secondary: Option<Value>) -> Option<Value> {
    match (primary, secondary) {
        (Some(mut primary), Some(secondary)) => {
            merge_missing(&mut primary, secondary);
            Some(primary)
        }
        (primary, secondary) => primary.or(secondary),
    }
}

/// Inserts keys from `source` that `target` lacks, recursing into objects.
fn merge_missing(target: &mut Value, source: Value) {
    if let (Value::Object(target), Value::Object(source)) = (target, source) {
        for (key, value) in source {
            match target.get_mut(&key) {
                Some(existing) => merge_missing(existing, value),
                None => {
                    target.insert(key, value);
                }
            }
        }
    }
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Serializes a value into pretty JSON bytes with canonical key ordering.
///
/// # Errors
///
/// Returns [`RegistryError::Serialization`] when serialization fails.
pub fn render_json<T: Serialize>(value: &T) -> Result<Vec<u8>, RegistryError> {
    let canonical =
        serde_jcs::to_vec(value).map_err(|err| RegistryError::Serialization(err.to_string()))?;
    let canonical_value: Value = serde_json::from_slice(&canonical)
        .map_err(|err| RegistryError::Serialization(err.to_string()))?;
    let mut bytes = serde_json::to_vec_pretty(&canonical_value)
        .map_err(|err| RegistryError::Serialization(err.to_string()))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Serializes a value into YAML with canonical key ordering.
///
/// # Errors
///
/// Returns [`RegistryError::Serialization`] when serialization fails.
pub fn render_yaml<T: Serialize>(value: &T) -> Result<String, RegistryError> {
    let canonical =
        serde_jcs::to_vec(value).map_err(|err| RegistryError::Serialization(err.to_string()))?;
    let canonical_value: Value = serde_json::from_slice(&canonical)
        .map_err(|err| RegistryError::Serialization(err.to_string()))?;
    serde_yaml::to_string(&canonical_value).map_err(|err| RegistryError::Serialization(err.to_string()))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
