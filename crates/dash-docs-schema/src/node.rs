// crates/dash-docs-schema/src/node.rs
// ============================================================================
// Module: Schema Nodes
// Description: Strongly typed JSON Schema node records.
// Purpose: Represent configuration-property descriptors as typed trees.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`SchemaNode`] is one configuration-property descriptor: a title, a
//! description, a declared type, an optional default, constraints, and
//! nested child nodes. Documents are plain trees of nodes; cross-document
//! links are expressed with [`SchemaNode::reference`].
//! Unset fields are omitted when serialized so the wire shape matches a
//! hand-written JSON Schema fragment.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// JSON Schema dialect declared by every registered document.
pub const SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

// ============================================================================
// SECTION: Schema Types
// ============================================================================

/// Declared JSON Schema `type` keyword values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// JSON string.
    String,
    /// JSON object.
    Object,
    /// JSON array.
    Array,
    /// JSON boolean.
    Boolean,
    /// Whole JSON number.
    Integer,
    /// Any JSON number.
    Number,
}

impl SchemaType {
    /// Returns the keyword spelling of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Object => "object",
            Self::Array => "array",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
        }
    }

    /// Returns true when `value` has the shape this type declares.
    #[must_use]
    pub fn admits(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
            Self::Boolean => value.is_boolean(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
        }
    }
}

// ============================================================================
// SECTION: Rendering Hints
// ============================================================================

/// Docs-rendering hints consumed by the site's schema pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schematize {
    /// Sort weight among sibling properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    /// Long-form markdown details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Preferred example format (for example `yaml`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Suppress the generated schema table for this node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_schema_render: Option<bool>,
    /// Hints for rendering the node's default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<SchematizeDefault>,
}

/// Rendering hints for a node's default value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchematizeDefault {
    /// Markdown describing the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Preferred format for the default example.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Schematize {
    /// Creates hints carrying only a sort weight.
    #[must_use]
    pub fn weighted(weight: u32) -> Self {
        Self {
            weight: Some(weight),
            ..Self::default()
        }
    }

    /// Sets the long-form details.
    #[must_use]
    pub fn with_details(mut self, details: &str) -> Self {
        self.details = Some(details.to_string());
        self
    }

    /// Marks the node as rendered without a schema table.
    #[must_use]
    pub fn without_schema_render(mut self) -> Self {
        self.skip_schema_render = Some(true);
        self
    }

    /// Sets the details describing the node's default.
    #[must_use]
    pub fn with_default_details(mut self, details: &str, format: Option<&str>) -> Self {
        self.default = Some(SchematizeDefault {
            details: Some(details.to_string()),
            format: format.map(str::to_string),
        });
        self
    }
}

// ============================================================================
// SECTION: Schema Node
// ============================================================================

/// One node of a JSON Schema document tree.
///
/// # Invariants
/// - `schema` and `id` are only set on document roots.
/// - A node with `reference` set is a link; its other fields are annotations.
/// - `properties` and `pattern_properties` are ordered maps, so serialization
///   is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    /// Dialect URI (document roots only).
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Document identifier (document roots only).
    #[serde(rename = "$id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Relative path to another registered document.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Human title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Human description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared value type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    /// Format annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Regex the string value must match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Enumerated value set.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,
    /// Inclusive numeric lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    /// Required property names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Named child properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Self>>,
    /// Child properties keyed by name pattern.
    #[serde(rename = "patternProperties", default, skip_serializing_if = "Option::is_none")]
    pub pattern_properties: Option<BTreeMap<String, Self>>,
    /// Array element schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Self>>,
    /// Exactly-one alternatives.
    #[serde(rename = "oneOf", default, skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<Self>>,
    /// Any-of alternatives.
    #[serde(rename = "anyOf", default, skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<Self>>,
    /// Default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Example values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<Value>>,
    /// Docs-rendering hints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schematize: Option<Schematize>,
}

impl SchemaNode {
    /// Creates a document root with dialect, identifier, and title.
    #[must_use]
    pub fn document(id: &str, title: &str) -> Self {
        Self {
            schema: Some(SCHEMA_DIALECT.to_string()),
            id: Some(id.to_string()),
            title: Some(title.to_string()),
            ..Self::default()
        }
    }

    /// Creates a node with a declared type and title.
    #[must_use]
    pub fn typed(schema_type: SchemaType, title: &str) -> Self {
        Self {
            schema_type: Some(schema_type),
            title: Some(title.to_string()),
            ..Self::default()
        }
    }

    /// Creates a link to another registered document.
    #[must_use]
    pub fn reference(path: &str) -> Self {
        Self {
            reference: Some(path.to_string()),
            ..Self::default()
        }
    }

    /// Creates an untitled node that only declares a type.
    #[must_use]
    pub fn of_type(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    /// Sets the declared type.
    #[must_use]
    pub const fn with_type(mut self, schema_type: SchemaType) -> Self {
        self.schema_type = Some(schema_type);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Sets the string pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        self.pattern = Some(pattern.to_string());
        self
    }

    /// Sets the format annotation.
    #[must_use]
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    /// Sets the inclusive minimum.
    #[must_use]
    pub const fn with_minimum(mut self, minimum: i64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    /// Sets the enumerated value set.
    #[must_use]
    pub fn with_enum(mut self, values: &[&str]) -> Self {
        self.enum_values =
            Some(values.iter().map(|value| Value::String((*value).to_string())).collect());
        self
    }

    /// Sets the required property names.
    #[must_use]
    pub fn with_required(mut self, names: &[&str]) -> Self {
        self.required = Some(names.iter().map(|name| (*name).to_string()).collect());
        self
    }

    /// Adds a named child property.
    #[must_use]
    pub fn with_property(mut self, name: &str, node: Self) -> Self {
        self.properties.get_or_insert_with(BTreeMap::new).insert(name.to_string(), node);
        self
    }

    /// Adds a pattern-keyed child property.
    #[must_use]
    pub fn with_pattern_property(mut self, pattern: &str, node: Self) -> Self {
        self.pattern_properties.get_or_insert_with(BTreeMap::new).insert(pattern.to_string(), node);
        self
    }

    /// Sets the array element schema.
    #[must_use]
    pub fn with_items(mut self, node: Self) -> Self {
        self.items = Some(Box::new(node));
        self
    }

    /// Sets the exactly-one alternatives.
    #[must_use]
    pub fn with_one_of(mut self, nodes: Vec<Self>) -> Self {
        self.one_of = Some(nodes);
        self
    }

    /// Sets the any-of alternatives.
    #[must_use]
    pub fn with_any_of(mut self, nodes: Vec<Self>) -> Self {
        self.any_of = Some(nodes);
        self
    }

    /// Sets the example values.
    #[must_use]
    pub fn with_examples(mut self, examples: Vec<Value>) -> Self {
        self.examples = Some(examples);
        self
    }

    /// Sets the docs-rendering hints.
    #[must_use]
    pub fn with_schematize(mut self, schematize: Schematize) -> Self {
        self.schematize = Some(schematize);
        self
    }

    /// Returns the named child property, if any.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Self> {
        self.properties.as_ref().and_then(|properties| properties.get(name))
    }

    /// Returns every direct child node paired with its JSON pointer segment.
    #[must_use]
    pub fn children(&self) -> Vec<(String, &Self)> {
        let mut children = Vec::new();
        if let Some(properties) = &self.properties {
            for (name, node) in properties {
                children.push((format!("properties/{name}"), node));
            }
        }
        if let Some(properties) = &self.pattern_properties {
            for (pattern, node) in properties {
                children.push((format!("patternProperties/{pattern}"), node));
            }
        }
        if let Some(items) = &self.items {
            children.push((String::from("items"), items.as_ref()));
        }
        for (keyword, alternatives) in [("oneOf", &self.one_of), ("anyOf", &self.any_of)] {
            if let Some(alternatives) = alternatives {
                for (index, node) in alternatives.iter().enumerate() {
                    children.push((format!("{keyword}/{index}"), node));
                }
            }
        }
        children
    }
}
