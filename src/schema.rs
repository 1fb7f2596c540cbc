//! JSON Schema reader producing the pointer-keyed [`SchemaDocument`].
//!
//! Supported keyword subset:
//! - Typing: `type` (string or array of strings), `$ref`
//! - Object: `properties`, `required`
//! - Array: `items` (single schema)
//! - Naming: `title`, `description`
//! - Nesting: `definitions`, `$defs` (at any depth)
//!
//! All other keywords are ignored.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::de::value::MapAccessDeserializer;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::error::Category;

use crate::ast::{NodeOrigin, SchemaDocument, SchemaNode, ROOT_POINTER};
use crate::diagnostics::line_and_column;
use crate::error::StructgenError;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSchema {
    #[serde(rename = "$ref")]
    reference: Option<String>,
    #[serde(rename = "type")]
    kind: Option<RawKind>,
    title: Option<String>,
    description: Option<String>,
    properties: BTreeMap<String, SchemaObject>,
    items: Option<Box<SchemaObject>>,
    required: Vec<String>,
    definitions: BTreeMap<String, SchemaObject>,
    #[serde(rename = "$defs")]
    defs: BTreeMap<String, SchemaObject>,
}

/// A subschema, which must be a JSON object. The derived struct impl would
/// also take a JSON array and fill fields by position.
#[derive(Debug, Default)]
struct SchemaObject(RawSchema);

impl<'de> Deserialize<'de> for SchemaObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SchemaObjectVisitor)
    }
}

struct SchemaObjectVisitor;

impl<'de> Visitor<'de> for SchemaObjectVisitor {
    type Value = SchemaObject;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a schema object")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        RawSchema::deserialize(MapAccessDeserializer::new(map)).map(SchemaObject)
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawKind {
    Single(String),
    Union(Vec<String>),
}

/// Parses JSON Schema text into a [`SchemaDocument`].
pub fn parse_schema(input: &str) -> Result<SchemaDocument, StructgenError> {
    let SchemaObject(raw) = serde_json::from_str(input).map_err(json_error)?;

    let mut document = SchemaDocument::default();
    flatten(raw, ROOT_POINTER.to_string(), NodeOrigin::Root, &mut document);
    tracing::debug!(nodes = document.len(), "read schema");
    Ok(document)
}

/// Parses raw JSON Schema bytes, reporting invalid UTF-8 with its position.
pub fn parse_schema_bytes(input: &[u8]) -> Result<SchemaDocument, StructgenError> {
    let text = std::str::from_utf8(input).map_err(|e| {
        match line_and_column(input, e.valid_up_to()) {
            Ok((line, column)) => StructgenError::InvalidUtf8 { line, column },
            Err(other) => other,
        }
    })?;
    parse_schema(text)
}

fn json_error(err: serde_json::Error) -> StructgenError {
    let line = err.line();
    let column = err.column();
    // serde_json appends " at line L column C"; the variants carry their own.
    let text = err.to_string();
    let message = text
        .strip_suffix(&format!(" at line {line} column {column}"))
        .unwrap_or(&text)
        .to_string();
    match err.classify() {
        Category::Data => StructgenError::SchemaShape {
            line,
            column,
            message,
        },
        Category::Syntax | Category::Eof | Category::Io => StructgenError::JsonSyntax {
            line,
            column,
            message,
        },
    }
}

fn flatten(raw: RawSchema, pointer: String, origin: NodeOrigin, document: &mut SchemaDocument) {
    let kind = derive_kind(&raw);

    for (name, SchemaObject(child)) in raw.definitions {
        flatten(
            child,
            format!("{pointer}/definitions/{name}"),
            NodeOrigin::Definition,
            document,
        );
    }
    for (name, SchemaObject(child)) in raw.defs {
        flatten(
            child,
            format!("{pointer}/$defs/{name}"),
            NodeOrigin::Definition,
            document,
        );
    }

    let mut properties = BTreeMap::new();
    for (name, SchemaObject(child)) in raw.properties {
        let child_pointer = format!("{pointer}/properties/{name}");
        flatten(child, child_pointer.clone(), NodeOrigin::Property, document);
        properties.insert(name, child_pointer);
    }

    let items = raw.items.map(|child| {
        let child_pointer = format!("{pointer}/items");
        flatten(child.0, child_pointer.clone(), NodeOrigin::Items, document);
        child_pointer
    });

    document.insert(SchemaNode {
        pointer,
        kind,
        properties,
        items,
        required: raw.required.into_iter().collect::<BTreeSet<_>>(),
        reference: raw.reference.unwrap_or_default(),
        title: raw.title.unwrap_or_default(),
        description: raw.description.unwrap_or_default(),
        origin,
    });
}

fn derive_kind(raw: &RawSchema) -> String {
    match &raw.kind {
        Some(RawKind::Single(kind)) => kind.clone(),
        Some(RawKind::Union(kinds)) => kinds
            .iter()
            .find(|kind| kind.as_str() != "null")
            .or_else(|| kinds.first())
            .cloned()
            .unwrap_or_default(),
        None if !raw.properties.is_empty() => "object".to_string(),
        None if raw.items.is_some() => "array".to_string(),
        None => String::new(),
    }
}
