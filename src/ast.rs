//! Public schema and generated-type models shared by the reader, builder and emitters.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// Pointer of the schema root.
pub const ROOT_POINTER: &str = "#";

// ── Schema side ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// Where a node sits in the schema tree.
pub enum NodeOrigin {
    Root,
    Definition,
    Property,
    Items,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One schema node. Child nodes are referenced by pointer, never owned.
pub struct SchemaNode {
    /// Pointer addressing this node, for example `#/definitions/address`.
    pub pointer: String,
    /// Primitive kind tag (`object`, `array`, `string`, ...); empty when absent.
    pub kind: String,
    /// Property name to child pointer.
    pub properties: BTreeMap<String, String>,
    /// Pointer of the array element node.
    pub items: Option<String>,
    /// Names of required properties.
    pub required: BTreeSet<String>,
    /// `$ref` target pointer; empty when the node has no reference.
    pub reference: String,
    pub title: String,
    pub description: String,
    pub origin: NodeOrigin,
}

impl SchemaNode {
    pub fn is_required(&self, property: &str) -> bool {
        self.required.contains(property)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Arena of every node read from a schema, keyed by pointer.
///
/// Built once by [`crate::schema::parse_schema`] and never mutated afterwards.
pub struct SchemaDocument {
    nodes: BTreeMap<String, SchemaNode>,
}

impl SchemaDocument {
    pub(crate) fn insert(&mut self, node: SchemaNode) {
        self.nodes.insert(node.pointer.clone(), node);
    }

    /// Looks up any node, including array element nodes.
    pub fn node(&self, pointer: &str) -> Option<&SchemaNode> {
        self.nodes.get(pointer)
    }

    pub fn root(&self) -> Option<&SchemaNode> {
        self.node(ROOT_POINTER)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the flattened index of independently addressable nodes: the
    /// root, every definition and every object-typed property.
    pub fn index(&self) -> SchemaIndex<'_> {
        let entries = self
            .nodes
            .iter()
            .filter(|(_, node)| match node.origin {
                NodeOrigin::Root | NodeOrigin::Definition => true,
                NodeOrigin::Property => node.kind == "object",
                NodeOrigin::Items => false,
            })
            .map(|(pointer, node)| (pointer.as_str(), node))
            .collect();
        SchemaIndex { entries }
    }
}

#[derive(Debug, Clone)]
/// Flat pointer to node table, iterated in lexicographic pointer order.
pub struct SchemaIndex<'a> {
    entries: BTreeMap<&'a str, &'a SchemaNode>,
}

impl<'a> SchemaIndex<'a> {
    pub fn get(&self, pointer: &str) -> Option<&'a SchemaNode> {
        self.entries.get(pointer).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a SchemaNode)> + '_ {
        self.entries.iter().map(|(pointer, node)| (*pointer, *node))
    }

    pub fn pointers(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Generated side ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// Shape of a generated top-level type.
pub enum TypeKind {
    Struct,
    /// Object without resolvable properties, emitted as an open map.
    UndefinedStruct,
    Int,
    String,
    Float,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Type expression of a field, rendered as Go source by `Display`.
pub enum TypeExpr {
    /// No schema was available; `interface{}`.
    Any,
    Boolean,
    Integer,
    /// Decimal-preserving number; `json.Number`.
    Number,
    /// Null marker; not a usable field type.
    Null,
    String,
    /// Reference to a generated type by name.
    Named(String),
    Pointer(String),
    Slice(Box<TypeExpr>),
    /// Placeholder for an array whose element type could not be resolved.
    EmptyArray,
    /// Placeholder for an unmapped schema kind.
    Undefined,
}

impl TypeExpr {
    /// True for a named reference with no name, the "missing sub-type" case.
    pub fn is_empty(&self) -> bool {
        matches!(self, TypeExpr::Named(name) if name.is_empty())
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Any => f.write_str("interface{}"),
            TypeExpr::Boolean => f.write_str("bool"),
            TypeExpr::Integer => f.write_str("int"),
            TypeExpr::Number => f.write_str("json.Number"),
            TypeExpr::Null => f.write_str("nil"),
            TypeExpr::String => f.write_str("string"),
            TypeExpr::Named(name) => f.write_str(name),
            TypeExpr::Pointer(name) => write!(f, "*{name}"),
            TypeExpr::Slice(element) => write!(f, "[]{element}"),
            TypeExpr::EmptyArray => f.write_str("error_creating_array"),
            TypeExpr::Undefined => f.write_str("undefined"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One field of a generated type.
pub struct Field {
    /// Identifier derived from `json_name`.
    pub name: String,
    /// Original property name; empty means no serialization tag.
    pub json_name: String,
    pub type_expr: TypeExpr,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A named type produced from one schema node.
pub struct GeneratedType {
    /// Source pointer, for example `#/definitions/address`.
    pub id: String,
    pub name: String,
    pub kind: TypeKind,
    /// Field name to field, in property-name order.
    pub fields: IndexMap<String, Field>,
}

/// Generated types keyed by name; iteration is in name order.
pub type TypeMap = BTreeMap<String, GeneratedType>;
