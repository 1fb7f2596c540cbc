//! Field type resolution.
//!
//! Resolution never aborts: every call yields a best-effort [`TypeExpr`],
//! together with a [`ResolveError`] when the expression is a placeholder.

use crate::ast::{SchemaDocument, SchemaIndex, SchemaNode, TypeExpr};
use crate::error::ResolveError;
use crate::naming::type_name_for;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of resolving one field.
pub struct Resolution {
    pub expr: TypeExpr,
    pub error: Option<ResolveError>,
}

impl Resolution {
    fn ok(expr: TypeExpr) -> Self {
        Self { expr, error: None }
    }
}

/// Resolves field schemas against a document and its flattened index.
pub struct TypeResolver<'a> {
    document: &'a SchemaDocument,
    index: &'a SchemaIndex<'a>,
}

impl<'a> TypeResolver<'a> {
    pub fn new(document: &'a SchemaDocument, index: &'a SchemaIndex<'a>) -> Self {
        Self { document, index }
    }

    /// Resolves the type of property `field_name` of the node at `parent`.
    ///
    /// `field_name` is the raw property name; it locates embedded objects at
    /// `<parent>/properties/<field_name>`. `pointer` requests the pointer form
    /// for object types.
    pub fn resolve_field(
        &self,
        parent: &str,
        field_name: &str,
        node: Option<&SchemaNode>,
        pointer: bool,
    ) -> Resolution {
        let Some(node) = node else {
            return Resolution::ok(TypeExpr::Any);
        };

        let mut kind = node.kind.as_str();
        let mut sub_type = TypeExpr::Named(String::new());

        if !node.reference.is_empty() {
            match self.index.get(&node.reference) {
                Some(target) => {
                    kind = "object";
                    sub_type = TypeExpr::Named(type_name_for(&node.reference, target, 1));
                }
                None => {
                    tracing::warn!(
                        reference = %node.reference,
                        field = field_name,
                        "unresolved $ref, falling back to the field's own type"
                    );
                }
            }
        }

        if sub_type.is_empty() && kind == "object" {
            let embedded = format!("{parent}/properties/{field_name}");
            if let Some(target) = self.index.get(&embedded) {
                sub_type = TypeExpr::Named(type_name_for(&embedded, target, 1));
            }
        }

        if kind == "array" {
            let items = node
                .items
                .as_deref()
                .and_then(|pointer| self.document.node(pointer));
            // Element errors are dropped; only an empty element type is reported.
            sub_type = self.resolve_field(parent, field_name, items, false).expr;
        }

        primitive_type(field_name, kind, sub_type, pointer)
    }
}

/// Maps a schema kind and resolved sub-type to a concrete expression.
pub fn primitive_type(field: &str, kind: &str, sub_type: TypeExpr, pointer: bool) -> Resolution {
    let expr = match kind {
        "array" => {
            if sub_type.is_empty() {
                return Resolution {
                    expr: TypeExpr::EmptyArray,
                    error: Some(ResolveError::MissingSubtype {
                        field: field.to_string(),
                    }),
                };
            }
            TypeExpr::Slice(Box::new(sub_type))
        }
        "boolean" => TypeExpr::Boolean,
        "integer" => TypeExpr::Integer,
        "number" => TypeExpr::Number,
        "null" => TypeExpr::Null,
        "object" => match sub_type {
            TypeExpr::Named(name) if pointer => TypeExpr::Pointer(name),
            other => other,
        },
        "string" => TypeExpr::String,
        other => {
            return Resolution {
                expr: TypeExpr::Undefined,
                error: Some(ResolveError::UnknownSchemaType {
                    field: field.to_string(),
                    kind: other.to_string(),
                    sub_type: sub_type.to_string(),
                }),
            };
        }
    };
    Resolution::ok(expr)
}

#[cfg(test)]
mod tests {
    use super::{primitive_type, TypeResolver};
    use crate::ast::TypeExpr;
    use crate::error::ResolveError;
    use crate::schema::parse_schema;
    use test_case::test_case;

    const SCHEMA: &str = r##"{
      "type": "object",
      "properties": {
        "home": {"$ref": "#/definitions/address"},
        "work": {"$ref": "#/definitions/missing", "type": "string"},
        "ghost": {"$ref": "#/definitions/missing"},
        "geo": {"type": "object", "properties": {"lat": {"type": "number"}}},
        "blob": {"type": "object"},
        "tags": {"type": "array", "items": {"type": "string"}},
        "visits": {"type": "array", "items": {"$ref": "#/definitions/address"}},
        "matrix": {"type": "array", "items": {"type": "array", "items": {"type": "integer"}}},
        "anything": {"type": "array"},
        "weird": {"type": "array", "items": {"type": "date"}},
        "shapes": {"type": "array", "items": {"type": "object", "properties": {"x": {"type": "number"}}}}
      },
      "definitions": {
        "address": {"type": "object", "properties": {"city": {"type": "string"}}}
      }
    }"##;

    fn resolve(field: &str, pointer: bool) -> (String, Option<ResolveError>) {
        let document = parse_schema(SCHEMA).unwrap();
        let index = document.index();
        let resolver = TypeResolver::new(&document, &index);
        let node = document.node(&format!("#/properties/{field}"));
        let resolution = resolver.resolve_field("#", field, node, pointer);
        (resolution.expr.to_string(), resolution.error)
    }

    #[test_case("home", false, "Address")]
    #[test_case("home", true, "*Address")]
    #[test_case("work", false, "string"; "unresolved ref falls back to own kind")]
    #[test_case("geo", false, "Geo"; "embedded object uses its own name")]
    #[test_case("geo", true, "*Geo")]
    #[test_case("tags", false, "[]string")]
    #[test_case("visits", true, "[]Address"; "array elements never use pointers")]
    #[test_case("matrix", false, "[][]int")]
    #[test_case("anything", false, "[]interface{}"; "array without items")]
    #[test_case("weird", false, "[]undefined"; "element error is discarded")]
    fn resolves_without_error(field: &str, pointer: bool, expected: &str) {
        let (expr, error) = resolve(field, pointer);
        assert_eq!(expr, expected);
        assert_eq!(error, None);
    }

    #[test]
    fn absent_node_is_any() {
        let document = parse_schema("{}").unwrap();
        let index = document.index();
        let resolver = TypeResolver::new(&document, &index);
        let resolution = resolver.resolve_field("#", "x", None, true);
        assert_eq!(resolution.expr, TypeExpr::Any);
        assert_eq!(resolution.error, None);
    }

    #[test]
    fn unresolved_ref_without_type_is_unknown_schema_type() {
        let (expr, error) = resolve("ghost", false);
        assert_eq!(expr, "undefined");
        assert!(matches!(
            error,
            Some(ResolveError::UnknownSchemaType { ref kind, .. }) if kind.is_empty()
        ));
    }

    #[test]
    fn array_of_unindexed_objects_is_missing_subtype() {
        let (expr, error) = resolve("shapes", false);
        assert_eq!(expr, "error_creating_array");
        assert_eq!(
            error,
            Some(ResolveError::MissingSubtype {
                field: "shapes".to_string()
            })
        );
    }

    #[test]
    fn object_property_without_properties_is_still_named() {
        let (expr, _) = resolve("blob", false);
        assert_eq!(expr, "Blob");
    }

    #[test_case("boolean", "bool")]
    #[test_case("integer", "int")]
    #[test_case("number", "json.Number")]
    #[test_case("null", "nil")]
    #[test_case("string", "string")]
    fn maps_primitive_kinds(kind: &str, expected: &str) {
        let resolution = primitive_type("f", kind, TypeExpr::Named(String::new()), false);
        assert_eq!(resolution.expr.to_string(), expected);
        assert!(resolution.error.is_none());
    }

    #[test]
    fn unknown_kind_yields_placeholder_and_error() {
        let resolution = primitive_type("Field", "tuple", TypeExpr::Named(String::new()), false);
        assert_eq!(resolution.expr, TypeExpr::Undefined);
        assert!(resolution
            .error
            .unwrap()
            .to_string()
            .contains("schema type 'tuple'"));
    }
}
