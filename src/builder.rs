//! Single-pass construction of generated types from a schema index.

use indexmap::IndexMap;

use crate::ast::{Field, GeneratedType, SchemaDocument, SchemaNode, TypeExpr, TypeKind, TypeMap};
use crate::config::GeneratorConfig;
use crate::error::{ResolveError, StructgenError};
use crate::naming::{identifier_from, type_name_for};
use crate::resolve::TypeResolver;

const PROPERTY_SEGMENT: &str = "/properties/";

/// Result of one generation pass: every type that could be produced plus the
/// combined text of every error met on the way.
#[derive(Debug)]
pub struct Generation {
    pub types: TypeMap,
    pub error: Option<StructgenError>,
}

impl Generation {
    /// Treats any collected error as fatal.
    pub fn into_result(self) -> Result<TypeMap, StructgenError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.types),
        }
    }
}

/// Builds named types from a [`SchemaDocument`].
pub struct StructBuilder<'a> {
    document: &'a SchemaDocument,
    config: &'a GeneratorConfig,
}

impl<'a> StructBuilder<'a> {
    pub fn new(document: &'a SchemaDocument, config: &'a GeneratorConfig) -> Self {
        Self { document, config }
    }

    /// Walks the index in pointer order and produces the name to type map.
    ///
    /// Two pointers that derive the same name collide; the later pointer wins.
    pub fn build(&self) -> Generation {
        let index = self.document.index();
        let resolver = TypeResolver::new(self.document, &index);
        tracing::debug!(indexed = index.len(), "building types");

        let mut types = TypeMap::new();
        let mut errors: Vec<ResolveError> = Vec::new();

        for (pointer, node) in index.iter() {
            if pointer.contains(PROPERTY_SEGMENT) && node.kind != "object" {
                tracing::debug!(pointer, "property inlined into its parent");
                continue;
            }

            let (kind, fields) = match node.kind.as_str() {
                "object" | "array" => {
                    let fields = self.resolve_fields(&resolver, pointer, node, &mut errors);
                    if fields.is_empty() {
                        (TypeKind::UndefinedStruct, fields)
                    } else {
                        (TypeKind::Struct, fields)
                    }
                }
                "integer" => (TypeKind::Int, scalar_field(TypeExpr::Integer)),
                "string" => (TypeKind::String, scalar_field(TypeExpr::String)),
                other => {
                    errors.push(ResolveError::UnknownTopLevelType {
                        pointer: pointer.to_string(),
                        kind: other.to_string(),
                    });
                    if other == "number" {
                        (TypeKind::Float, scalar_field(TypeExpr::Number))
                    } else {
                        (TypeKind::UndefinedStruct, IndexMap::new())
                    }
                }
            };

            let name = type_name_for(pointer, node, 1);
            let generated = GeneratedType {
                id: pointer.to_string(),
                name: name.clone(),
                kind,
                fields,
            };
            if let Some(previous) = types.insert(name, generated) {
                tracing::debug!(
                    name = %previous.name,
                    replaced = %previous.id,
                    by = pointer,
                    "type name collision"
                );
            }
        }

        tracing::info!(types = types.len(), errors = errors.len(), "generated types");

        Generation {
            types,
            error: combine_errors(&errors),
        }
    }

    fn resolve_fields(
        &self,
        resolver: &TypeResolver<'_>,
        pointer: &str,
        node: &SchemaNode,
        errors: &mut Vec<ResolveError>,
    ) -> IndexMap<String, Field> {
        let mut fields = IndexMap::new();

        for (json_name, child_pointer) in &node.properties {
            let required = node.is_required(json_name);
            let name = identifier_from(json_name);
            let pointer_form = !required && self.config.non_required_as_pointer;

            let child = self.document.node(child_pointer);
            let resolution = resolver.resolve_field(pointer, json_name, child, pointer_form);
            if let Some(err) = resolution.error {
                errors.push(err);
            }

            fields.insert(
                name.clone(),
                Field {
                    name,
                    json_name: json_name.clone(),
                    type_expr: resolution.expr,
                    required,
                },
            );
        }

        fields
    }
}

fn scalar_field(type_expr: TypeExpr) -> IndexMap<String, Field> {
    let mut fields = IndexMap::new();
    fields.insert(
        String::new(),
        Field {
            name: String::new(),
            json_name: String::new(),
            type_expr,
            required: false,
        },
    );
    fields
}

fn combine_errors(errors: &[ResolveError]) -> Option<StructgenError> {
    if errors.is_empty() {
        return None;
    }
    let joined = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    Some(StructgenError::CombinedGeneration(joined))
}
