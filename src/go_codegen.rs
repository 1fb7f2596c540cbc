//! Go source generation from generated types.

use crate::ast::{Field, GeneratedType, TypeKind, TypeMap};
use crate::builder::StructBuilder;
use crate::config::GeneratorConfig;
use crate::error::StructgenError;
use crate::schema::parse_schema;

const NUMBER_IMPORT: &str = "encoding/json";

/// Generates Go source for a JSON Schema document.
///
/// Resolution errors do not stop generation: the listing holds every type
/// that could be produced and the combined error is returned beside it.
/// Only an unreadable schema fails outright.
pub fn generate_go_source(
    input: &str,
    config: &GeneratorConfig,
) -> Result<(String, Option<StructgenError>), StructgenError> {
    let document = parse_schema(input)?;
    let generation = StructBuilder::new(&document, config).build();
    let source = render_go_source(&config.package, &generation.types);
    Ok((source, generation.error))
}

/// Renders a package declaration, the number import and one declaration per
/// type in name order.
pub fn render_go_source(package: &str, types: &TypeMap) -> String {
    let mut out = String::new();
    out.push_str(&format!("package {package}\n\n"));
    out.push_str(&format!("import \"{NUMBER_IMPORT}\"\n\n"));

    for generated in types.values() {
        match generated.kind {
            TypeKind::Struct => out.push_str(&render_struct(generated)),
            TypeKind::UndefinedStruct => {
                out.push_str(&render_alias(&generated.name, "map[string]interface{}"))
            }
            TypeKind::Float => out.push_str(&render_alias(&generated.name, "json.Number")),
            TypeKind::Int => out.push_str(&render_alias(&generated.name, "int")),
            TypeKind::String => out.push_str(&render_alias(&generated.name, "string")),
        }
    }

    out
}

fn render_struct(generated: &GeneratedType) -> String {
    let mut out = String::new();
    out.push_str(&format!("type {} struct {{\n", generated.name));
    for field in generated.fields.values() {
        out.push_str(&render_field(field));
    }
    out.push_str("}\n\n");
    out
}

fn render_field(field: &Field) -> String {
    match json_tag(field) {
        Some(tag) => format!("\t{} {} {tag}\n", field.name, field.type_expr),
        None => format!("\t{} {}\n", field.name, field.type_expr),
    }
}

/// Serialization tag for `field`; `omitempty` unless the field is required.
fn json_tag(field: &Field) -> Option<String> {
    if field.json_name.is_empty() {
        return None;
    }
    let omitempty = if field.required { "" } else { ",omitempty" };
    Some(format!("`json:\"{}{omitempty}\"`", field.json_name))
}

fn render_alias(name: &str, target: &str) -> String {
    format!("type {name} {target}\n\n")
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::{render_field, render_go_source};
    use crate::ast::{Field, GeneratedType, TypeExpr, TypeKind, TypeMap};

    fn field(json_name: &str, required: bool) -> Field {
        Field {
            name: "Name".to_string(),
            json_name: json_name.to_string(),
            type_expr: TypeExpr::String,
            required,
        }
    }

    fn alias(name: &str, kind: TypeKind) -> GeneratedType {
        GeneratedType {
            id: format!("#/definitions/{name}"),
            name: name.to_string(),
            kind,
            fields: IndexMap::new(),
        }
    }

    #[test]
    fn required_field_tag_omits_omitempty() {
        assert_eq!(
            render_field(&field("name", true)),
            "\tName string `json:\"name\"`\n"
        );
        assert_eq!(
            render_field(&field("name", false)),
            "\tName string `json:\"name,omitempty\"`\n"
        );
    }

    #[test]
    fn field_without_json_name_has_no_tag() {
        assert_eq!(render_field(&field("", false)), "\tName string\n");
    }

    #[test]
    fn empty_type_set_renders_header_only() {
        let rendered = render_go_source("testpackage", &TypeMap::new());
        assert_eq!(rendered, "package testpackage\n\nimport \"encoding/json\"\n\n");
    }

    #[test]
    fn non_struct_kinds_render_as_aliases_in_name_order() {
        let mut types = TypeMap::new();
        for (name, kind) in [
            ("Open", TypeKind::UndefinedStruct),
            ("Amount", TypeKind::Float),
            ("Count", TypeKind::Int),
            ("Code", TypeKind::String),
        ] {
            types.insert(name.to_string(), alias(name, kind));
        }

        let rendered = render_go_source("main", &types);
        let expected = "package main\n\n\
                        import \"encoding/json\"\n\n\
                        type Amount json.Number\n\n\
                        type Code string\n\n\
                        type Count int\n\n\
                        type Open map[string]interface{}\n\n";
        assert_eq!(rendered, expected);
    }
}
