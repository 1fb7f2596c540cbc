pub mod ast;
pub mod builder;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod go_codegen;
pub mod naming;
pub mod resolve;
pub mod schema;

use std::path::Path;

pub use ast::{
    Field, GeneratedType, NodeOrigin, SchemaDocument, SchemaIndex, SchemaNode, TypeExpr, TypeKind,
    TypeMap,
};
pub use builder::{Generation, StructBuilder};
pub use config::GeneratorConfig;
pub use diagnostics::line_and_column;
pub use error::{ResolveError, StructgenError};
pub use go_codegen::{generate_go_source, render_go_source};
pub use schema::{parse_schema, parse_schema_bytes};

/// Reads a schema and builds its types in one call.
///
/// Fails only when the schema cannot be read; resolution errors are carried in
/// [`Generation::error`].
pub fn generate_types(input: &str, config: &GeneratorConfig) -> Result<Generation, StructgenError> {
    let document = parse_schema(input)?;
    Ok(StructBuilder::new(&document, config).build())
}

/// Reads a schema file and renders its Go listing.
pub fn generate_go_source_from_path(
    path: impl AsRef<Path>,
    config: &GeneratorConfig,
) -> Result<(String, Option<StructgenError>), StructgenError> {
    let bytes = std::fs::read(path.as_ref())?;
    let document = parse_schema_bytes(&bytes)?;
    let generation = StructBuilder::new(&document, config).build();
    Ok((render_go_source(&config.package, &generation.types), generation.error))
}
