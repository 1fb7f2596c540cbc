//! Error definitions for schema reading and struct generation.

use thiserror::Error;

#[derive(Debug, Error)]
/// Top-level error type returned by public APIs.
pub enum StructgenError {
    /// Input is not well-formed JSON.
    #[error("cannot parse JSON schema due to a syntax error at line {line}, character {column}: {message}")]
    JsonSyntax {
        line: usize,
        column: usize,
        message: String,
    },
    /// Input is JSON, but a schema keyword holds a value of the wrong shape.
    #[error("schema shape error at line {line}, character {column}: {message}")]
    SchemaShape {
        line: usize,
        column: usize,
        message: String,
    },
    /// Input bytes are not valid UTF-8.
    #[error("input is not valid UTF-8 at line {line}, character {column}")]
    InvalidUtf8 { line: usize, column: usize },
    /// A byte offset does not address any byte of the input.
    #[error("couldn't find offset {offset} in {len} bytes")]
    OffsetOutOfRange { offset: usize, len: usize },
    /// Every resolution error collected during one generation pass.
    #[error("{0}")]
    CombinedGeneration(String),
    /// Invalid generator configuration.
    #[error("config error: {0}")]
    Config(String),
    /// Filesystem I/O error from CLI or callers that propagate I/O.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// A single non-fatal failure raised while resolving one field or type.
pub enum ResolveError {
    /// An array field whose element type resolved to nothing.
    #[error("failed to get the type for {field}: can't create an array of an empty subtype")]
    MissingSubtype { field: String },
    /// A field whose schema kind has no primitive mapping.
    #[error("failed to get the type for {field}: no primitive type for schema type '{kind}' and subtype '{sub_type}'")]
    UnknownSchemaType {
        field: String,
        kind: String,
        sub_type: String,
    },
    /// A retained top-level node whose kind cannot be emitted as a type.
    #[error("unknown type for output at '{pointer}': '{kind}'")]
    UnknownTopLevelType { pointer: String, kind: String },
}
