//! Error types for the projection generator.

use thiserror::Error;

/// Errors that can occur while loading a schema or generating code.
///
/// Every variant is fatal. Only [`GeneratorError::PartialWrite`] means some
/// output files were already replaced; every other failure leaves the output
/// tree as it was.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Failed to read a schema document
    #[error("Failed to read schema document '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed schema document or type expression
    #[error("Failed to parse schema ({origin}): {message}")]
    SchemaParse {
        /// Where the problem was found (file, resource and/or field).
        origin: String,
        /// What went wrong.
        message: String,
    },

    /// Two resources project to the same wire type tag.
    #[error("Duplicate resource type tag '{type_tag}': declared by '{first}' and '{second}'")]
    DuplicateResource {
        type_tag: String,
        first: String,
        second: String,
    },

    /// Two fields of one resource share a wire name.
    #[error("Duplicate field '{serialized_name}' in resource '{resource}'")]
    DuplicateField {
        resource: String,
        serialized_name: String,
    },

    /// A field references a resource that is not part of the loaded schema.
    #[error("Field '{field}' of resource '{resource}' references unknown resource '{target}'")]
    UnresolvedReference {
        resource: String,
        field: String,
        target: String,
    },

    /// A declared name cannot be projected into an identifier.
    #[error("Invalid {kind} name '{name}': {reason}")]
    InvalidName {
        /// What was being named ("resource", "field", "type tag", ...).
        kind: String,
        name: String,
        reason: String,
    },

    /// Two generated items would share a Rust identifier.
    #[error("Identifier '{identifier}' generated for {first} collides with {second}")]
    IdentifierCollision {
        identifier: String,
        first: String,
        second: String,
    },

    /// Failed to generate code
    #[error("Code generation failed: {0}")]
    CodeGenError(String),

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be moved into place after earlier files were.
    #[error(
        "Failed to replace output file '{path}' after {} file(s) were already replaced: {source}",
        written.len()
    )]
    PartialWrite {
        path: String,
        /// Targets replaced before the failure.
        written: Vec<String>,
        #[source]
        source: std::io::Error,
    },

    /// Generated files on disk differ from a fresh generation.
    #[error("Generated files are out of date: {}", files.join(", "))]
    OutOfDate { files: Vec<String> },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}
