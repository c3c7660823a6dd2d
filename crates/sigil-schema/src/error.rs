//! Schema synthesis and instantiation error types.

use thiserror::Error;

/// Errors from schema synthesis and instantiation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Two fields of one schema share a name.
    #[error("Duplicate field '{field}' in schema {schema}")]
    DuplicateField { schema: String, field: String },

    /// The class descriptor cannot describe a real class.
    #[error("Malformed class '{class}': {reason}")]
    MalformedClass { class: String, reason: String },

    /// A required field was not supplied when instantiating a schema.
    #[error("Missing value for required field '{field}' of {schema}")]
    MissingRequiredField { schema: String, field: String },

    /// A value was supplied for a field the schema does not declare.
    #[error("Unknown field '{field}' for {schema}")]
    UnknownField { schema: String, field: String },
}
