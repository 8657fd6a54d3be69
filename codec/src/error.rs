//! Error types for encoding and decoding.

use thiserror::Error;

/// Errors that can occur while encoding a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializeError {
    /// The concrete type of a polymorphic value is not registered for its base.
    #[error("type '{variant}' is not a registered variant of '{base}'")]
    UnregisteredType { base: String, variant: String },
    /// The format writer failed.
    #[error("writer error: {0}")]
    Writer(String),
}

/// Errors that can occur while decoding a blob.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeserializeError {
    /// The blob could not be parsed as the target format at all.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    /// The blob parsed, but its structure is not the requested shape.
    ///
    /// Also covers a record that lacks a required field or carries a field
    /// of the wrong type; `expected` then names the field.
    #[error("shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: String, found: String },
    /// A polymorphic discriminator names no registered variant.
    #[error("unknown discriminator '{discriminator}' for '{base}'")]
    UnknownDiscriminator { base: String, discriminator: String },
}

impl DeserializeError {
    pub(crate) fn malformed(msg: impl ToString) -> Self {
        Self::MalformedPayload(msg.to_string())
    }

    pub(crate) fn shape(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// A required field is absent from `record`.
    pub(crate) fn missing(record: &str, field: &str) -> Self {
        Self::shape(format!("field '{field}' in {record}"), "nothing")
    }

    /// A field is present but holds the wrong kind of value.
    pub(crate) fn field_type(field: &str, expected: &str, found: &str) -> Self {
        Self::shape(format!("{expected} for field '{field}'"), found)
    }

    /// Whether the blob parsed but did not have the requested structure.
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, Self::ShapeMismatch { .. })
    }
}
