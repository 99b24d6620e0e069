//! Error types for schema and value validation

use thiserror::Error;

/// Result type for field validation
pub type Result<T> = std::result::Result<T, FieldError>;

/// Errors raised by column definition and value validation.
///
/// Both variants name the offending column so the calling UI can surface a
/// field-level message.
#[derive(Debug, Error)]
pub enum FieldError {
    /// The column definition itself is malformed
    #[error("invalid schema for column '{column}': {message}")]
    InvalidSchema { column: String, message: String },

    /// A value does not conform to its column's type or rules
    #[error("invalid value for column '{column}': {message}")]
    InvalidValue { column: String, message: String },
}

impl FieldError {
    /// Create an invalid schema error
    pub fn invalid_schema(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSchema {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            column: column.into(),
            message: message.into(),
        }
    }
}
