//! Error types for the board engine

use boardkit_fields::FieldError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur in board operations
#[derive(Debug, Error)]
pub enum BoardError {
    /// Store not initialized at the given path
    #[error("store not initialized at {path}")]
    NotInitialized { path: PathBuf },

    /// Board not found
    #[error("board not found: {id}")]
    BoardNotFound { id: String },

    /// Column not found
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Item not found
    #[error("item not found: {id}")]
    ItemNotFound { id: String },

    /// Relationship not found
    #[error("relationship not found: {id}")]
    RelationshipNotFound { id: String },

    /// Link row not found
    #[error("link not found: {id}")]
    LinkNotFound { id: String },

    /// Automation not found
    #[error("automation not found: {id}")]
    AutomationNotFound { id: String },

    /// Required column has no usable value
    #[error("missing required field: {column}")]
    MissingRequiredField { column: String },

    /// Item does not belong to the board the relationship declares
    #[error("item {item_id} belongs to board {actual}, relationship expects {expected}")]
    BoardMismatch {
        item_id: String,
        expected: String,
        actual: String,
    },

    /// Link would violate the relationship's cardinality
    #[error(
        "cardinality violation on relationship {relationship_id}: \
         {side} item {item_id} is already linked by {existing_link_id}"
    )]
    CardinalityViolation {
        relationship_id: String,
        side: &'static str,
        item_id: String,
        existing_link_id: String,
    },

    /// Relationship field name already in use on that board
    #[error("duplicate relationship field name '{name}' on board {board_id}")]
    DuplicateFieldName { board_id: String, name: String },

    /// Schema or value validation failure
    #[error(transparent)]
    Field(#[from] FieldError),

    /// Task/notification collaborator raised
    #[error("collaborator error: {message}")]
    Collaborator { message: String },

    /// Lock is held by another operation
    #[error("lock busy - another operation in progress")]
    LockBusy,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardError {
    /// Create a missing required field error
    pub fn missing_required(column: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            column: column.into(),
        }
    }

    /// Create a collaborator error
    pub fn collaborator(message: impl Into<String>) -> Self {
        Self::Collaborator {
            message: message.into(),
        }
    }

    /// Check if this is a retryable error
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LockBusy)
    }
}
