//! Board-level types: Board, Column, DisplaySettings

use super::ids::{BoardId, ColumnId};
use boardkit_fields::ColumnType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-defined table. Columns are stored as individual files and
/// collectively define the board's schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    #[serde(skip)]
    pub id: BoardId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Create a new board with the given name
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: BoardId::new(),
            name: name.into(),
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a description to the board
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Presentation hints for a column. No invariants; carried for the UI.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DisplaySettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub sortable: bool,
}

/// One typed field in a board's schema.
///
/// `order` defines display/iteration order and stays unique per board.
/// Deleting a column does not strip its values from existing items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    #[serde(skip)]
    pub id: ColumnId,
    pub board_id: BoardId,
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub order: usize,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub display: DisplaySettings,
}

impl Column {
    /// Create a new column on a board
    pub fn new(board_id: BoardId, name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            id: ColumnId::new(),
            board_id,
            name: name.into(),
            column_type,
            order: 0,
            is_required: false,
            display: DisplaySettings::default(),
        }
    }

    /// Mark the column as required
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Set the display order
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }
}
