//! Core column schema types.
//!
//! `ColumnType` is deliberately a closed union: validators and serializers
//! match it exhaustively, so adding a tenth column kind is a compile-time
//! exercise rather than a silent gap in some string-keyed lookup table.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single allowed value of a select, multi-select or status column.
///
/// Validation compares item values against `value`; `label` and `color` are
/// presentation only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectOption {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub order: i32,
}

impl SelectOption {
    /// Create an option with just a value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
            color: None,
            order: 0,
        }
    }

    /// Set the display color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// The type of a column. Determines what shape its values take and which
/// validation rules apply to it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnType {
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
        /// Regular expression the value must match.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<String>,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    /// ISO 8601 date or datetime string.
    Date,
    SingleSelect {
        options: Vec<SelectOption>,
    },
    MultiSelect {
        options: Vec<SelectOption>,
    },
    /// A single-select with workflow semantics. Validated identically to
    /// `SingleSelect`; kept distinct so consumers can render it differently.
    Status {
        options: Vec<SelectOption>,
    },
    /// Opaque file reference. No validation beyond presence.
    File,
    /// Opaque image reference. No validation beyond presence.
    Image,
    /// Stores item ids pointing into another board.
    BoardLink {
        linked_board_id: String,
        #[serde(default)]
        multiple: bool,
    },
}

impl ColumnType {
    /// Short kind name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Number { .. } => "number",
            Self::Date => "date",
            Self::SingleSelect { .. } => "single_select",
            Self::MultiSelect { .. } => "multi_select",
            Self::Status { .. } => "status",
            Self::File => "file",
            Self::Image => "image",
            Self::BoardLink { .. } => "board_link",
        }
    }

    /// The allowed options of a select-like column, if any.
    pub fn options(&self) -> Option<&[SelectOption]> {
        match self {
            Self::SingleSelect { options }
            | Self::MultiSelect { options }
            | Self::Status { options } => Some(options),
            _ => None,
        }
    }

    /// Whether values of this type are lists rather than scalars.
    pub fn is_list_valued(&self) -> bool {
        matches!(
            self,
            Self::MultiSelect { .. } | Self::BoardLink { multiple: true, .. }
        )
    }

    /// Plain text column without length or pattern rules.
    pub fn text() -> Self {
        Self::Text {
            min_length: None,
            max_length: None,
            pattern: None,
        }
    }

    /// Unbounded number column.
    pub fn number() -> Self {
        Self::Number {
            min: None,
            max: None,
        }
    }

    /// Status column from bare option values.
    pub fn status(values: &[&str]) -> Self {
        Self::Status {
            options: values.iter().copied().map(SelectOption::new).collect(),
        }
    }

    /// Single-select column from bare option values.
    pub fn single_select(values: &[&str]) -> Self {
        Self::SingleSelect {
            options: values.iter().copied().map(SelectOption::new).collect(),
        }
    }

    /// Multi-select column from bare option values.
    pub fn multi_select(values: &[&str]) -> Self {
        Self::MultiSelect {
            options: values.iter().copied().map(SelectOption::new).collect(),
        }
    }
}

/// Lookup used while validating `BoardLink` definitions.
///
/// The engine passes a snapshot of the board ids it knows about so this
/// crate never has to reach into storage itself.
pub trait BoardCatalog {
    fn contains(&self, board_id: &str) -> bool;
}

impl BoardCatalog for HashSet<String> {
    fn contains(&self, board_id: &str) -> bool {
        HashSet::contains(self, board_id)
    }
}
