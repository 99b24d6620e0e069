//! UpdateColumn command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use crate::types::{ColumnId, DisplaySettings};
use async_trait::async_trait;
use boardkit_fields::{validate_definition, ColumnType};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;

/// Update a column definition.
///
/// Retyping is allowed; existing item data is never migrated. Values written
/// before a retype stay as they are and only new writes validate against the
/// new type.
#[derive(Debug, Deserialize)]
pub struct UpdateColumn {
    /// The column ID to update
    pub id: ColumnId,
    /// New display name
    pub name: Option<String>,
    /// New column type (retype)
    #[serde(rename = "type")]
    pub column_type: Option<ColumnType>,
    /// New required flag
    pub is_required: Option<bool>,
    /// New position in column order
    pub order: Option<usize>,
    /// New presentation hints
    pub display: Option<DisplaySettings>,
}

impl UpdateColumn {
    /// Create a new UpdateColumn command
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            column_type: None,
            is_required: None,
            order: None,
            display: None,
        }
    }

    /// Set the name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Retype the column
    pub fn with_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = Some(column_type);
        self
    }

    /// Set the required flag
    pub fn with_required(mut self, is_required: bool) -> Self {
        self.is_required = Some(is_required);
        self
    }

    /// Move the column in the display order
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = Some(order);
        self
    }

    /// Set the display settings
    pub fn with_display(mut self, display: DisplaySettings) -> Self {
        self.display = Some(display);
        self
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for UpdateColumn {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let mut column = ctx.read_column(&self.id).await?;

        if let Some(name) = &self.name {
            column.name = name.clone();
        }
        if let Some(column_type) = &self.column_type {
            column.column_type = column_type.clone();
        }
        if let Some(is_required) = self.is_required {
            column.is_required = is_required;
        }
        if let Some(display) = &self.display {
            column.display = display.clone();
        }

        // Re-validate whenever name or type changed
        let catalog: HashSet<String> = ctx
            .list_board_ids()
            .await?
            .iter()
            .map(|id| id.to_string())
            .collect();
        validate_definition(&column.name, &column.column_type, &catalog)?;

        if let Some(order) = self.order {
            // Renumber the board's columns so order stays unique
            let mut siblings = ctx.read_board_columns(&column.board_id).await?;
            siblings.retain(|c| c.id != column.id);
            let position = order.min(siblings.len());
            siblings.insert(position, column.clone());
            for (index, sibling) in siblings.iter_mut().enumerate() {
                sibling.order = index;
                if sibling.id == column.id {
                    column.order = index;
                } else {
                    ctx.write_column(sibling).await?;
                }
            }
        }

        ctx.write_column(&column).await?;

        let mut result = serde_json::to_value(&column)?;
        result["id"] = serde_json::json!(&column.id);
        Ok(result)
    }
}
