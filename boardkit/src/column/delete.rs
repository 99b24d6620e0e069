//! DeleteColumn command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use crate::types::ColumnId;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Delete a column definition.
///
/// Removes the definition only. Values already stored under this column id
/// remain in item data as orphaned keys; they are tolerated on read and
/// never purged.
#[derive(Debug, Deserialize)]
pub struct DeleteColumn {
    /// The column ID to delete
    pub id: ColumnId,
}

impl DeleteColumn {
    /// Create a new DeleteColumn command
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for DeleteColumn {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let column = ctx.read_column(&self.id).await?;
        ctx.delete_column_file(&self.id).await?;

        Ok(serde_json::json!({
            "id": column.id,
            "deleted": true,
        }))
    }
}
