//! DeleteBoard command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use crate::types::BoardId;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Delete a board and everything it owns.
///
/// Cascades to the board's automations (rules and logs), every relationship
/// touching the board together with its link rows, the board's items,
/// columns and saved view preferences, then the board itself.
#[derive(Debug, Deserialize)]
pub struct DeleteBoard {
    /// The board ID to delete
    pub id: BoardId,
}

impl DeleteBoard {
    /// Create a new DeleteBoard command
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for DeleteBoard {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        // Existence check up front so a bad id is a clean NotFound
        let board = ctx.read_board(&self.id).await?;

        let mut automations_deleted = 0usize;
        for automation in ctx.read_board_automations(&self.id).await? {
            ctx.delete_automation_file(&automation.id).await?;
            automations_deleted += 1;
        }

        let mut relationships_deleted = 0usize;
        let mut links_deleted = 0usize;
        for relationship in ctx.read_all_relationships().await? {
            if relationship.source_board_id != self.id && relationship.target_board_id != self.id {
                continue;
            }
            for link in ctx.read_relationship_links(&relationship.id).await? {
                ctx.delete_link_file(&link.id).await?;
                links_deleted += 1;
            }
            ctx.delete_relationship_file(&relationship.id).await?;
            relationships_deleted += 1;
        }

        let mut items_deleted = 0usize;
        for item in ctx.read_board_items(&self.id).await? {
            ctx.delete_item_file(&item.id).await?;
            items_deleted += 1;
        }

        let mut columns_deleted = 0usize;
        for column in ctx.read_board_columns(&self.id).await? {
            ctx.delete_column_file(&column.id).await?;
            columns_deleted += 1;
        }

        ctx.delete_board_view_files(&self.id).await?;
        ctx.delete_board_file(&self.id).await?;

        tracing::debug!(
            board_id = %self.id,
            items_deleted,
            columns_deleted,
            relationships_deleted,
            "deleted board"
        );

        Ok(serde_json::json!({
            "id": board.id,
            "deleted": true,
            "items_deleted": items_deleted,
            "columns_deleted": columns_deleted,
            "relationships_deleted": relationships_deleted,
            "links_deleted": links_deleted,
            "automations_deleted": automations_deleted,
        }))
    }
}
