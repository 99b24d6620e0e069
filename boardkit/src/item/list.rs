//! ListItems command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use crate::types::BoardId;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// List a board's items in display order
#[derive(Debug, Deserialize)]
pub struct ListItems {
    /// The board whose items to list
    pub board_id: BoardId,
}

impl ListItems {
    /// Create a new ListItems command
    pub fn new(board_id: impl Into<BoardId>) -> Self {
        Self {
            board_id: board_id.into(),
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ListItems {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        if !ctx.board_exists(&self.board_id).await {
            return Err(BoardError::BoardNotFound {
                id: self.board_id.to_string(),
            });
        }

        let items = ctx.read_board_items(&self.board_id).await?;

        let mut result = Vec::with_capacity(items.len());
        for item in &items {
            let mut entry = serde_json::to_value(item)?;
            entry["id"] = serde_json::json!(&item.id);
            result.push(entry);
        }
        Ok(Value::Array(result))
    }
}
