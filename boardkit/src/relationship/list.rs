//! ListRelationships command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use crate::types::BoardId;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// List relationship definitions, optionally only those touching one board
#[derive(Debug, Default, Deserialize)]
pub struct ListRelationships {
    /// Restrict to relationships where this board is source or target
    pub board_id: Option<BoardId>,
}

impl ListRelationships {
    /// Create a new ListRelationships command over all relationships
    pub fn new() -> Self {
        Self { board_id: None }
    }

    /// Restrict to one board
    pub fn for_board(board_id: impl Into<BoardId>) -> Self {
        Self {
            board_id: Some(board_id.into()),
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ListRelationships {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let relationships = ctx.read_all_relationships().await?;

        let mut result = Vec::new();
        for relationship in &relationships {
            if let Some(board_id) = &self.board_id {
                if &relationship.source_board_id != board_id
                    && &relationship.target_board_id != board_id
                {
                    continue;
                }
            }
            let mut entry = serde_json::to_value(relationship)?;
            entry["id"] = serde_json::json!(&relationship.id);
            result.push(entry);
        }
        Ok(Value::Array(result))
    }
}
