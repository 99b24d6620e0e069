//! UpdateBoard command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use crate::types::BoardId;
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

/// Update a board's name or description
#[derive(Debug, Deserialize)]
pub struct UpdateBoard {
    /// The board ID to update
    pub id: BoardId,
    /// New name
    pub name: Option<String>,
    /// New description (None = don't change, Some(None) = clear)
    pub description: Option<Option<String>>,
}

impl UpdateBoard {
    /// Create a new UpdateBoard command
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: None,
        }
    }

    /// Set the name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set or clear the description
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for UpdateBoard {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let mut board = ctx.read_board(&self.id).await?;

        if let Some(name) = &self.name {
            board.name = name.clone();
        }
        if let Some(description) = &self.description {
            board.description = description.clone();
        }
        board.updated_at = Utc::now();

        ctx.write_board(&board).await?;

        let mut result = serde_json::to_value(&board)?;
        result["id"] = serde_json::json!(&board.id);
        Ok(result)
    }
}
