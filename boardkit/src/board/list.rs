//! ListBoards command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// List all boards, sorted by name
#[derive(Debug, Default, Deserialize)]
pub struct ListBoards {}

impl ListBoards {
    /// Create a new ListBoards command
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ListBoards {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let mut boards = ctx.read_all_boards().await?;
        boards.sort_by(|a, b| a.name.cmp(&b.name));

        let mut result = Vec::with_capacity(boards.len());
        for board in &boards {
            let mut entry = serde_json::to_value(board)?;
            entry["id"] = serde_json::json!(&board.id);
            result.push(entry);
        }
        Ok(Value::Array(result))
    }
}
