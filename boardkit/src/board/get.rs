//! GetBoard command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use crate::types::BoardId;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Get a board by ID
#[derive(Debug, Deserialize)]
pub struct GetBoard {
    /// The board ID
    pub id: BoardId,
}

impl GetBoard {
    /// Create a new GetBoard command
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for GetBoard {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let board = ctx.read_board(&self.id).await?;

        let mut result = serde_json::to_value(&board)?;
        result["id"] = serde_json::json!(&board.id);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CreateBoard;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_get_board() {
        let temp = TempDir::new().unwrap();
        let ctx = BoardContext::new(temp.path().join(".boards"));

        let created = CreateBoard::new("Deals").execute(&ctx).await.unwrap();
        let id = created["id"].as_str().unwrap();

        let result = GetBoard::new(id).execute(&ctx).await.unwrap();
        assert_eq!(result["name"], "Deals");
        assert_eq!(result["id"], id);
    }

    #[tokio::test]
    async fn test_get_missing_board() {
        let temp = TempDir::new().unwrap();
        let ctx = BoardContext::new(temp.path().join(".boards"));

        let result = GetBoard::new("nope").execute(&ctx).await;
        assert!(matches!(result, Err(BoardError::BoardNotFound { .. })));
    }
}
