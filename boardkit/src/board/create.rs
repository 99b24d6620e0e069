//! CreateBoard command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use crate::types::Board;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Create a new board
#[derive(Debug, Deserialize)]
pub struct CreateBoard {
    /// The board name (required)
    pub name: String,
    /// Optional description
    pub description: Option<String>,
}

impl CreateBoard {
    /// Create a new CreateBoard command
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for CreateBoard {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        ctx.ensure_directories().await?;

        let mut board = Board::new(&self.name);
        board.description = self.description.clone();

        ctx.write_board(&board).await?;

        let mut result = serde_json::to_value(&board)?;
        result["id"] = serde_json::json!(&board.id);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_create_board() {
        let temp = TempDir::new().unwrap();
        let ctx = BoardContext::new(temp.path().join(".boards"));

        let result = CreateBoard::new("Deals")
            .with_description("Sales pipeline")
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(result["name"], "Deals");
        assert_eq!(result["description"], "Sales pipeline");
        assert_eq!(result["id"].as_str().unwrap().len(), 26);
    }

    #[tokio::test]
    async fn test_create_board_initializes_store() {
        let temp = TempDir::new().unwrap();
        let ctx = BoardContext::new(temp.path().join(".boards"));

        CreateBoard::new("Deals").execute(&ctx).await.unwrap();
        assert!(ctx.directories_exist());
    }
}
