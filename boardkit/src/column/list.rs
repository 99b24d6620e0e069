//! ListColumns command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use crate::types::BoardId;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// List a board's columns in display order
#[derive(Debug, Deserialize)]
pub struct ListColumns {
    /// The board whose schema to list
    pub board_id: BoardId,
}

impl ListColumns {
    /// Create a new ListColumns command
    pub fn new(board_id: impl Into<BoardId>) -> Self {
        Self {
            board_id: board_id.into(),
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ListColumns {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        if !ctx.board_exists(&self.board_id).await {
            return Err(BoardError::BoardNotFound {
                id: self.board_id.to_string(),
            });
        }

        let columns = ctx.read_board_columns(&self.board_id).await?;

        let mut result = Vec::with_capacity(columns.len());
        for column in &columns {
            let mut entry = serde_json::to_value(column)?;
            entry["id"] = serde_json::json!(&column.id);
            result.push(entry);
        }
        Ok(Value::Array(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CreateBoard;
    use crate::column::AddColumn;
    use boardkit_fields::ColumnType;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_columns_in_order() {
        let temp = TempDir::new().unwrap();
        let ctx = BoardContext::new(temp.path().join(".boards"));

        let board = CreateBoard::new("Deals").execute(&ctx).await.unwrap();
        let board_id = BoardId::from_string(board["id"].as_str().unwrap());

        AddColumn::new(board_id.clone(), "Title", ColumnType::text())
            .execute(&ctx)
            .await
            .unwrap();
        AddColumn::new(board_id.clone(), "Amount", ColumnType::number())
            .execute(&ctx)
            .await
            .unwrap();

        let result = ListColumns::new(board_id).execute(&ctx).await.unwrap();
        let columns = result.as_array().unwrap();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0]["name"], "Title");
        assert_eq!(columns[1]["name"], "Amount");
    }

    #[tokio::test]
    async fn test_list_columns_unknown_board() {
        let temp = TempDir::new().unwrap();
        let ctx = BoardContext::new(temp.path().join(".boards"));

        let result = ListColumns::new(BoardId::new()).execute(&ctx).await;
        assert!(matches!(result, Err(BoardError::BoardNotFound { .. })));
    }
}
