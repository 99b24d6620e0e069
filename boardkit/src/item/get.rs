//! GetItem command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use crate::types::ItemId;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Get an item by ID
#[derive(Debug, Deserialize)]
pub struct GetItem {
    /// The item ID
    pub id: ItemId,
}

impl GetItem {
    /// Create a new GetItem command
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for GetItem {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let item = ctx.read_item(&self.id).await?;

        let mut result = serde_json::to_value(&item)?;
        result["id"] = serde_json::json!(&item.id);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CreateBoard;
    use crate::item::CreateItem;
    use crate::types::BoardId;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_get_item() {
        let temp = TempDir::new().unwrap();
        let ctx = BoardContext::new(temp.path().join(".boards"));

        let board = CreateBoard::new("Deals").execute(&ctx).await.unwrap();
        let created = CreateItem::new(BoardId::from_string(board["id"].as_str().unwrap()))
            .execute(&ctx)
            .await
            .unwrap();
        let id = created["id"].as_str().unwrap();

        let result = GetItem::new(id).execute(&ctx).await.unwrap();
        assert_eq!(result["id"], *id);
        assert_eq!(result["board_id"], board["id"]);
    }
}
