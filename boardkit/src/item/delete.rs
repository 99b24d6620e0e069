//! DeleteItem command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use crate::types::ItemId;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Delete an item.
///
/// Every link row referencing the item, on either side, is removed before
/// the item itself.
#[derive(Debug, Deserialize)]
pub struct DeleteItem {
    /// The item ID to delete
    pub id: ItemId,
}

impl DeleteItem {
    /// Create a new DeleteItem command
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for DeleteItem {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let item = ctx.read_item(&self.id).await?;

        let mut links_removed = 0usize;
        for link in ctx.read_item_links(&self.id).await? {
            ctx.delete_link_file(&link.id).await?;
            links_removed += 1;
        }

        ctx.delete_item_file(&self.id).await?;

        Ok(serde_json::json!({
            "id": item.id,
            "deleted": true,
            "links_removed": links_removed,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CreateBoard;
    use crate::item::{CreateItem, GetItem};
    use crate::relationship::{CreateRelationship, LinkItems};
    use crate::types::{BoardId, RelationshipType};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_delete_item_removes_links() {
        let temp = TempDir::new().unwrap();
        let ctx = BoardContext::new(temp.path().join(".boards"));

        let board = CreateBoard::new("Deals").execute(&ctx).await.unwrap();
        let board_id = BoardId::from_string(board["id"].as_str().unwrap());

        let left = CreateItem::new(board_id.clone()).execute(&ctx).await.unwrap();
        let right = CreateItem::new(board_id.clone()).execute(&ctx).await.unwrap();

        let relationship = CreateRelationship::new(
            board_id.clone(),
            board_id,
            RelationshipType::ManyToMany,
            "Related to",
            "Related from",
        )
        .execute(&ctx)
        .await
        .unwrap();

        LinkItems::new(
            relationship["id"].as_str().unwrap(),
            left["id"].as_str().unwrap(),
            right["id"].as_str().unwrap(),
        )
        .execute(&ctx)
        .await
        .unwrap();

        let result = DeleteItem::new(left["id"].as_str().unwrap())
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(result["deleted"], true);
        assert_eq!(result["links_removed"], 1);

        let lookup = GetItem::new(left["id"].as_str().unwrap()).execute(&ctx).await;
        assert!(matches!(lookup, Err(BoardError::ItemNotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_missing_item() {
        let temp = TempDir::new().unwrap();
        let ctx = BoardContext::new(temp.path().join(".boards"));

        let result = DeleteItem::new(ItemId::new()).execute(&ctx).await;
        assert!(matches!(result, Err(BoardError::ItemNotFound { .. })));
    }
}
