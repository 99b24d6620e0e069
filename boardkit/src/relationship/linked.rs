//! ListLinkedItems command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use crate::types::{Item, ItemId, RelationshipId};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// List an item's counterpart items under one relationship.
///
/// Direction-aware: an item on the source board yields the targets it
/// points at, an item on the target board yields the sources pointing at
/// it. For self-relationships both directions contribute. Counterparts are
/// ordered by their board ordinal.
#[derive(Debug, Deserialize)]
pub struct ListLinkedItems {
    pub item_id: ItemId,
    pub relationship_id: RelationshipId,
}

impl ListLinkedItems {
    /// Create a new ListLinkedItems command
    pub fn new(item_id: impl Into<ItemId>, relationship_id: impl Into<RelationshipId>) -> Self {
        Self {
            item_id: item_id.into(),
            relationship_id: relationship_id.into(),
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ListLinkedItems {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let relationship = ctx.read_relationship(&self.relationship_id).await?;
        let item = ctx.read_item(&self.item_id).await?;
        let links = ctx.read_relationship_links(&self.relationship_id).await?;

        let mut counterpart_ids: Vec<ItemId> = Vec::new();
        if item.board_id == relationship.source_board_id {
            counterpart_ids.extend(
                links
                    .iter()
                    .filter(|link| link.source_item_id == self.item_id)
                    .map(|link| link.target_item_id.clone()),
            );
        }
        if item.board_id == relationship.target_board_id {
            counterpart_ids.extend(
                links
                    .iter()
                    .filter(|link| link.target_item_id == self.item_id)
                    .map(|link| link.source_item_id.clone()),
            );
        }
        counterpart_ids.sort();
        counterpart_ids.dedup();

        let mut counterparts: Vec<Item> = Vec::with_capacity(counterpart_ids.len());
        for id in &counterpart_ids {
            counterparts.push(ctx.read_item(id).await?);
        }
        counterparts.sort_by(|a, b| a.ordinal.cmp(&b.ordinal));

        let mut result = Vec::with_capacity(counterparts.len());
        for counterpart in &counterparts {
            let mut entry = serde_json::to_value(counterpart)?;
            entry["id"] = serde_json::json!(&counterpart.id);
            result.push(entry);
        }
        Ok(Value::Array(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CreateBoard;
    use crate::item::CreateItem;
    use crate::relationship::{CreateRelationship, LinkItems};
    use crate::types::{BoardId, RelationshipType};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_linked_items_both_directions() {
        let temp = TempDir::new().unwrap();
        let ctx = BoardContext::new(temp.path().join(".boards"));

        let deals = CreateBoard::new("Deals").execute(&ctx).await.unwrap();
        let contacts = CreateBoard::new("Contacts").execute(&ctx).await.unwrap();
        let deals_id = BoardId::from_string(deals["id"].as_str().unwrap());
        let contacts_id = BoardId::from_string(contacts["id"].as_str().unwrap());

        let deal = CreateItem::new(deals_id.clone()).execute(&ctx).await.unwrap();
        let alice = CreateItem::new(contacts_id.clone()).execute(&ctx).await.unwrap();
        let bob = CreateItem::new(contacts_id.clone()).execute(&ctx).await.unwrap();

        let rel = CreateRelationship::new(
            deals_id,
            contacts_id,
            RelationshipType::ManyToMany,
            "Contacts",
            "Deals",
        )
        .execute(&ctx)
        .await
        .unwrap();
        let rel_id = rel["id"].as_str().unwrap();

        for contact in [&alice, &bob] {
            LinkItems::new(
                rel_id,
                deal["id"].as_str().unwrap(),
                contact["id"].as_str().unwrap(),
            )
            .execute(&ctx)
            .await
            .unwrap();
        }

        // source side sees its targets, in board order
        let from_deal = ListLinkedItems::new(deal["id"].as_str().unwrap(), rel_id)
            .execute(&ctx)
            .await
            .unwrap();
        let ids: Vec<&str> = from_deal
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["id"].as_str().unwrap())
            .collect();
        assert_eq!(
            ids,
            vec![alice["id"].as_str().unwrap(), bob["id"].as_str().unwrap()]
        );

        // target side sees its sources
        let from_alice = ListLinkedItems::new(alice["id"].as_str().unwrap(), rel_id)
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(from_alice.as_array().unwrap().len(), 1);
        assert_eq!(from_alice[0]["id"], deal["id"]);
    }

    #[tokio::test]
    async fn test_linked_items_empty_when_unlinked() {
        let temp = TempDir::new().unwrap();
        let ctx = BoardContext::new(temp.path().join(".boards"));

        let board = CreateBoard::new("Deals").execute(&ctx).await.unwrap();
        let board_id = BoardId::from_string(board["id"].as_str().unwrap());
        let item = CreateItem::new(board_id.clone()).execute(&ctx).await.unwrap();

        let rel = CreateRelationship::new(
            board_id.clone(),
            board_id,
            RelationshipType::ManyToMany,
            "A",
            "B",
        )
        .execute(&ctx)
        .await
        .unwrap();

        let result = ListLinkedItems::new(
            item["id"].as_str().unwrap(),
            rel["id"].as_str().unwrap(),
        )
        .execute(&ctx)
        .await
        .unwrap();
        assert_eq!(result.as_array().unwrap().len(), 0);
    }
}
