//! LinkItems command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use crate::types::{ItemId, ItemRelationship, RelationshipId, RelationshipType};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Create one concrete link between two items under a relationship.
///
/// The cardinality check and the insert run under the store's exclusive
/// lock, so two concurrent calls cannot both pass the check on a
/// one_to_one relationship. Linking an already-linked identical pair
/// returns the existing row.
#[derive(Debug, Deserialize)]
pub struct LinkItems {
    pub relationship_id: RelationshipId,
    pub source_item_id: ItemId,
    pub target_item_id: ItemId,
}

impl LinkItems {
    /// Create a new LinkItems command
    pub fn new(
        relationship_id: impl Into<RelationshipId>,
        source_item_id: impl Into<ItemId>,
        target_item_id: impl Into<ItemId>,
    ) -> Self {
        Self {
            relationship_id: relationship_id.into(),
            source_item_id: source_item_id.into(),
            target_item_id: target_item_id.into(),
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for LinkItems {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        // Hold the lock across check and insert
        let _lock = ctx.lock().await?;

        let relationship = ctx.read_relationship(&self.relationship_id).await?;
        let source = ctx.read_item(&self.source_item_id).await?;
        let target = ctx.read_item(&self.target_item_id).await?;

        if source.board_id != relationship.source_board_id {
            return Err(BoardError::BoardMismatch {
                item_id: source.id.to_string(),
                expected: relationship.source_board_id.to_string(),
                actual: source.board_id.to_string(),
            });
        }
        if target.board_id != relationship.target_board_id {
            return Err(BoardError::BoardMismatch {
                item_id: target.id.to_string(),
                expected: relationship.target_board_id.to_string(),
                actual: target.board_id.to_string(),
            });
        }

        let links = ctx.read_relationship_links(&self.relationship_id).await?;

        // Identical pair already linked: return the existing row
        if let Some(existing) = links.iter().find(|link| {
            link.source_item_id == self.source_item_id
                && link.target_item_id == self.target_item_id
        }) {
            let mut result = serde_json::to_value(existing)?;
            result["id"] = serde_json::json!(&existing.id);
            return Ok(result);
        }

        match relationship.relationship_type {
            RelationshipType::OneToOne => {
                if let Some(taken) = links
                    .iter()
                    .find(|link| link.source_item_id == self.source_item_id)
                {
                    return Err(BoardError::CardinalityViolation {
                        relationship_id: self.relationship_id.to_string(),
                        side: "source",
                        item_id: self.source_item_id.to_string(),
                        existing_link_id: taken.id.to_string(),
                    });
                }
                if let Some(taken) = links
                    .iter()
                    .find(|link| link.target_item_id == self.target_item_id)
                {
                    return Err(BoardError::CardinalityViolation {
                        relationship_id: self.relationship_id.to_string(),
                        side: "target",
                        item_id: self.target_item_id.to_string(),
                        existing_link_id: taken.id.to_string(),
                    });
                }
            }
            RelationshipType::OneToMany => {
                // The target is the "one" side: many sources may point at it,
                // but it may only be pointed at once
                if let Some(taken) = links
                    .iter()
                    .find(|link| link.target_item_id == self.target_item_id)
                {
                    return Err(BoardError::CardinalityViolation {
                        relationship_id: self.relationship_id.to_string(),
                        side: "target",
                        item_id: self.target_item_id.to_string(),
                        existing_link_id: taken.id.to_string(),
                    });
                }
            }
            RelationshipType::ManyToMany => {}
        }

        let link = ItemRelationship::new(
            self.relationship_id.clone(),
            self.source_item_id.clone(),
            self.target_item_id.clone(),
        );
        ctx.write_link(&link).await?;

        let mut result = serde_json::to_value(&link)?;
        result["id"] = serde_json::json!(&link.id);
        Ok(result)
    }
}
