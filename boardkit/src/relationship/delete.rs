//! DeleteRelationship command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use crate::types::RelationshipId;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Delete a relationship definition and every link row under it
#[derive(Debug, Deserialize)]
pub struct DeleteRelationship {
    /// The relationship ID to delete
    pub id: RelationshipId,
}

impl DeleteRelationship {
    /// Create a new DeleteRelationship command
    pub fn new(id: impl Into<RelationshipId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for DeleteRelationship {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let relationship = ctx.read_relationship(&self.id).await?;

        let mut links_removed = 0usize;
        for link in ctx.read_relationship_links(&self.id).await? {
            ctx.delete_link_file(&link.id).await?;
            links_removed += 1;
        }

        ctx.delete_relationship_file(&self.id).await?;

        Ok(serde_json::json!({
            "id": relationship.id,
            "deleted": true,
            "links_removed": links_removed,
        }))
    }
}
