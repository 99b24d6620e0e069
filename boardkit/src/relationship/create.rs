//! CreateRelationship command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use crate::types::{BoardId, Relationship, RelationshipType};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Declare a typed link between two boards.
///
/// The field names label the link on each side and stay unique per board
/// across all relationships, so the presentation layer never shows two
/// relationship fields with the same name. Self-links are permitted.
#[derive(Debug, Deserialize)]
pub struct CreateRelationship {
    pub source_board_id: BoardId,
    pub target_board_id: BoardId,
    pub relationship_type: RelationshipType,
    /// Label surfaced on the source board
    pub source_field_name: String,
    /// Label surfaced on the target board
    pub target_field_name: String,
}

impl CreateRelationship {
    /// Create a new CreateRelationship command
    pub fn new(
        source_board_id: impl Into<BoardId>,
        target_board_id: impl Into<BoardId>,
        relationship_type: RelationshipType,
        source_field_name: impl Into<String>,
        target_field_name: impl Into<String>,
    ) -> Self {
        Self {
            source_board_id: source_board_id.into(),
            target_board_id: target_board_id.into(),
            relationship_type,
            source_field_name: source_field_name.into(),
            target_field_name: target_field_name.into(),
        }
    }
}

/// The relationship field names an existing relationship claims on `board_id`
fn claimed_names<'a>(relationship: &'a Relationship, board_id: &BoardId) -> Vec<&'a str> {
    let mut names = Vec::new();
    if &relationship.source_board_id == board_id {
        names.push(relationship.source_field_name.as_str());
    }
    if &relationship.target_board_id == board_id {
        names.push(relationship.target_field_name.as_str());
    }
    names
}

#[async_trait]
impl Execute<BoardContext, BoardError> for CreateRelationship {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        for board_id in [&self.source_board_id, &self.target_board_id] {
            if !ctx.board_exists(board_id).await {
                return Err(BoardError::BoardNotFound {
                    id: board_id.to_string(),
                });
            }
        }

        // A self-link with identical labels would be ambiguous on its own
        if self.source_board_id == self.target_board_id
            && self.source_field_name == self.target_field_name
        {
            return Err(BoardError::DuplicateFieldName {
                board_id: self.source_board_id.to_string(),
                name: self.source_field_name.clone(),
            });
        }

        let existing = ctx.read_all_relationships().await?;
        for relationship in &existing {
            if claimed_names(relationship, &self.source_board_id)
                .contains(&self.source_field_name.as_str())
            {
                return Err(BoardError::DuplicateFieldName {
                    board_id: self.source_board_id.to_string(),
                    name: self.source_field_name.clone(),
                });
            }
            if claimed_names(relationship, &self.target_board_id)
                .contains(&self.target_field_name.as_str())
            {
                return Err(BoardError::DuplicateFieldName {
                    board_id: self.target_board_id.to_string(),
                    name: self.target_field_name.clone(),
                });
            }
        }

        let relationship = Relationship::new(
            self.source_board_id.clone(),
            self.target_board_id.clone(),
            self.relationship_type,
            &self.source_field_name,
            &self.target_field_name,
        );
        ctx.write_relationship(&relationship).await?;

        let mut result = serde_json::to_value(&relationship)?;
        result["id"] = serde_json::json!(&relationship.id);
        Ok(result)
    }
}
