//! Relationship types: board-level definitions and item-level link rows

use super::ids::{BoardId, ItemId, LinkId, RelationshipId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Multiplicity constraint governing how many links an item may participate
/// in under one relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    /// Each side appears in at most one link
    OneToOne,
    /// The target is the "one" side; many sources may point at it
    OneToMany,
    /// Unrestricted
    ManyToMany,
}

/// A declared typed link between two boards.
///
/// Field names are the labels the link is surfaced under on each side; they
/// stay unique per board across relationships. Self-links (source board ==
/// target board) are permitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(skip)]
    pub id: RelationshipId,
    pub source_board_id: BoardId,
    pub target_board_id: BoardId,
    pub relationship_type: RelationshipType,
    pub source_field_name: String,
    pub target_field_name: String,
    pub created_at: DateTime<Utc>,
}

impl Relationship {
    /// Declare a new relationship between two boards
    pub fn new(
        source_board_id: BoardId,
        target_board_id: BoardId,
        relationship_type: RelationshipType,
        source_field_name: impl Into<String>,
        target_field_name: impl Into<String>,
    ) -> Self {
        Self {
            id: RelationshipId::new(),
            source_board_id,
            target_board_id,
            relationship_type,
            source_field_name: source_field_name.into(),
            target_field_name: target_field_name.into(),
            created_at: Utc::now(),
        }
    }
}

/// One concrete link between two items under a relationship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRelationship {
    #[serde(skip)]
    pub id: LinkId,
    pub relationship_id: RelationshipId,
    pub source_item_id: ItemId,
    pub target_item_id: ItemId,
    pub created_at: DateTime<Utc>,
}

impl ItemRelationship {
    /// Link two items under a relationship
    pub fn new(
        relationship_id: RelationshipId,
        source_item_id: ItemId,
        target_item_id: ItemId,
    ) -> Self {
        Self {
            id: LinkId::new(),
            relationship_id,
            source_item_id,
            target_item_id,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_type_serde() {
        let json = serde_json::to_string(&RelationshipType::OneToMany).unwrap();
        assert_eq!(json, "\"one_to_many\"");
        let parsed: RelationshipType = serde_json::from_str("\"many_to_many\"").unwrap();
        assert_eq!(parsed, RelationshipType::ManyToMany);
    }

    #[test]
    fn test_self_link_permitted() {
        let board = BoardId::new();
        let rel = Relationship::new(
            board.clone(),
            board.clone(),
            RelationshipType::ManyToMany,
            "Parent of",
            "Child of",
        );
        assert_eq!(rel.source_board_id, rel.target_board_id);
    }

    #[test]
    fn test_link_serialization_skips_id() {
        let link = ItemRelationship::new(RelationshipId::new(), ItemId::new(), ItemId::new());
        let json = serde_json::to_string(&link).unwrap();
        assert!(!json.contains(link.id.as_str()));
        assert!(json.contains(link.source_item_id.as_str()));
    }
}
