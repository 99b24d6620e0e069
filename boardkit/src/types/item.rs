//! Item records

use super::ids::{BoardId, ColumnId, ItemId};
use super::ordinal::Ordinal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One record belonging to a board.
///
/// `data` maps column ids to values whose shape depends on the column type.
/// Items are validated against the schema current at write time only; keys
/// for columns that have since been deleted or retyped are tolerated and
/// carried as-is, never purged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(skip)]
    pub id: ItemId,
    pub board_id: BoardId,
    #[serde(default)]
    pub data: BTreeMap<ColumnId, Value>,
    pub ordinal: Ordinal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Create a new item with validated data and a position
    pub fn new(board_id: BoardId, data: BTreeMap<ColumnId, Value>, ordinal: Ordinal) -> Self {
        let now = Utc::now();
        Self {
            id: ItemId::new(),
            board_id,
            data,
            ordinal,
            created_at: now,
            updated_at: now,
        }
    }

    /// The value stored for a column, if any
    pub fn value(&self, column_id: &ColumnId) -> Option<&Value> {
        self.data.get(column_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_creation() {
        let board_id = BoardId::new();
        let column_id = ColumnId::new();
        let mut data = BTreeMap::new();
        data.insert(column_id.clone(), json!("hello"));

        let item = Item::new(board_id.clone(), data, Ordinal::first());
        assert_eq!(item.board_id, board_id);
        assert_eq!(item.value(&column_id), Some(&json!("hello")));
        assert!(item.value(&ColumnId::new()).is_none());
    }

    #[test]
    fn test_item_round_trip_preserves_unknown_keys() {
        let mut data = BTreeMap::new();
        data.insert(ColumnId::from_string("gone-column"), json!(42));
        let item = Item::new(BoardId::new(), data, Ordinal::first());

        let json = serde_json::to_string_pretty(&item).unwrap();
        let parsed: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(
            parsed.value(&ColumnId::from_string("gone-column")),
            Some(&json!(42))
        );
    }
}
