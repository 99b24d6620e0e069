//! Per-user board view preferences

use super::ids::{BoardId, ColumnId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// View state for one (user, board) pair.
///
/// Explicit, store-backed state rather than ambient process globals. Purely
/// presentational; nothing here participates in validation or automation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardViewPreference {
    pub user_id: UserId,
    pub board_id: BoardId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_column: Option<ColumnId>,
    #[serde(default)]
    pub sort_descending: bool,
    #[serde(default)]
    pub hidden_columns: Vec<ColumnId>,
    #[serde(default)]
    pub column_widths: BTreeMap<ColumnId, u32>,
}

impl BoardViewPreference {
    /// Default view state for a (user, board) pair
    pub fn new(user_id: UserId, board_id: BoardId) -> Self {
        Self {
            user_id,
            board_id,
            sort_column: None,
            sort_descending: false,
            hidden_columns: Vec::new(),
            column_widths: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let pref = BoardViewPreference::new("alice".into(), BoardId::new());
        assert!(pref.sort_column.is_none());
        assert!(!pref.sort_descending);
        assert!(pref.hidden_columns.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let mut pref = BoardViewPreference::new("alice".into(), BoardId::new());
        pref.sort_column = Some(ColumnId::from_string("due"));
        pref.column_widths.insert("due".into(), 140);

        let json = serde_json::to_string(&pref).unwrap();
        let parsed: BoardViewPreference = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, pref);
    }
}
