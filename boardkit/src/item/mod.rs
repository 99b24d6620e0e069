//! Item (record) commands.
//!
//! The single entry point for item mutation: every write validates against
//! the board's current schema, persists, then publishes lifecycle events.

mod create;
mod delete;
mod get;
mod list;
mod update;

pub use create::CreateItem;
pub use delete::DeleteItem;
pub use get::GetItem;
pub use list::ListItems;
pub use update::UpdateItem;

use crate::types::{Column, ColumnId};
use crate::error::{BoardError, Result};
use serde_json::Value;
use std::collections::BTreeMap;

/// True when a value counts as present for a required column: non-null,
/// non-empty string, non-empty list.
pub(crate) fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(entries)) => !entries.is_empty(),
        Some(_) => true,
    }
}

/// Enforce required columns over a data map, naming the first offender.
pub(crate) fn check_required(
    columns: &[Column],
    data: &BTreeMap<ColumnId, Value>,
) -> Result<()> {
    for column in columns.iter().filter(|column| column.is_required) {
        if !is_present(data.get(&column.id)) {
            return Err(BoardError::missing_required(&column.name));
        }
    }
    Ok(())
}
