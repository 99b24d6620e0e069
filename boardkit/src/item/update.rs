//! UpdateItem command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::events::{EventKind, RecordEvent};
use crate::exec::Execute;
use crate::types::{ColumnId, ItemId};
use async_trait::async_trait;
use boardkit_fields::validate_value;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Update an item's data.
///
/// Only the provided keys are validated; untouched fields are left as they
/// are even if their column's rules have tightened since they were written.
/// A null value clears the key.
///
/// Publishes one `record_updated` event with before/after snapshots, plus
/// one `field_changed` event per provided column whose value actually
/// differs, all strictly after the persistence write.
#[derive(Debug, Deserialize)]
pub struct UpdateItem {
    /// The item ID to update
    pub id: ItemId,
    /// Column values to merge over the existing data, keyed by column id
    #[serde(default)]
    pub data: BTreeMap<ColumnId, Value>,
    /// Set on mutations caused by automation actions; such events are
    /// skipped by the automation engine
    #[serde(skip)]
    pub system_originated: bool,
    /// Deliver events on a background task instead of before returning
    #[serde(skip)]
    pub detached_events: bool,
}

impl UpdateItem {
    /// Create a new UpdateItem command
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            data: BTreeMap::new(),
            system_originated: false,
            detached_events: false,
        }
    }

    /// Set one column value (null clears the key)
    pub fn set(mut self, column_id: impl Into<ColumnId>, value: Value) -> Self {
        self.data.insert(column_id.into(), value);
        self
    }

    /// Set the full partial-data map
    pub fn with_data(mut self, data: BTreeMap<ColumnId, Value>) -> Self {
        self.data = data;
        self
    }

    /// Mark as caused by an automation action
    pub fn system_originated(mut self) -> Self {
        self.system_originated = true;
        self
    }

    /// Request fire-and-forget event delivery
    pub fn with_detached_events(mut self) -> Self {
        self.detached_events = true;
        self
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for UpdateItem {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let before = ctx.read_item(&self.id).await?;
        let columns = ctx.read_board_columns(&before.board_id).await?;

        let mut after = before.clone();
        for (column_id, value) in &self.data {
            if value.is_null() {
                after.data.remove(column_id);
                continue;
            }
            let normalized = match columns.iter().find(|column| &column.id == column_id) {
                Some(column) => validate_value(&column.name, &column.column_type, value)?,
                None => value.clone(),
            };
            after.data.insert(column_id.clone(), normalized);
        }
        after.updated_at = Utc::now();

        ctx.write_item(&after).await?;

        // Events strictly after the persistence write: one record_updated,
        // then one field_changed per column whose value actually differs
        let changed: Vec<ColumnId> = self
            .data
            .keys()
            .filter(|column_id| before.data.get(*column_id) != after.data.get(*column_id))
            .cloned()
            .collect();

        let mut events = vec![RecordEvent::new(
            before.board_id.clone(),
            EventKind::Updated {
                before: before.clone(),
                after: after.clone(),
            },
        )];
        for column_id in changed {
            events.push(RecordEvent::new(
                before.board_id.clone(),
                EventKind::FieldChanged {
                    column_id,
                    before: before.clone(),
                    after: after.clone(),
                },
            ));
        }

        for mut event in events {
            if self.system_originated {
                event = event.system();
            }
            if self.detached_events {
                ctx.publish_detached(event);
            } else {
                ctx.publish(event).await;
            }
        }

        let mut result = serde_json::to_value(&after)?;
        result["id"] = serde_json::json!(&after.id);
        Ok(result)
    }
}
