//! CreateItem command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::events::{EventKind, RecordEvent};
use crate::exec::Execute;
use crate::item::check_required;
use crate::types::{BoardId, ColumnId, Item, Ordinal};
use async_trait::async_trait;
use boardkit_fields::validate_value;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Create a new item on a board.
///
/// Every required column must carry a usable value. Data keys that match a
/// column of the board are validated and normalized against its type; keys
/// for unknown columns pass through untouched (schema drift is tolerated,
/// items are validated against the schema current at write time only).
///
/// Publishes one `record_created` event after the write succeeds.
#[derive(Debug, Deserialize)]
pub struct CreateItem {
    /// The owning board
    pub board_id: BoardId,
    /// Column values, keyed by column id
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

impl CreateItem {
    /// Create a new CreateItem command
    pub fn new(board_id: impl Into<BoardId>) -> Self {
        Self {
            board_id: board_id.into(),
            data: BTreeMap::new(),
            system_originated: false,
            detached_events: false,
        }
    }

    /// Set the full data map
    pub fn with_data(mut self, data: BTreeMap<ColumnId, Value>) -> Self {
        self.data = data;
        self
    }

    /// Set one column value
    pub fn with_value(mut self, column_id: impl Into<ColumnId>, value: Value) -> Self {
        self.data.insert(column_id.into(), value);
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
impl Execute<BoardContext, BoardError> for CreateItem {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        if !ctx.board_exists(&self.board_id).await {
            return Err(BoardError::BoardNotFound {
                id: self.board_id.to_string(),
            });
        }

        let columns = ctx.read_board_columns(&self.board_id).await?;
        check_required(&columns, &self.data)?;

        let mut data = BTreeMap::new();
        for (column_id, value) in &self.data {
            if value.is_null() {
                continue;
            }
            let normalized = match columns.iter().find(|column| &column.id == column_id) {
                Some(column) => validate_value(&column.name, &column.column_type, value)?,
                None => value.clone(),
            };
            data.insert(column_id.clone(), normalized);
        }

        // Append after the board's current last item
        let items = ctx.read_board_items(&self.board_id).await?;
        let ordinal = match items.last() {
            Some(last) => Ordinal::after(&last.ordinal),
            None => Ordinal::first(),
        };

        let item = Item::new(self.board_id.clone(), data, ordinal);
        ctx.write_item(&item).await?;

        // Event strictly after the persistence write
        let mut event = RecordEvent::new(
            self.board_id.clone(),
            EventKind::Created { item: item.clone() },
        );
        if self.system_originated {
            event = event.system();
        }
        if self.detached_events {
            ctx.publish_detached(event);
        } else {
            ctx.publish(event).await;
        }

        let mut result = serde_json::to_value(&item)?;
        result["id"] = serde_json::json!(&item.id);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CreateBoard;
    use crate::column::AddColumn;
    use boardkit_fields::{ColumnType, FieldError};
    use serde_json::json;
    use tempfile::TempDir;

    async fn setup() -> (TempDir, BoardContext, BoardId) {
        let temp = TempDir::new().unwrap();
        let ctx = BoardContext::new(temp.path().join(".boards"));
        let board = CreateBoard::new("Tasks").execute(&ctx).await.unwrap();
        let board_id = BoardId::from_string(board["id"].as_str().unwrap());
        (temp, ctx, board_id)
    }

    #[tokio::test]
    async fn test_create_item_with_validated_data() {
        let (_temp, ctx, board_id) = setup().await;

        let title = AddColumn::new(board_id.clone(), "Title", ColumnType::text())
            .required()
            .execute(&ctx)
            .await
            .unwrap();
        let title_id = title["id"].as_str().unwrap();

        let result = CreateItem::new(board_id)
            .with_value(title_id, json!("Call Acme"))
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(result["data"][title_id], "Call Acme");
        assert_eq!(result["id"].as_str().unwrap().len(), 26);
    }

    #[tokio::test]
    async fn test_missing_required_field_names_column() {
        let (_temp, ctx, board_id) = setup().await;

        AddColumn::new(board_id.clone(), "Title", ColumnType::text())
            .required()
            .execute(&ctx)
            .await
            .unwrap();

        let result = CreateItem::new(board_id).execute(&ctx).await;
        match result {
            Err(BoardError::MissingRequiredField { column }) => assert_eq!(column, "Title"),
            other => panic!("expected MissingRequiredField, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_string_counts_as_missing() {
        let (_temp, ctx, board_id) = setup().await;

        let title = AddColumn::new(board_id.clone(), "Title", ColumnType::text())
            .required()
            .execute(&ctx)
            .await
            .unwrap();

        let result = CreateItem::new(board_id)
            .with_value(title["id"].as_str().unwrap(), json!(""))
            .execute(&ctx)
            .await;
        assert!(matches!(
            result,
            Err(BoardError::MissingRequiredField { .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_option_rejected() {
        let (_temp, ctx, board_id) = setup().await;

        let state = AddColumn::new(
            board_id.clone(),
            "State",
            ColumnType::status(&["new", "done"]),
        )
        .execute(&ctx)
        .await
        .unwrap();

        let result = CreateItem::new(board_id)
            .with_value(state["id"].as_str().unwrap(), json!("archived"))
            .execute(&ctx)
            .await;
        assert!(matches!(
            result,
            Err(BoardError::Field(FieldError::InvalidValue { .. }))
        ));
    }

    #[tokio::test]
    async fn test_unknown_keys_pass_through() {
        let (_temp, ctx, board_id) = setup().await;

        let result = CreateItem::new(board_id)
            .with_value("column-that-never-existed", json!({"free": "form"}))
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(result["data"]["column-that-never-existed"]["free"], "form");
    }

    #[tokio::test]
    async fn test_items_append_in_order() {
        let (_temp, ctx, board_id) = setup().await;

        let first = CreateItem::new(board_id.clone()).execute(&ctx).await.unwrap();
        let second = CreateItem::new(board_id).execute(&ctx).await.unwrap();
        assert!(second["ordinal"].as_str().unwrap() > first["ordinal"].as_str().unwrap());
    }

    #[tokio::test]
    async fn test_create_item_unknown_board() {
        let temp = TempDir::new().unwrap();
        let ctx = BoardContext::new(temp.path().join(".boards"));

        let result = CreateItem::new(BoardId::new()).execute(&ctx).await;
        assert!(matches!(result, Err(BoardError::BoardNotFound { .. })));
    }
}
