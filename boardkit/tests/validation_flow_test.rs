//! End-to-end schema validation through the item write path.

use boardkit::board::CreateBoard;
use boardkit::column::AddColumn;
use boardkit::item::{CreateItem, GetItem, ListItems, UpdateItem};
use boardkit::{BoardContext, BoardError, BoardId, ColumnType, Execute, FieldError};
use serde_json::json;
use tempfile::TempDir;

async fn tasks_board(ctx: &BoardContext) -> (BoardId, String, String) {
    let board = CreateBoard::new("Tasks").execute(ctx).await.unwrap();
    let board_id = BoardId::from_string(board["id"].as_str().unwrap());

    let title = AddColumn::new(board_id.clone(), "Title", ColumnType::text())
        .required()
        .execute(ctx)
        .await
        .unwrap();
    let state = AddColumn::new(
        board_id.clone(),
        "State",
        ColumnType::status(&["new", "done"]),
    )
    .execute(ctx)
    .await
    .unwrap();

    (
        board_id,
        title["id"].as_str().unwrap().to_string(),
        state["id"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn required_and_option_rules_guard_creation() {
    let temp = TempDir::new().unwrap();
    let ctx = BoardContext::new(temp.path().join(".boards"));
    let (board_id, title_id, state_id) = tasks_board(&ctx).await;

    // empty required title is missing, not merely invalid
    let result = CreateItem::new(board_id.clone())
        .with_value(title_id.as_str(), json!(""))
        .execute(&ctx)
        .await;
    match result {
        Err(BoardError::MissingRequiredField { column }) => assert_eq!(column, "Title"),
        other => panic!("expected MissingRequiredField, got {other:?}"),
    }

    // a state outside the options is invalid and nothing is written
    let result = CreateItem::new(board_id.clone())
        .with_value(title_id.as_str(), json!("X"))
        .with_value(state_id.as_str(), json!("archived"))
        .execute(&ctx)
        .await;
    match result {
        Err(BoardError::Field(FieldError::InvalidValue { column, message })) => {
            assert_eq!(column, "State");
            assert!(message.contains("archived"));
        }
        other => panic!("expected InvalidValue, got {other:?}"),
    }
    let listed = ListItems::new(board_id.clone()).execute(&ctx).await.unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 0);

    // a conforming item goes through
    let created = CreateItem::new(board_id)
        .with_value(title_id.as_str(), json!("X"))
        .with_value(state_id.as_str(), json!("new"))
        .execute(&ctx)
        .await
        .unwrap();
    assert_eq!(created["data"][state_id.as_str()], "new");
}

#[tokio::test]
async fn update_round_trip_preserves_untouched_fields() {
    let temp = TempDir::new().unwrap();
    let ctx = BoardContext::new(temp.path().join(".boards"));
    let (board_id, title_id, state_id) = tasks_board(&ctx).await;

    let created = CreateItem::new(board_id)
        .with_value(title_id.as_str(), json!("Call Acme"))
        .with_value(state_id.as_str(), json!("new"))
        .execute(&ctx)
        .await
        .unwrap();
    let item_id = created["id"].as_str().unwrap();

    UpdateItem::new(item_id)
        .set(state_id.as_str(), json!("done"))
        .execute(&ctx)
        .await
        .unwrap();

    let loaded = GetItem::new(item_id).execute(&ctx).await.unwrap();
    assert_eq!(loaded["data"][state_id.as_str()], "done");
    assert_eq!(loaded["data"][title_id.as_str()], "Call Acme");
}

#[tokio::test]
async fn schema_drift_tolerates_stale_values() {
    let temp = TempDir::new().unwrap();
    let ctx = BoardContext::new(temp.path().join(".boards"));
    let (board_id, title_id, state_id) = tasks_board(&ctx).await;

    let created = CreateItem::new(board_id)
        .with_value(title_id.as_str(), json!("Call Acme"))
        .with_value(state_id.as_str(), json!("new"))
        .execute(&ctx)
        .await
        .unwrap();
    let item_id = created["id"].as_str().unwrap();

    // the schema tightens after the fact
    boardkit::column::UpdateColumn::new(state_id.as_str())
        .with_type(ColumnType::status(&["done"]))
        .execute(&ctx)
        .await
        .unwrap();

    // updating an unrelated field does not re-validate the stale value
    UpdateItem::new(item_id)
        .set(title_id.as_str(), json!("Call Acme again"))
        .execute(&ctx)
        .await
        .unwrap();
    let loaded = GetItem::new(item_id).execute(&ctx).await.unwrap();
    assert_eq!(loaded["data"][state_id.as_str()], "new");

    // touching the drifted field itself does validate against the new rules
    let result = UpdateItem::new(item_id)
        .set(state_id.as_str(), json!("new"))
        .execute(&ctx)
        .await;
    assert!(matches!(result, Err(BoardError::Field(_))));
}
