//! Board deletion cascades to everything the board owns.

use boardkit::automation::{AddAutomation, GetAutomation};
use boardkit::board::{CreateBoard, DeleteBoard, GetBoard};
use boardkit::column::{AddColumn, GetColumn};
use boardkit::item::{CreateItem, GetItem};
use boardkit::relationship::{CreateRelationship, LinkItems, ListLinkedItems};
use boardkit::{
    Action, BoardContext, BoardError, BoardId, ColumnType, Execute, RelationshipType, Trigger,
};
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn deleting_a_board_removes_items_relationships_and_rules() {
    let temp = TempDir::new().unwrap();
    let ctx = BoardContext::new(temp.path().join(".boards"));

    let tasks = CreateBoard::new("Tasks").execute(&ctx).await.unwrap();
    let tasks_id = BoardId::from_string(tasks["id"].as_str().unwrap());
    let people = CreateBoard::new("People").execute(&ctx).await.unwrap();
    let people_id = BoardId::from_string(people["id"].as_str().unwrap());

    let title = AddColumn::new(tasks_id.clone(), "Title", ColumnType::text())
        .execute(&ctx)
        .await
        .unwrap();
    let title_id = title["id"].as_str().unwrap();

    let mut item_ids = Vec::new();
    for index in 0..3 {
        let item = CreateItem::new(tasks_id.clone())
            .with_value(title_id, json!(format!("task {index}")))
            .execute(&ctx)
            .await
            .unwrap();
        item_ids.push(item["id"].as_str().unwrap().to_string());
    }
    let owner = CreateItem::new(people_id.clone()).execute(&ctx).await.unwrap();

    let relationship = CreateRelationship::new(
        tasks_id.clone(),
        people_id.clone(),
        RelationshipType::OneToMany,
        "Owner",
        "Tasks",
    )
    .execute(&ctx)
    .await
    .unwrap();
    let relationship_id = relationship["id"].as_str().unwrap();
    LinkItems::new(relationship_id, item_ids[0].as_str(), owner["id"].as_str().unwrap())
        .execute(&ctx)
        .await
        .unwrap();

    let automation = AddAutomation::new(
        tasks_id.clone(),
        "notify",
        Trigger::RecordCreated,
        Action::SendNotification {
            message: "new task".into(),
            channel: None,
        },
    )
    .execute(&ctx)
    .await
    .unwrap();
    let automation_id = automation["id"].as_str().unwrap();

    let result = DeleteBoard::new(tasks_id.clone()).execute(&ctx).await.unwrap();
    assert_eq!(result["items_deleted"], 3);
    assert_eq!(result["relationships_deleted"], 1);
    assert_eq!(result["links_deleted"], 1);

    // every owned entity is gone
    assert!(matches!(
        GetBoard::new(tasks_id).execute(&ctx).await,
        Err(BoardError::BoardNotFound { .. })
    ));
    for item_id in &item_ids {
        assert!(matches!(
            GetItem::new(item_id.as_str()).execute(&ctx).await,
            Err(BoardError::ItemNotFound { .. })
        ));
    }
    assert!(matches!(
        GetColumn::new(title_id).execute(&ctx).await,
        Err(BoardError::ColumnNotFound { .. })
    ));
    assert!(matches!(
        GetAutomation::new(automation_id).execute(&ctx).await,
        Err(BoardError::AutomationNotFound { .. })
    ));
    assert!(matches!(
        ListLinkedItems::new(owner["id"].as_str().unwrap(), relationship_id)
            .execute(&ctx)
            .await,
        Err(BoardError::RelationshipNotFound { .. })
    ));

    // the other board is untouched
    assert!(GetBoard::new(people_id).execute(&ctx).await.is_ok());
    assert!(GetItem::new(owner["id"].as_str().unwrap())
        .execute(&ctx)
        .await
        .is_ok());
}

#[tokio::test]
async fn incoming_relationships_cascade_too() {
    let temp = TempDir::new().unwrap();
    let ctx = BoardContext::new(temp.path().join(".boards"));

    let tasks = CreateBoard::new("Tasks").execute(&ctx).await.unwrap();
    let tasks_id = BoardId::from_string(tasks["id"].as_str().unwrap());
    let people = CreateBoard::new("People").execute(&ctx).await.unwrap();
    let people_id = BoardId::from_string(people["id"].as_str().unwrap());

    // relationship points INTO the board being deleted
    CreateRelationship::new(
        people_id,
        tasks_id.clone(),
        RelationshipType::ManyToMany,
        "Works on",
        "Worked on by",
    )
    .execute(&ctx)
    .await
    .unwrap();

    let result = DeleteBoard::new(tasks_id).execute(&ctx).await.unwrap();
    assert_eq!(result["relationships_deleted"], 1);
}
