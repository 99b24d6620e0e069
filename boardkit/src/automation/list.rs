//! ListAutomations command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use crate::types::BoardId;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// List a board's automations
#[derive(Debug, Deserialize)]
pub struct ListAutomations {
    /// The board whose rules to list
    pub board_id: BoardId,
}

impl ListAutomations {
    /// Create a new ListAutomations command
    pub fn new(board_id: impl Into<BoardId>) -> Self {
        Self {
            board_id: board_id.into(),
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ListAutomations {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        if !ctx.board_exists(&self.board_id).await {
            return Err(BoardError::BoardNotFound {
                id: self.board_id.to_string(),
            });
        }

        let mut automations = ctx.read_board_automations(&self.board_id).await?;
        automations.sort_by(|a, b| a.name.cmp(&b.name));

        let mut result = Vec::with_capacity(automations.len());
        for automation in &automations {
            let mut entry = serde_json::to_value(automation)?;
            entry["id"] = serde_json::json!(&automation.id);
            result.push(entry);
        }
        Ok(Value::Array(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automation::AddAutomation;
    use crate::board::CreateBoard;
    use crate::types::{Action, Trigger};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_list_automations_for_board_only() {
        let temp = TempDir::new().unwrap();
        let ctx = BoardContext::new(temp.path().join(".boards"));

        let tasks = CreateBoard::new("Tasks").execute(&ctx).await.unwrap();
        let deals = CreateBoard::new("Deals").execute(&ctx).await.unwrap();
        let tasks_id = BoardId::from_string(tasks["id"].as_str().unwrap());
        let deals_id = BoardId::from_string(deals["id"].as_str().unwrap());

        for (board, name) in [(&tasks_id, "a"), (&tasks_id, "b"), (&deals_id, "c")] {
            AddAutomation::new(
                board.clone(),
                name,
                Trigger::RecordCreated,
                Action::CreateTask {
                    title: "t".into(),
                    notes: None,
                },
            )
            .execute(&ctx)
            .await
            .unwrap();
        }

        let result = ListAutomations::new(tasks_id).execute(&ctx).await.unwrap();
        let rules = result.as_array().unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0]["name"], "a");
        assert_eq!(rules[1]["name"], "b");
    }
}
