//! GetViewPreference command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use crate::types::{BoardId, BoardViewPreference, UserId};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Get one user's view state for one board.
///
/// Returns the default view state when the user has never saved one.
#[derive(Debug, Deserialize)]
pub struct GetViewPreference {
    pub user_id: UserId,
    pub board_id: BoardId,
}

impl GetViewPreference {
    /// Create a new GetViewPreference command
    pub fn new(user_id: impl Into<UserId>, board_id: impl Into<BoardId>) -> Self {
        Self {
            user_id: user_id.into(),
            board_id: board_id.into(),
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for GetViewPreference {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        if !ctx.board_exists(&self.board_id).await {
            return Err(BoardError::BoardNotFound {
                id: self.board_id.to_string(),
            });
        }

        let preference = ctx
            .read_view_preference(&self.user_id, &self.board_id)
            .await?
            .unwrap_or_else(|| {
                BoardViewPreference::new(self.user_id.clone(), self.board_id.clone())
            });
        Ok(serde_json::to_value(&preference)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CreateBoard;
    use crate::preference::SaveViewPreference;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_get_returns_default_when_unsaved() {
        let temp = TempDir::new().unwrap();
        let ctx = BoardContext::new(temp.path().join(".boards"));

        let board = CreateBoard::new("Deals").execute(&ctx).await.unwrap();
        let board_id = board["id"].as_str().unwrap();

        let result = GetViewPreference::new("alice", board_id)
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(result["user_id"], "alice");
        assert_eq!(result["sort_descending"], false);
    }

    #[tokio::test]
    async fn test_get_returns_saved_state() {
        let temp = TempDir::new().unwrap();
        let ctx = BoardContext::new(temp.path().join(".boards"));

        let board = CreateBoard::new("Deals").execute(&ctx).await.unwrap();
        let board_id = BoardId::from_string(board["id"].as_str().unwrap());

        let mut preference = BoardViewPreference::new("alice".into(), board_id.clone());
        preference.hidden_columns.push("c1".into());
        SaveViewPreference::new(preference)
            .execute(&ctx)
            .await
            .unwrap();

        let result = GetViewPreference::new("alice", board_id)
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(result["hidden_columns"][0], "c1");
    }
}
