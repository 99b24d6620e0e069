//! SaveViewPreference command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use crate::types::BoardViewPreference;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Save one user's view state for one board, replacing any previous state
#[derive(Debug, Deserialize)]
pub struct SaveViewPreference {
    #[serde(flatten)]
    pub preference: BoardViewPreference,
}

impl SaveViewPreference {
    /// Create a new SaveViewPreference command
    pub fn new(preference: BoardViewPreference) -> Self {
        Self { preference }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for SaveViewPreference {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        if !ctx.board_exists(&self.preference.board_id).await {
            return Err(BoardError::BoardNotFound {
                id: self.preference.board_id.to_string(),
            });
        }

        ctx.write_view_preference(&self.preference).await?;
        Ok(serde_json::to_value(&self.preference)?)
    }
}
