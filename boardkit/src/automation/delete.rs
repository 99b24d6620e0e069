//! DeleteAutomation command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use crate::types::AutomationId;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Delete a rule and its execution log
#[derive(Debug, Deserialize)]
pub struct DeleteAutomation {
    /// The automation ID to delete
    pub id: AutomationId,
}

impl DeleteAutomation {
    /// Create a new DeleteAutomation command
    pub fn new(id: impl Into<AutomationId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for DeleteAutomation {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let automation = ctx.read_automation(&self.id).await?;
        ctx.delete_automation_file(&self.id).await?;

        Ok(serde_json::json!({
            "id": automation.id,
            "deleted": true,
        }))
    }
}
