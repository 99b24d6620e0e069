//! GetAutomation command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use crate::types::AutomationId;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Get an automation by ID
#[derive(Debug, Deserialize)]
pub struct GetAutomation {
    /// The automation ID
    pub id: AutomationId,
}

impl GetAutomation {
    /// Create a new GetAutomation command
    pub fn new(id: impl Into<AutomationId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for GetAutomation {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let automation = ctx.read_automation(&self.id).await?;

        let mut result = serde_json::to_value(&automation)?;
        result["id"] = serde_json::json!(&automation.id);
        Ok(result)
    }
}
