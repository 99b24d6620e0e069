//! GetAutomationLogs command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use crate::types::AutomationId;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Read an automation's execution log, newest first
#[derive(Debug, Deserialize)]
pub struct GetAutomationLogs {
    /// The automation whose log to read
    pub automation_id: AutomationId,
    /// Maximum number of rows to return
    pub limit: Option<usize>,
}

impl GetAutomationLogs {
    /// Create a new GetAutomationLogs command
    pub fn new(automation_id: impl Into<AutomationId>) -> Self {
        Self {
            automation_id: automation_id.into(),
            limit: None,
        }
    }

    /// Limit the number of rows returned
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for GetAutomationLogs {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        // Reject unknown automations; an empty log on a known one is fine
        ctx.read_automation(&self.automation_id).await?;

        let logs = ctx
            .read_automation_logs(&self.automation_id, self.limit)
            .await?;
        Ok(serde_json::to_value(&logs)?)
    }
}
