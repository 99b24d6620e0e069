//! ToggleAutomation command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use crate::types::AutomationId;
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

/// Activate or deactivate a rule.
///
/// Deactivated rules are retained with their logs but never matched.
#[derive(Debug, Deserialize)]
pub struct ToggleAutomation {
    /// The automation ID to toggle
    pub id: AutomationId,
    /// The new active state
    pub is_active: bool,
}

impl ToggleAutomation {
    /// Create a new ToggleAutomation command
    pub fn new(id: impl Into<AutomationId>, is_active: bool) -> Self {
        Self {
            id: id.into(),
            is_active,
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ToggleAutomation {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let mut automation = ctx.read_automation(&self.id).await?;
        automation.is_active = self.is_active;
        automation.updated_at = Utc::now();
        ctx.write_automation(&automation).await?;

        let mut result = serde_json::to_value(&automation)?;
        result["id"] = serde_json::json!(&automation.id);
        Ok(result)
    }
}
