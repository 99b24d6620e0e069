//! UpdateAutomation command

use crate::automation::add::check_trigger;
use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use crate::types::{Action, AutomationId, Condition, Trigger};
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

/// Update an automation rule
#[derive(Debug, Deserialize)]
pub struct UpdateAutomation {
    /// The automation ID to update
    pub id: AutomationId,
    /// New name
    pub name: Option<String>,
    /// New description (None = don't change, Some(None) = clear)
    pub description: Option<Option<String>>,
    /// New trigger
    pub trigger: Option<Trigger>,
    /// New condition (None = don't change, Some(None) = unconditional)
    pub condition: Option<Option<Condition>>,
    /// New action
    pub action: Option<Action>,
}

impl UpdateAutomation {
    /// Create a new UpdateAutomation command
    pub fn new(id: impl Into<AutomationId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            description: None,
            trigger: None,
            condition: None,
            action: None,
        }
    }

    /// Set the name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the trigger
    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    /// Replace or clear the condition
    pub fn with_condition(mut self, condition: Option<Condition>) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Replace the action
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for UpdateAutomation {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let mut automation = ctx.read_automation(&self.id).await?;

        if let Some(name) = &self.name {
            automation.name = name.clone();
        }
        if let Some(description) = &self.description {
            automation.description = description.clone();
        }
        if let Some(trigger) = &self.trigger {
            let columns = ctx.read_board_columns(&automation.board_id).await?;
            check_trigger(trigger, &columns)?;
            automation.trigger = trigger.clone();
        }
        if let Some(condition) = &self.condition {
            automation.condition = condition.clone();
        }
        if let Some(action) = &self.action {
            automation.action = action.clone();
        }
        automation.updated_at = Utc::now();

        ctx.write_automation(&automation).await?;

        let mut result = serde_json::to_value(&automation)?;
        result["id"] = serde_json::json!(&automation.id);
        Ok(result)
    }
}
