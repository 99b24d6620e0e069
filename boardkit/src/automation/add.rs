//! AddAutomation command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use crate::types::{Action, Automation, BoardId, Column, Condition, Trigger};
use async_trait::async_trait;
use boardkit_fields::{ColumnType, FieldError};
use serde::Deserialize;
use serde_json::Value;

/// Add a reactive rule to a board
#[derive(Debug, Deserialize)]
pub struct AddAutomation {
    /// The board the rule is scoped to
    pub board_id: BoardId,
    /// Rule name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// What the rule reacts to
    pub trigger: Trigger,
    /// Optional predicate over the post-event item snapshot
    pub condition: Option<Condition>,
    /// What the rule does
    pub action: Action,
}

impl AddAutomation {
    /// Create a new AddAutomation command
    pub fn new(
        board_id: impl Into<BoardId>,
        name: impl Into<String>,
        trigger: Trigger,
        action: Action,
    ) -> Self {
        Self {
            board_id: board_id.into(),
            name: name.into(),
            description: None,
            trigger,
            condition: None,
            action,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Guard the rule with a condition
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// Trigger columns must exist on the rule's own board; a date trigger must
/// additionally point at a date column.
pub(crate) fn check_trigger(trigger: &Trigger, columns: &[Column]) -> Result<()> {
    match trigger {
        Trigger::RecordCreated | Trigger::RecordUpdated => Ok(()),
        Trigger::FieldChanged { column_id } => {
            if !columns.iter().any(|column| &column.id == column_id) {
                return Err(BoardError::ColumnNotFound {
                    id: column_id.to_string(),
                });
            }
            Ok(())
        }
        Trigger::DateReached { date_column, .. } => {
            let column = columns
                .iter()
                .find(|column| &column.id == date_column)
                .ok_or_else(|| BoardError::ColumnNotFound {
                    id: date_column.to_string(),
                })?;
            if !matches!(column.column_type, ColumnType::Date) {
                return Err(FieldError::invalid_schema(
                    &column.name,
                    "date_reached trigger requires a date column",
                )
                .into());
            }
            Ok(())
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for AddAutomation {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        if !ctx.board_exists(&self.board_id).await {
            return Err(BoardError::BoardNotFound {
                id: self.board_id.to_string(),
            });
        }

        let columns = ctx.read_board_columns(&self.board_id).await?;
        check_trigger(&self.trigger, &columns)?;

        let mut automation = Automation::new(
            self.board_id.clone(),
            &self.name,
            self.trigger.clone(),
            self.action.clone(),
        );
        automation.description = self.description.clone();
        automation.condition = self.condition.clone();

        ctx.write_automation(&automation).await?;

        let mut result = serde_json::to_value(&automation)?;
        result["id"] = serde_json::json!(&automation.id);
        Ok(result)
    }
}
