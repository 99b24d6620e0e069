//! The automation engine.
//!
//! Pipeline per automation-event pairing: match (board, trigger kind,
//! column for field_changed, automation id for synthesized date_reached) →
//! evaluate the condition on the post-event snapshot → execute the action →
//! append exactly one log row per attempted execution. Condition misses are
//! not attempts and write no row.
//!
//! Failures are isolated: a failing action is logged as a failure and
//! blocks neither sibling automations nor the mutation that triggered the
//! event. System-originated events are skipped before matching, so
//! automation-caused mutations never cascade into further automations.

use crate::context::BoardContext;
use crate::error::Result;
use crate::events::{EventKind, RecordEvent, Subscriber};
use crate::exec::Execute;
use crate::item::{CreateItem, UpdateItem};
use crate::types::{Action, Automation, AutomationLog, Item, Trigger, TriggeredBy};
use async_trait::async_trait;
use chrono::Utc;

/// Matches record events against active automations and runs their actions.
///
/// Installed by `BoardContext::new` as the dispatcher's sole subscriber.
#[derive(Debug, Default)]
pub struct AutomationEngine;

impl AutomationEngine {
    /// Create a new engine
    pub fn new() -> Self {
        Self
    }

    fn matches(automation: &Automation, event: &RecordEvent) -> bool {
        if !automation.is_active {
            return false;
        }
        match (&automation.trigger, &event.kind) {
            (Trigger::RecordCreated, EventKind::Created { .. }) => true,
            (Trigger::RecordUpdated, EventKind::Updated { .. }) => true,
            (Trigger::FieldChanged { column_id }, EventKind::FieldChanged { column_id: changed, .. }) => {
                column_id == changed
            }
            (Trigger::DateReached { .. }, EventKind::DateReached { automation_id, .. }) => {
                automation_id == &automation.id
            }
            _ => false,
        }
    }

    /// Run one matched automation: condition, action, log row.
    async fn run(&self, ctx: &BoardContext, automation: &Automation, event: &RecordEvent) {
        let item = event.item();

        if let Some(condition) = &automation.condition {
            if !condition.evaluate(&item.data) {
                return;
            }
        }

        let triggered_by = TriggeredBy {
            event: event.kind_name().to_string(),
            item_id: item.id.clone(),
        };

        let entry = match self.execute_action(ctx, automation, item).await {
            Ok(()) => AutomationLog::success(automation.id.clone(), triggered_by),
            Err(error) => {
                tracing::warn!(
                    %error,
                    automation_id = %automation.id,
                    item_id = %item.id,
                    "automation action failed"
                );
                AutomationLog::failure(automation.id.clone(), triggered_by, error.to_string())
            }
        };

        if let Err(error) = ctx.append_automation_log(&entry).await {
            tracing::warn!(
                %error,
                automation_id = %automation.id,
                "failed to append automation log"
            );
        }
    }

    async fn execute_action(
        &self,
        ctx: &BoardContext,
        automation: &Automation,
        item: &Item,
    ) -> Result<()> {
        match &automation.action {
            Action::UpdateField { column_id, value } => {
                UpdateItem::new(item.id.clone())
                    .set(column_id.clone(), value.resolve(Utc::now()))
                    .system_originated()
                    .execute(ctx)
                    .await?;
                Ok(())
            }
            Action::CreateRecord {
                target_board_id,
                field_map,
                defaults,
            } => {
                let board_id = target_board_id
                    .clone()
                    .unwrap_or_else(|| automation.board_id.clone());

                let mut data = defaults.clone();
                for (from, to) in field_map {
                    if let Some(value) = item.data.get(from) {
                        data.insert(to.clone(), value.clone());
                    }
                }

                CreateItem::new(board_id)
                    .with_data(data)
                    .system_originated()
                    .execute(ctx)
                    .await?;
                Ok(())
            }
            Action::CreateTask { title, notes } => {
                let payload = serde_json::json!({
                    "title": title,
                    "notes": notes,
                    "board_id": automation.board_id,
                    "item_id": item.id,
                    "automation_id": automation.id,
                });
                ctx.tasks().create_task(payload).await?;
                Ok(())
            }
            Action::SendNotification { message, channel } => {
                let payload = serde_json::json!({
                    "message": message,
                    "channel": channel,
                    "board_id": automation.board_id,
                    "item_id": item.id,
                    "automation_id": automation.id,
                });
                ctx.notifier().send_notification(payload).await
            }
        }
    }
}

#[async_trait]
impl Subscriber for AutomationEngine {
    async fn handle(&self, ctx: &BoardContext, event: &RecordEvent) -> Result<()> {
        // Automation-caused mutations never re-trigger automations
        if event.system_originated {
            return Ok(());
        }

        let automations = ctx.read_board_automations(&event.board_id).await?;
        for automation in automations
            .iter()
            .filter(|automation| Self::matches(automation, event))
        {
            // Failures are isolated inside run(); siblings always get a turn
            self.run(ctx, automation, event).await;
        }
        Ok(())
    }
}
