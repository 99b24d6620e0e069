//! ScanDateTriggers command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::events::{EventKind, RecordEvent};
use crate::exec::Execute;
use crate::types::{LogStatus, Trigger};
use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Evaluate every active date_reached rule against its board's items.
///
/// Invoked by an external scheduler, not by mutations. For each item whose
/// date column has crossed `date + offset_days`, a `date_reached` event is
/// synthesized through the dispatcher, unless a prior successful execution
/// for that (automation, item) pair is already on record, which keeps
/// repeated scans from refiring. Failed executions are retried by the next
/// scan.
#[derive(Debug, Default, Deserialize)]
pub struct ScanDateTriggers {
    /// Evaluation instant; defaults to the current time
    pub now: Option<DateTime<Utc>>,
}

impl ScanDateTriggers {
    /// Create a scan evaluated at the current time
    pub fn new() -> Self {
        Self { now: None }
    }

    /// Pin the evaluation instant
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now: Some(now) }
    }
}

/// Parse a stored date value: bare dates count as midnight UTC.
fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    let text = value.as_str()?;
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ScanDateTriggers {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let now = self.now.unwrap_or_else(Utc::now);

        let mut scanned = 0usize;
        let mut fired = 0usize;

        for automation in ctx.read_all_automations().await? {
            if !automation.is_active {
                continue;
            }
            let Trigger::DateReached {
                date_column,
                offset_days,
            } = &automation.trigger
            else {
                continue;
            };

            let items = ctx.read_board_items(&automation.board_id).await?;
            let logs = ctx.read_automation_logs(&automation.id, None).await?;

            for item in items {
                scanned += 1;

                let Some(date) = item.data.get(date_column).and_then(parse_date) else {
                    continue;
                };
                if now < date + Duration::days(*offset_days) {
                    continue;
                }
                let already_fired = logs.iter().any(|log| {
                    log.status == LogStatus::Success && log.triggered_by.item_id == item.id
                });
                if already_fired {
                    continue;
                }

                let event = RecordEvent::new(
                    automation.board_id.clone(),
                    EventKind::DateReached {
                        automation_id: automation.id.clone(),
                        item: item.clone(),
                    },
                );
                ctx.publish(event).await;
                fired += 1;
            }
        }

        tracing::debug!(scanned, fired, "date trigger scan complete");

        Ok(serde_json::json!({
            "scanned": scanned,
            "fired": fired,
        }))
    }
}
