//! External collaborator seams: task list and notification service.
//!
//! The engine invokes these with a structured payload and treats any error
//! they raise as an action failure, never as a failure of the record
//! mutation that triggered the automation.

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Creates tasks in an external task list.
#[async_trait]
pub trait TaskSink: Send + Sync {
    /// Accepts a structured payload, returns the created task or raises.
    async fn create_task(&self, payload: Value) -> Result<Value>;
}

/// Sends notifications through an external channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Accepts a structured payload, returns success or raises.
    async fn send_notification(&self, payload: Value) -> Result<()>;
}

/// Default task sink: logs the payload and reports success.
#[derive(Debug, Default)]
pub struct LoggingTaskSink;

#[async_trait]
impl TaskSink for LoggingTaskSink {
    async fn create_task(&self, payload: Value) -> Result<Value> {
        tracing::info!(%payload, "create_task");
        Ok(serde_json::json!({ "accepted": true }))
    }
}

/// Default notifier: logs the payload and reports success.
#[derive(Debug, Default)]
pub struct LoggingNotifier;

#[async_trait]
impl Notifier for LoggingNotifier {
    async fn send_notification(&self, payload: Value) -> Result<()> {
        tracing::info!(%payload, "send_notification");
        Ok(())
    }
}
