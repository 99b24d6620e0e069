//! Record lifecycle events and the dispatcher that fans them out.
//!
//! The dispatcher is the single choke point between item mutation and
//! automation matching. Delivery is synchronous and subscription-ordered by
//! default; a failing subscriber is logged and skipped, never surfaced to
//! the mutation caller.

use crate::context::BoardContext;
use crate::error::Result;
use crate::types::{AutomationId, BoardId, ColumnId, Item};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// What happened to a record.
#[derive(Debug, Clone)]
pub enum EventKind {
    /// An item was created
    Created { item: Item },
    /// An item was updated; carries before/after snapshots
    Updated { before: Item, after: Item },
    /// One column's value changed. Published alongside `Updated`, once per
    /// column whose value actually differs.
    FieldChanged {
        column_id: ColumnId,
        before: Item,
        after: Item,
    },
    /// Synthesized by the date-trigger scan for one specific automation
    DateReached {
        automation_id: AutomationId,
        item: Item,
    },
}

/// A record lifecycle event.
#[derive(Debug, Clone)]
pub struct RecordEvent {
    pub board_id: BoardId,
    pub kind: EventKind,
    /// True when the mutation was caused by an automation action. The
    /// automation engine skips these, bounding rule recursion at one level.
    pub system_originated: bool,
}

impl RecordEvent {
    /// Create a user-originated event
    pub fn new(board_id: BoardId, kind: EventKind) -> Self {
        Self {
            board_id,
            kind,
            system_originated: false,
        }
    }

    /// Mark the event as caused by an automation action
    pub fn system(mut self) -> Self {
        self.system_originated = true;
        self
    }

    /// The post-event item snapshot subscribers evaluate against
    pub fn item(&self) -> &Item {
        match &self.kind {
            EventKind::Created { item } => item,
            EventKind::Updated { after, .. } => after,
            EventKind::FieldChanged { after, .. } => after,
            EventKind::DateReached { item, .. } => item,
        }
    }

    /// The event kind as a wire string
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            EventKind::Created { .. } => "record_created",
            EventKind::Updated { .. } => "record_updated",
            EventKind::FieldChanged { .. } => "field_changed",
            EventKind::DateReached { .. } => "date_reached",
        }
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

/// A subscriber to record lifecycle events.
#[async_trait]
pub trait Subscriber: Send + Sync {
    async fn handle(&self, ctx: &BoardContext, event: &RecordEvent) -> Result<()>;
}

/// Synchronous pub/sub for record events.
///
/// Registration is process-lifetime, not persisted.
#[derive(Default)]
pub struct EventDispatcher {
    subscribers: RwLock<Vec<(SubscriptionId, Arc<dyn Subscriber>)>>,
    next_id: AtomicU64,
}

impl EventDispatcher {
    /// Create a dispatcher with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber. Subscribers see events in subscription order.
    pub fn subscribe(&self, subscriber: Arc<dyn Subscriber>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut subscribers = self
            .subscribers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        subscribers.push((id, subscriber));
        id
    }

    /// Remove a subscriber. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        let mut subscribers = self
            .subscribers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        subscribers.retain(|(existing, _)| *existing != id);
    }

    fn snapshot(&self) -> Vec<Arc<dyn Subscriber>> {
        self.subscribers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .map(|(_, subscriber)| subscriber.clone())
            .collect()
    }

    /// Deliver an event to all subscribers in subscription order.
    ///
    /// A subscriber error is logged and does not stop delivery to later
    /// subscribers or reach the publisher.
    pub async fn publish(&self, ctx: &BoardContext, event: &RecordEvent) {
        for subscriber in self.snapshot() {
            if let Err(error) = subscriber.handle(ctx, event).await {
                tracing::warn!(
                    %error,
                    event = event.kind_name(),
                    board_id = %event.board_id,
                    "subscriber failed; continuing delivery"
                );
            }
        }
    }

    /// Fire-and-forget delivery on a spawned task.
    ///
    /// No ordering guarantee relative to the caller's next operation.
    pub fn publish_detached(&self, ctx: &BoardContext, event: RecordEvent) {
        let subscribers = self.snapshot();
        let ctx = ctx.clone();
        tokio::spawn(async move {
            for subscriber in subscribers {
                if let Err(error) = subscriber.handle(&ctx, &event).await {
                    tracing::warn!(
                        %error,
                        event = event.kind_name(),
                        "subscriber failed in detached delivery"
                    );
                }
            }
        });
    }
}
