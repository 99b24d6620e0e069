//! Dynamic board engine with file-backed storage
//!
//! Boards are user-defined tables: each board carries a set of typed columns
//! (its schema) and items are records whose data maps column ids to values.
//! On top of that sit a relationship engine (typed, cardinality-checked links
//! between boards) and an automation engine (trigger/condition/action rules
//! reacting to item lifecycle events).
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use boardkit::{board::CreateBoard, column::AddColumn, item::CreateItem};
//! use boardkit::{BoardContext, BoardId, ColumnType, Execute};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = BoardContext::new("/path/to/workspace/.boards");
//!
//! let board = CreateBoard::new("Deals").execute(&ctx).await?;
//! let board_id = BoardId::from_string(board["id"].as_str().unwrap());
//!
//! AddColumn::new(board_id.clone(), "Title", ColumnType::text())
//!     .required()
//!     .execute(&ctx)
//!     .await?;
//!
//! let item = CreateItem::new(board_id).execute(&ctx).await?;
//! println!("created item {}", item["id"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Storage Structure
//!
//! ```text
//! .boards/
//! ├── boards/{id}.json           # Board metadata
//! ├── columns/{id}.json          # Column definitions (schema)
//! ├── items/{id}.json            # Items (records)
//! ├── relationships/{id}.json    # Relationship definitions
//! ├── links/{id}.json            # Item-to-item link rows
//! ├── automations/{id}.json      # Automation rules
//! ├── automations/{id}.jsonl     # Per-automation execution log
//! └── views/{user}/{board}.json  # Per-user board view preferences
//! ```
//!
//! Entity state files use pretty-printed JSON; execution logs are JSONL
//! (one object per line). A mutation validates against the current schema,
//! persists, then publishes a lifecycle event through the dispatcher; the
//! automation engine is the sole subscriber and runs matching rules before
//! the mutation call returns.

pub mod collab;
mod context;
mod error;
pub mod events;
mod exec;
pub mod types;

// Command modules
pub mod automation;
pub mod board;
pub mod column;
pub mod item;
pub mod preference;
pub mod relationship;

pub use collab::{LoggingNotifier, LoggingTaskSink, Notifier, TaskSink};
pub use context::{BoardContext, BoardLock};
pub use error::{BoardError, Result};
pub use events::{EventDispatcher, EventKind, RecordEvent, Subscriber, SubscriptionId};
pub use exec::Execute;

pub use automation::AutomationEngine;

// Re-export commonly used types
pub use types::{
    Action, Automation, AutomationId, AutomationLog, Board, BoardId, BoardViewPreference, Column,
    ColumnId, Condition, DisplaySettings, Item, ItemId, ItemRelationship, LinkId, LogEntryId,
    LogStatus, Ordinal, Relationship, RelationshipId, RelationshipType, Trigger, TriggeredBy,
    UpdateValue, UserId,
};

// Re-export the schema layer so consumers need only one import
pub use boardkit_fields::{BoardCatalog, ColumnType, FieldError, SelectOption};
