//! Core types for the board engine

mod automation;
mod board;
mod ids;
mod item;
mod ordinal;
mod preference;
mod relationship;

// Re-export all types
pub use automation::{
    Action, Automation, AutomationLog, Condition, LogStatus, Trigger, TriggeredBy, UpdateValue,
};
pub use board::{Board, Column, DisplaySettings};
pub use ids::{
    AutomationId, BoardId, ColumnId, ItemId, LinkId, LogEntryId, RelationshipId, UserId,
};
pub use item::Item;
pub use ordinal::Ordinal;
pub use preference::BoardViewPreference;
pub use relationship::{ItemRelationship, Relationship, RelationshipType};
