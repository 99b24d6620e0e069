//! Relationship commands.
//!
//! Declares typed links between boards and enforces cardinality when
//! concrete item-to-item links are created.

mod create;
mod delete;
mod link;
mod linked;
mod list;
mod unlink;

pub use create::CreateRelationship;
pub use delete::DeleteRelationship;
pub use link::LinkItems;
pub use linked::ListLinkedItems;
pub use list::ListRelationships;
pub use unlink::UnlinkItems;
