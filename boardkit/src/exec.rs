//! The `Execute` trait commands implement.
//!
//! Operations are structs whose fields are the parameters, one operation per
//! file under its noun module. Execution takes the context by reference and
//! returns the affected entity as JSON.

use async_trait::async_trait;
use serde_json::Value;

/// A command executable against a context.
#[async_trait]
pub trait Execute<C, E> {
    /// Run the command, returning the affected entity as a JSON value.
    async fn execute(&self, ctx: &C) -> std::result::Result<Value, E>;
}
