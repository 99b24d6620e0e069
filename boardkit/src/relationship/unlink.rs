//! UnlinkItems command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use crate::types::LinkId;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Remove one link row.
///
/// Idempotent on absence: unlinking a link that no longer exists is a no-op
/// success, so concurrent unlink retries never surface spurious errors.
#[derive(Debug, Deserialize)]
pub struct UnlinkItems {
    /// The link row to remove
    pub link_id: LinkId,
}

impl UnlinkItems {
    /// Create a new UnlinkItems command
    pub fn new(link_id: impl Into<LinkId>) -> Self {
        Self {
            link_id: link_id.into(),
        }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for UnlinkItems {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        if !ctx.link_exists(&self.link_id).await {
            return Ok(serde_json::json!({
                "id": self.link_id,
                "removed": false,
            }));
        }

        ctx.delete_link_file(&self.link_id).await?;

        Ok(serde_json::json!({
            "id": self.link_id,
            "removed": true,
        }))
    }
}
