//! GetColumn command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use crate::types::ColumnId;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Get a column by ID
#[derive(Debug, Deserialize)]
pub struct GetColumn {
    /// The column ID
    pub id: ColumnId,
}

impl GetColumn {
    /// Create a new GetColumn command
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for GetColumn {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let column = ctx.read_column(&self.id).await?;

        let mut result = serde_json::to_value(&column)?;
        result["id"] = serde_json::json!(&column.id);
        Ok(result)
    }
}
