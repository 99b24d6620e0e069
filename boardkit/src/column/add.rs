//! AddColumn command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::exec::Execute;
use crate::types::{BoardId, Column, DisplaySettings};
use async_trait::async_trait;
use boardkit_fields::{validate_definition, ColumnType};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;

/// Add a new column to a board's schema
#[derive(Debug, Deserialize)]
pub struct AddColumn {
    /// The owning board
    pub board_id: BoardId,
    /// The column display name
    pub name: String,
    /// The column type, including its validation rules
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Whether items must carry a value for this column
    #[serde(default)]
    pub is_required: bool,
    /// Optional position in column order; defaults to the end
    pub order: Option<usize>,
    /// Presentation hints
    #[serde(default)]
    pub display: DisplaySettings,
}

impl AddColumn {
    /// Create a new AddColumn command
    pub fn new(
        board_id: impl Into<BoardId>,
        name: impl Into<String>,
        column_type: ColumnType,
    ) -> Self {
        Self {
            board_id: board_id.into(),
            name: name.into(),
            column_type,
            is_required: false,
            order: None,
            display: DisplaySettings::default(),
        }
    }

    /// Mark the column as required
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Set the order (position in column list)
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = Some(order);
        self
    }

    /// Set the display settings
    pub fn with_display(mut self, display: DisplaySettings) -> Self {
        self.display = display;
        self
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for AddColumn {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        if !ctx.board_exists(&self.board_id).await {
            return Err(BoardError::BoardNotFound {
                id: self.board_id.to_string(),
            });
        }

        // Definition validation needs the catalog of known boards so a
        // board_link column cannot point into the void
        let catalog: HashSet<String> = ctx
            .list_board_ids()
            .await?
            .iter()
            .map(|id| id.to_string())
            .collect();
        validate_definition(&self.name, &self.column_type, &catalog)?;

        let mut siblings = ctx.read_board_columns(&self.board_id).await?;

        let order = match self.order {
            Some(order) => {
                // Shift later columns down so order stays unique per board
                for sibling in siblings.iter_mut().filter(|c| c.order >= order) {
                    sibling.order += 1;
                    ctx.write_column(sibling).await?;
                }
                order
            }
            None => siblings
                .iter()
                .map(|c| c.order)
                .max()
                .map(|o| o + 1)
                .unwrap_or(0),
        };

        let mut column = Column::new(self.board_id.clone(), &self.name, self.column_type.clone())
            .with_order(order);
        column.is_required = self.is_required;
        column.display = self.display.clone();

        ctx.write_column(&column).await?;

        let mut result = serde_json::to_value(&column)?;
        result["id"] = serde_json::json!(&column.id);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CreateBoard;
    use crate::column::ListColumns;
    use boardkit_fields::FieldError;
    use tempfile::TempDir;

    async fn setup() -> (TempDir, BoardContext, BoardId) {
        let temp = TempDir::new().unwrap();
        let ctx = BoardContext::new(temp.path().join(".boards"));
        let board = CreateBoard::new("Deals").execute(&ctx).await.unwrap();
        let board_id = BoardId::from_string(board["id"].as_str().unwrap());
        (temp, ctx, board_id)
    }

    #[tokio::test]
    async fn test_add_column() {
        let (_temp, ctx, board_id) = setup().await;

        let result = AddColumn::new(board_id, "Title", ColumnType::text())
            .required()
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(result["name"], "Title");
        assert_eq!(result["is_required"], true);
        assert_eq!(result["order"], 0);
    }

    #[tokio::test]
    async fn test_add_column_appends_to_order() {
        let (_temp, ctx, board_id) = setup().await;

        AddColumn::new(board_id.clone(), "A", ColumnType::text())
            .execute(&ctx)
            .await
            .unwrap();
        let second = AddColumn::new(board_id, "B", ColumnType::text())
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(second["order"], 1);
    }

    #[tokio::test]
    async fn test_add_column_explicit_order_shifts_siblings() {
        let (_temp, ctx, board_id) = setup().await;

        AddColumn::new(board_id.clone(), "A", ColumnType::text())
            .execute(&ctx)
            .await
            .unwrap();
        AddColumn::new(board_id.clone(), "B", ColumnType::text())
            .execute(&ctx)
            .await
            .unwrap();
        AddColumn::new(board_id.clone(), "First", ColumnType::text())
            .with_order(0)
            .execute(&ctx)
            .await
            .unwrap();

        let listed = ListColumns::new(board_id).execute(&ctx).await.unwrap();
        let names: Vec<&str> = listed
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["First", "A", "B"]);
    }

    #[tokio::test]
    async fn test_add_column_unknown_board() {
        let temp = TempDir::new().unwrap();
        let ctx = BoardContext::new(temp.path().join(".boards"));

        let result = AddColumn::new(BoardId::new(), "Title", ColumnType::text())
            .execute(&ctx)
            .await;
        assert!(matches!(result, Err(BoardError::BoardNotFound { .. })));
    }

    #[tokio::test]
    async fn test_add_column_rejects_empty_options() {
        let (_temp, ctx, board_id) = setup().await;

        let result = AddColumn::new(board_id, "State", ColumnType::Status { options: vec![] })
            .execute(&ctx)
            .await;
        assert!(matches!(
            result,
            Err(BoardError::Field(FieldError::InvalidSchema { .. }))
        ));
    }

    #[tokio::test]
    async fn test_add_board_link_column_requires_known_board() {
        let (_temp, ctx, board_id) = setup().await;

        let dangling = ColumnType::BoardLink {
            linked_board_id: "no-such-board".into(),
            multiple: false,
        };
        let result = AddColumn::new(board_id.clone(), "Company", dangling)
            .execute(&ctx)
            .await;
        assert!(result.is_err());

        let valid = ColumnType::BoardLink {
            linked_board_id: board_id.to_string(),
            multiple: false,
        };
        assert!(AddColumn::new(board_id, "Company", valid)
            .execute(&ctx)
            .await
            .is_ok());
    }
}
