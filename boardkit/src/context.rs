//! BoardContext - I/O primitives for board storage
//!
//! The context provides storage access plus the event and collaborator
//! seams. No business logic methods, just data access primitives; commands
//! do all the work.

use crate::automation::AutomationEngine;
use crate::collab::{LoggingNotifier, LoggingTaskSink, Notifier, TaskSink};
use crate::error::{BoardError, Result};
use crate::events::{EventDispatcher, RecordEvent};
use crate::types::{
    Automation, AutomationId, AutomationLog, Board, BoardId, BoardViewPreference, Column, ColumnId,
    Item, ItemId, ItemRelationship, LinkId, Relationship, RelationshipId, UserId,
};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Context passed to every command - provides access, not logic.
///
/// Cheaply cloneable; clones share the dispatcher and collaborators.
#[derive(Clone)]
pub struct BoardContext {
    /// Path to the .boards directory
    root: PathBuf,
    dispatcher: Arc<EventDispatcher>,
    tasks: Arc<dyn TaskSink>,
    notifier: Arc<dyn Notifier>,
}

impl BoardContext {
    /// Create a new context for the given .boards directory.
    ///
    /// The automation engine is installed as the dispatcher's first
    /// subscriber; collaborators default to the logging stubs.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let dispatcher = Arc::new(EventDispatcher::new());
        dispatcher.subscribe(Arc::new(AutomationEngine::new()));
        Self {
            root: root.into(),
            dispatcher,
            tasks: Arc::new(LoggingTaskSink),
            notifier: Arc::new(LoggingNotifier),
        }
    }

    /// Replace the task collaborator
    pub fn with_task_sink(mut self, tasks: Arc<dyn TaskSink>) -> Self {
        self.tasks = tasks;
        self
    }

    /// Replace the notification collaborator
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the root .boards directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The event dispatcher
    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    /// The task collaborator
    pub fn tasks(&self) -> &dyn TaskSink {
        self.tasks.as_ref()
    }

    /// The notification collaborator
    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    /// Publish an event to all subscribers (synchronous delivery)
    pub async fn publish(&self, event: RecordEvent) {
        self.dispatcher.publish(self, &event).await;
    }

    /// Publish on a background task (fire-and-forget delivery)
    pub fn publish_detached(&self, event: RecordEvent) {
        self.dispatcher.publish_detached(self, event);
    }

    // =========================================================================
    // Path helpers
    // =========================================================================

    /// Path to boards directory
    pub fn boards_dir(&self) -> PathBuf {
        self.root.join("boards")
    }

    /// Path to a board's JSON file
    pub fn board_path(&self, id: &BoardId) -> PathBuf {
        self.boards_dir().join(format!("{}.json", id))
    }

    /// Path to columns directory
    pub fn columns_dir(&self) -> PathBuf {
        self.root.join("columns")
    }

    /// Path to a column's JSON file
    pub fn column_path(&self, id: &ColumnId) -> PathBuf {
        self.columns_dir().join(format!("{}.json", id))
    }

    /// Path to items directory
    pub fn items_dir(&self) -> PathBuf {
        self.root.join("items")
    }

    /// Path to an item's JSON file
    pub fn item_path(&self, id: &ItemId) -> PathBuf {
        self.items_dir().join(format!("{}.json", id))
    }

    /// Path to relationships directory
    pub fn relationships_dir(&self) -> PathBuf {
        self.root.join("relationships")
    }

    /// Path to a relationship's JSON file
    pub fn relationship_path(&self, id: &RelationshipId) -> PathBuf {
        self.relationships_dir().join(format!("{}.json", id))
    }

    /// Path to links directory
    pub fn links_dir(&self) -> PathBuf {
        self.root.join("links")
    }

    /// Path to a link's JSON file
    pub fn link_path(&self, id: &LinkId) -> PathBuf {
        self.links_dir().join(format!("{}.json", id))
    }

    /// Path to automations directory
    pub fn automations_dir(&self) -> PathBuf {
        self.root.join("automations")
    }

    /// Path to an automation's JSON file
    pub fn automation_path(&self, id: &AutomationId) -> PathBuf {
        self.automations_dir().join(format!("{}.json", id))
    }

    /// Path to an automation's execution log
    pub fn automation_log_path(&self, id: &AutomationId) -> PathBuf {
        self.automations_dir().join(format!("{}.jsonl", id))
    }

    /// Path to views directory
    pub fn views_dir(&self) -> PathBuf {
        self.root.join("views")
    }

    /// Path to one user's view preference for one board
    pub fn view_path(&self, user_id: &UserId, board_id: &BoardId) -> PathBuf {
        self.views_dir()
            .join(user_id.as_str())
            .join(format!("{}.json", board_id))
    }

    /// Path to the lock file
    pub fn lock_path(&self) -> PathBuf {
        self.root.join(".lock")
    }

    // =========================================================================
    // Directory initialization
    // =========================================================================

    /// Check if all required directories exist
    pub fn directories_exist(&self) -> bool {
        self.root.exists()
            && self.boards_dir().exists()
            && self.columns_dir().exists()
            && self.items_dir().exists()
            && self.relationships_dir().exists()
            && self.links_dir().exists()
            && self.automations_dir().exists()
            && self.views_dir().exists()
    }

    /// Create the directory structure for a new store
    ///
    /// This is idempotent - safe to call multiple times.
    pub async fn create_directories(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        fs::create_dir_all(self.boards_dir()).await?;
        fs::create_dir_all(self.columns_dir()).await?;
        fs::create_dir_all(self.items_dir()).await?;
        fs::create_dir_all(self.relationships_dir()).await?;
        fs::create_dir_all(self.links_dir()).await?;
        fs::create_dir_all(self.automations_dir()).await?;
        fs::create_dir_all(self.views_dir()).await?;
        Ok(())
    }

    /// Ensure directories exist, creating them if needed
    pub async fn ensure_directories(&self) -> Result<()> {
        if !self.directories_exist() {
            self.create_directories().await?;
        }
        Ok(())
    }

    // =========================================================================
    // Generic JSON file primitives
    // =========================================================================

    async fn read_json<T: DeserializeOwned>(
        &self,
        path: &Path,
        missing: impl FnOnce() -> BoardError,
    ) -> Result<T> {
        if !path.exists() {
            return Err(missing());
        }
        let content = fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    async fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let content = serde_json::to_string_pretty(value)?;
        atomic_write(path, content.as_bytes()).await
    }

    async fn delete_file(&self, path: &Path) -> Result<()> {
        if path.exists() {
            fs::remove_file(path).await?;
        }
        Ok(())
    }

    async fn list_json_ids(&self, dir: &Path) -> Result<Vec<String>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        let mut entries = fs::read_dir(dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }

        Ok(ids)
    }

    // =========================================================================
    // Board I/O
    // =========================================================================

    /// Read a board file
    pub async fn read_board(&self, id: &BoardId) -> Result<Board> {
        let path = self.board_path(id);
        let mut board: Board = self
            .read_json(&path, || BoardError::BoardNotFound { id: id.to_string() })
            .await?;
        board.id = id.clone();
        Ok(board)
    }

    /// Write a board file (atomic write via temp file)
    pub async fn write_board(&self, board: &Board) -> Result<()> {
        self.write_json(&self.board_path(&board.id), board).await
    }

    /// Delete a board file
    pub async fn delete_board_file(&self, id: &BoardId) -> Result<()> {
        self.delete_file(&self.board_path(id)).await
    }

    /// List all board IDs by reading the boards directory
    pub async fn list_board_ids(&self) -> Result<Vec<BoardId>> {
        Ok(self
            .list_json_ids(&self.boards_dir())
            .await?
            .into_iter()
            .map(BoardId::from_string)
            .collect())
    }

    /// Read all boards
    pub async fn read_all_boards(&self) -> Result<Vec<Board>> {
        let ids = self.list_board_ids().await?;
        let mut boards = Vec::with_capacity(ids.len());
        for id in ids {
            boards.push(self.read_board(&id).await?);
        }
        Ok(boards)
    }

    /// Check if a board exists
    pub async fn board_exists(&self, id: &BoardId) -> bool {
        self.board_path(id).exists()
    }

    // =========================================================================
    // Column I/O
    // =========================================================================

    /// Read a column file
    pub async fn read_column(&self, id: &ColumnId) -> Result<Column> {
        let path = self.column_path(id);
        let mut column: Column = self
            .read_json(&path, || BoardError::ColumnNotFound { id: id.to_string() })
            .await?;
        column.id = id.clone();
        Ok(column)
    }

    /// Write a column file (atomic write via temp file)
    pub async fn write_column(&self, column: &Column) -> Result<()> {
        self.write_json(&self.column_path(&column.id), column).await
    }

    /// Delete a column file
    pub async fn delete_column_file(&self, id: &ColumnId) -> Result<()> {
        self.delete_file(&self.column_path(id)).await
    }

    /// List all column IDs
    pub async fn list_column_ids(&self) -> Result<Vec<ColumnId>> {
        Ok(self
            .list_json_ids(&self.columns_dir())
            .await?
            .into_iter()
            .map(ColumnId::from_string)
            .collect())
    }

    /// Read all columns
    pub async fn read_all_columns(&self) -> Result<Vec<Column>> {
        let ids = self.list_column_ids().await?;
        let mut columns = Vec::with_capacity(ids.len());
        for id in ids {
            columns.push(self.read_column(&id).await?);
        }
        Ok(columns)
    }

    /// Read a board's columns, sorted by display order
    pub async fn read_board_columns(&self, board_id: &BoardId) -> Result<Vec<Column>> {
        let mut columns: Vec<Column> = self
            .read_all_columns()
            .await?
            .into_iter()
            .filter(|column| &column.board_id == board_id)
            .collect();
        columns.sort_by_key(|column| column.order);
        Ok(columns)
    }

    // =========================================================================
    // Item I/O
    // =========================================================================

    /// Read an item file
    pub async fn read_item(&self, id: &ItemId) -> Result<Item> {
        let path = self.item_path(id);
        let mut item: Item = self
            .read_json(&path, || BoardError::ItemNotFound { id: id.to_string() })
            .await?;
        item.id = id.clone();
        Ok(item)
    }

    /// Write an item file (atomic write via temp file)
    pub async fn write_item(&self, item: &Item) -> Result<()> {
        self.write_json(&self.item_path(&item.id), item).await
    }

    /// Delete an item file
    pub async fn delete_item_file(&self, id: &ItemId) -> Result<()> {
        self.delete_file(&self.item_path(id)).await
    }

    /// List all item IDs
    pub async fn list_item_ids(&self) -> Result<Vec<ItemId>> {
        Ok(self
            .list_json_ids(&self.items_dir())
            .await?
            .into_iter()
            .map(ItemId::from_string)
            .collect())
    }

    /// Read all items
    pub async fn read_all_items(&self) -> Result<Vec<Item>> {
        let ids = self.list_item_ids().await?;
        let mut items = Vec::with_capacity(ids.len());
        for id in ids {
            items.push(self.read_item(&id).await?);
        }
        Ok(items)
    }

    /// Read a board's items, sorted by ordinal
    pub async fn read_board_items(&self, board_id: &BoardId) -> Result<Vec<Item>> {
        let mut items: Vec<Item> = self
            .read_all_items()
            .await?
            .into_iter()
            .filter(|item| &item.board_id == board_id)
            .collect();
        items.sort_by(|a, b| a.ordinal.cmp(&b.ordinal));
        Ok(items)
    }

    /// Check if an item exists
    pub async fn item_exists(&self, id: &ItemId) -> bool {
        self.item_path(id).exists()
    }

    // =========================================================================
    // Relationship I/O
    // =========================================================================

    /// Read a relationship file
    pub async fn read_relationship(&self, id: &RelationshipId) -> Result<Relationship> {
        let path = self.relationship_path(id);
        let mut relationship: Relationship = self
            .read_json(&path, || BoardError::RelationshipNotFound {
                id: id.to_string(),
            })
            .await?;
        relationship.id = id.clone();
        Ok(relationship)
    }

    /// Write a relationship file (atomic write via temp file)
    pub async fn write_relationship(&self, relationship: &Relationship) -> Result<()> {
        self.write_json(&self.relationship_path(&relationship.id), relationship)
            .await
    }

    /// Delete a relationship file
    pub async fn delete_relationship_file(&self, id: &RelationshipId) -> Result<()> {
        self.delete_file(&self.relationship_path(id)).await
    }

    /// List all relationship IDs
    pub async fn list_relationship_ids(&self) -> Result<Vec<RelationshipId>> {
        Ok(self
            .list_json_ids(&self.relationships_dir())
            .await?
            .into_iter()
            .map(RelationshipId::from_string)
            .collect())
    }

    /// Read all relationships
    pub async fn read_all_relationships(&self) -> Result<Vec<Relationship>> {
        let ids = self.list_relationship_ids().await?;
        let mut relationships = Vec::with_capacity(ids.len());
        for id in ids {
            relationships.push(self.read_relationship(&id).await?);
        }
        Ok(relationships)
    }

    // =========================================================================
    // Link I/O
    // =========================================================================

    /// Read a link file
    pub async fn read_link(&self, id: &LinkId) -> Result<ItemRelationship> {
        let path = self.link_path(id);
        let mut link: ItemRelationship = self
            .read_json(&path, || BoardError::LinkNotFound { id: id.to_string() })
            .await?;
        link.id = id.clone();
        Ok(link)
    }

    /// Write a link file (atomic write via temp file)
    pub async fn write_link(&self, link: &ItemRelationship) -> Result<()> {
        self.write_json(&self.link_path(&link.id), link).await
    }

    /// Delete a link file
    pub async fn delete_link_file(&self, id: &LinkId) -> Result<()> {
        self.delete_file(&self.link_path(id)).await
    }

    /// Check if a link exists
    pub async fn link_exists(&self, id: &LinkId) -> bool {
        self.link_path(id).exists()
    }

    /// List all link IDs
    pub async fn list_link_ids(&self) -> Result<Vec<LinkId>> {
        Ok(self
            .list_json_ids(&self.links_dir())
            .await?
            .into_iter()
            .map(LinkId::from_string)
            .collect())
    }

    /// Read all links
    pub async fn read_all_links(&self) -> Result<Vec<ItemRelationship>> {
        let ids = self.list_link_ids().await?;
        let mut links = Vec::with_capacity(ids.len());
        for id in ids {
            links.push(self.read_link(&id).await?);
        }
        Ok(links)
    }

    /// Read all link rows of one relationship
    pub async fn read_relationship_links(
        &self,
        relationship_id: &RelationshipId,
    ) -> Result<Vec<ItemRelationship>> {
        Ok(self
            .read_all_links()
            .await?
            .into_iter()
            .filter(|link| &link.relationship_id == relationship_id)
            .collect())
    }

    /// Read all link rows referencing an item on either side
    pub async fn read_item_links(&self, item_id: &ItemId) -> Result<Vec<ItemRelationship>> {
        Ok(self
            .read_all_links()
            .await?
            .into_iter()
            .filter(|link| &link.source_item_id == item_id || &link.target_item_id == item_id)
            .collect())
    }

    // =========================================================================
    // Automation I/O
    // =========================================================================

    /// Read an automation file
    pub async fn read_automation(&self, id: &AutomationId) -> Result<Automation> {
        let path = self.automation_path(id);
        let mut automation: Automation = self
            .read_json(&path, || BoardError::AutomationNotFound {
                id: id.to_string(),
            })
            .await?;
        automation.id = id.clone();
        Ok(automation)
    }

    /// Write an automation file (atomic write via temp file)
    pub async fn write_automation(&self, automation: &Automation) -> Result<()> {
        self.write_json(&self.automation_path(&automation.id), automation)
            .await
    }

    /// Delete an automation file and its execution log
    pub async fn delete_automation_file(&self, id: &AutomationId) -> Result<()> {
        self.delete_file(&self.automation_path(id)).await?;
        self.delete_file(&self.automation_log_path(id)).await
    }

    /// List all automation IDs
    pub async fn list_automation_ids(&self) -> Result<Vec<AutomationId>> {
        Ok(self
            .list_json_ids(&self.automations_dir())
            .await?
            .into_iter()
            .map(AutomationId::from_string)
            .collect())
    }

    /// Read all automations
    pub async fn read_all_automations(&self) -> Result<Vec<Automation>> {
        let ids = self.list_automation_ids().await?;
        let mut automations = Vec::with_capacity(ids.len());
        for id in ids {
            automations.push(self.read_automation(&id).await?);
        }
        Ok(automations)
    }

    /// Read a board's automations
    pub async fn read_board_automations(&self, board_id: &BoardId) -> Result<Vec<Automation>> {
        Ok(self
            .read_all_automations()
            .await?
            .into_iter()
            .filter(|automation| &automation.board_id == board_id)
            .collect())
    }

    // =========================================================================
    // Automation execution log
    // =========================================================================

    /// Append an execution record to its automation's log
    pub async fn append_automation_log(&self, entry: &AutomationLog) -> Result<()> {
        let path = self.automation_log_path(&entry.automation_id);
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }

    /// Read an automation's execution log, newest first
    pub async fn read_automation_logs(
        &self,
        automation_id: &AutomationId,
        limit: Option<usize>,
    ) -> Result<Vec<AutomationLog>> {
        let path = self.automation_log_path(automation_id);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path).await?;
        let mut entries: Vec<AutomationLog> = content
            .lines()
            .filter(|line| !line.is_empty())
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect();

        // Reverse to get newest first
        entries.reverse();

        if let Some(limit) = limit {
            entries.truncate(limit);
        }

        Ok(entries)
    }

    // =========================================================================
    // View preference I/O
    // =========================================================================

    /// Read one user's view preference for one board, if saved
    pub async fn read_view_preference(
        &self,
        user_id: &UserId,
        board_id: &BoardId,
    ) -> Result<Option<BoardViewPreference>> {
        let path = self.view_path(user_id, board_id);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).await?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Write a view preference (atomic write via temp file)
    pub async fn write_view_preference(&self, preference: &BoardViewPreference) -> Result<()> {
        let path = self.view_path(&preference.user_id, &preference.board_id);
        self.write_json(&path, preference).await
    }

    /// Delete every user's view preference for one board
    pub async fn delete_board_view_files(&self, board_id: &BoardId) -> Result<()> {
        let views_dir = self.views_dir();
        if !views_dir.exists() {
            return Ok(());
        }

        let mut users = fs::read_dir(&views_dir).await?;
        while let Some(entry) = users.next_entry().await? {
            let path = entry.path().join(format!("{}.json", board_id));
            if path.exists() {
                fs::remove_file(&path).await?;
            }
        }

        Ok(())
    }

    // =========================================================================
    // Locking
    // =========================================================================

    /// Try to acquire an exclusive lock (non-blocking)
    pub async fn lock(&self) -> Result<BoardLock> {
        let lock_path = self.lock_path();

        // Ensure parent directory exists
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&lock_path)?;

        // Non-blocking lock attempt
        match file.try_lock_exclusive() {
            Ok(()) => Ok(BoardLock {
                file,
                path: lock_path,
            }),
            Err(_) => Err(BoardError::LockBusy),
        }
    }
}

/// RAII lock guard - releases on drop
pub struct BoardLock {
    file: std::fs::File,
    #[allow(dead_code)]
    path: PathBuf,
}

impl Drop for BoardLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// Atomic write via temp file and rename
async fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    // Write to temp file in same directory
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).await?;

    // Rename (atomic on same filesystem)
    fs::rename(&temp_path, path).await?;

    Ok(())
}
