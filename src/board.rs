//! Board projection and drag-gesture handling.
//!
//! Groups tasks into the configured columns by status and translates
//! drag gestures into repository mutations:
//! - task over task: live splice-and-reinsert reordering while the drag
//!   is still in progress
//! - task over column: re-bucket by rewriting the task's status
//! - column over column: reorder the local column list on drop
//!
//! Drag-in-progress state is owned entirely by the board, discarded on
//! drop or cancellation, and never persisted.

use crate::config::{BoardConfig, Column};
use crate::error::Result;
use crate::tasks::{Status, Task, TaskRepository, TaskUpdate};

/// The item captured at drag start.
#[derive(Debug, Clone)]
pub enum DragItem {
    /// A task card.
    Task(Task),
    /// A column.
    Column(Column),
}

/// What the lifted item is currently over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragTarget {
    /// Another task card, by id.
    Task(String),
    /// A column surface (header or empty area), by column id.
    Column(Status),
}

/// The board projection: column layout plus transient drag state.
///
/// The column list is a local copy of the configuration; dragging a
/// column reorders it here without touching the task repository.
#[derive(Debug, Clone)]
pub struct Board {
    columns: Vec<Column>,
    drag: Option<DragItem>,
}

impl Board {
    /// Create a board over the given column list.
    #[must_use]
    pub const fn new(columns: Vec<Column>) -> Self {
        Self { columns, drag: None }
    }

    /// Create a board from a configuration.
    #[must_use]
    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(config.columns.clone())
    }

    /// Columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The item currently lifted, if a drag is in progress.
    #[must_use]
    pub const fn active(&self) -> Option<&DragItem> {
        self.drag.as_ref()
    }

    /// Each column paired with its visible tasks, in repository order.
    ///
    /// A task whose status matches no configured column appears in no
    /// lane.
    #[must_use]
    pub fn lanes<'a>(&'a self, repo: &TaskRepository) -> Vec<(&'a Column, Vec<Task>)> {
        self.columns
            .iter()
            .map(|column| (column, repo.get_tasks_by_status(column.id)))
            .collect()
    }

    /// Record the lifted item at drag start.
    pub fn drag_start(&mut self, item: DragItem) {
        self.drag = Some(item);
    }

    /// Handle the lifted item hovering a target mid-drag.
    ///
    /// Fires continuously as the hover target changes: task-over-task
    /// reorders immediately, task-over-column re-buckets immediately.
    /// Missing targets, self-targets, column drags, and calls with no
    /// drag in progress are no-ops.
    ///
    /// # Errors
    ///
    /// Returns an error if a resulting mutation cannot be persisted.
    pub fn drag_over(
        &mut self,
        repo: &mut TaskRepository,
        over: Option<DragTarget>,
    ) -> Result<()> {
        let Some(over) = over else {
            return Ok(());
        };
        // Columns only reorder on drop, not on hover
        let Some(DragItem::Task(active)) = &self.drag else {
            return Ok(());
        };

        match over {
            DragTarget::Task(over_id) => {
                if active.id != over_id {
                    repo.reorder_tasks(&active.id, &over_id)?;
                }
            }
            DragTarget::Column(status) => {
                repo.update_task(
                    &active.id,
                    TaskUpdate { status: Some(status), ..Default::default() },
                )?;
            }
        }

        Ok(())
    }

    /// Handle the drop that ends a drag, clearing the transient state.
    ///
    /// Column-over-column reorders the local column list with the same
    /// splice-and-reinsert semantics the repository uses for tasks. Task
    /// drops need no work here; their mutations already happened live in
    /// [`Self::drag_over`].
    pub fn drag_end(&mut self, over: Option<DragTarget>) {
        let active = self.drag.take();

        let Some(DragTarget::Column(over_id)) = over else {
            return;
        };
        let Some(DragItem::Column(column)) = active else {
            return;
        };
        if column.id == over_id {
            return;
        }

        let (Some(active_index), Some(over_index)) = (
            self.columns.iter().position(|col| col.id == column.id),
            self.columns.iter().position(|col| col.id == over_id),
        ) else {
            return;
        };

        let moved = self.columns.remove(active_index);
        self.columns.insert(over_index, moved);
    }

    /// Discard a drag that ended without a valid drop target.
    pub fn drag_cancel(&mut self) {
        self.drag = None;
    }
}
