//! Task management core.
//!
//! This module provides the board's single source of truth:
//! - Tasks with title, description, status, priority, and dependencies
//! - An ordered repository with a narrow mutation API (create, update,
//!   delete, reorder) that persists on every change
//! - Id generation from task titles
//!
//! # Example
//!
//! ```
//! use taskboard::tasks::{NewTask, Status, TaskRepository, TaskUpdate};
//!
//! let mut repo = TaskRepository::in_memory();
//!
//! // Create a task
//! let task = repo.add_task(NewTask::new("Fix login bug", Status::Todo)).unwrap();
//!
//! // Move it to another column
//! repo.update_task(
//!     &task.id,
//!     TaskUpdate { status: Some(Status::InProgress), ..Default::default() },
//! )
//! .unwrap();
//!
//! assert_eq!(repo.get_tasks_by_status(Status::InProgress).len(), 1);
//! ```

pub mod id;
pub mod models;
pub mod repository;

pub use models::{InvalidPriority, InvalidStatus, Priority, Status, Task};
pub use repository::{NewTask, TaskRepository, TaskUpdate, STORAGE_NAME};

use crate::error::Result;
use crate::paths;
use crate::storage::SqliteStorage;
use std::path::Path;

/// Open a durable repository at the given database path.
///
/// # Errors
///
/// Returns an error if the database cannot be initialized. A readable
/// database with a corrupt or missing payload still opens, as an empty
/// board.
pub fn open_repository(db_path: impl AsRef<Path>) -> Result<TaskRepository> {
    let storage = SqliteStorage::new(db_path)?;
    Ok(TaskRepository::new(Box::new(storage)))
}

/// Open the durable repository at the default on-disk location.
///
/// Returns `None` if the home directory cannot be determined or the
/// database cannot be initialized.
#[must_use]
pub fn open_default_repository() -> Option<TaskRepository> {
    let db_path = paths::board_db_path()?;
    open_repository(db_path).ok()
}
