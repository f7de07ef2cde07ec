//! Ordered task repository, the single source of truth for board state.
//!
//! The repository owns the task list and exposes a narrow mutation API;
//! the board and flow projections are pure derivations over it and write
//! back only through these operations. Every mutation synchronously
//! serializes the full list to the injected [`StorageBackend`] under the
//! fixed storage name, and the list is rehydrated once at construction.
//!
//! Lookup misses are silent no-ops, never errors: a mutation that names
//! an unknown id returns `Ok(None)` / `Ok(false)` / `Ok(())` so rapid
//! gesture streams cannot fail mid-drag. Only storage write failures
//! surface as errors.

use crate::error::Result;
use crate::storage::{MemoryStorage, StorageBackend};
use crate::tasks::id::generate_task_id;
use crate::tasks::models::{Priority, Status, Task};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Storage name the serialized task list is kept under.
pub const STORAGE_NAME: &str = "task-storage";

/// Data for creating a task.
///
/// Id and creation timestamp are assigned by the repository; new tasks
/// start with no dependencies.
#[derive(Debug, Clone)]
pub struct NewTask {
    /// Task title. Emptiness is a collaborator-level validation concern,
    /// not enforced here.
    pub title: String,
    /// Priority level.
    pub priority: Priority,
    /// Optional description.
    pub description: Option<String>,
    /// Column bucket the task starts in.
    pub status: Status,
}

impl NewTask {
    /// Create task data with the default priority and no description.
    pub fn new(title: impl Into<String>, status: Status) -> Self {
        Self { title: title.into(), priority: Priority::default(), description: None, status }
    }
}

/// Fields that can be updated on a task.
#[derive(Debug, Default, Clone)]
pub struct TaskUpdate {
    /// New title (if Some).
    pub title: Option<String>,
    /// New description (if Some).
    pub description: Option<String>,
    /// New priority (if Some).
    pub priority: Option<Priority>,
    /// New status (if Some). This is how column moves happen.
    pub status: Option<Status>,
    /// New dependency list (if Some). An empty list clears the field,
    /// storing "absent" rather than an empty set.
    pub dependencies: Option<Vec<String>>,
}

impl TaskUpdate {
    /// Check if any fields are set for update.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.dependencies.is_none()
    }
}

/// Persisted shape of the board state.
///
/// Unknown keys in the stored mapping are ignored and a missing `tasks`
/// field defaults to an empty list, so older or foreign payloads load as
/// an empty board instead of failing.
#[derive(Debug, Default, Deserialize)]
struct StoredState {
    #[serde(default)]
    tasks: Vec<Task>,
}

/// Borrowing mirror of [`StoredState`] for serialization.
#[derive(Serialize)]
struct StoredStateRef<'a> {
    tasks: &'a [Task],
}

/// The ordered task list plus its persistence backend.
///
/// Iteration order is the canonical render order for the board; reorder
/// and status operations mutate it, creation appends to the end.
pub struct TaskRepository {
    tasks: Vec<Task>,
    backend: Box<dyn StorageBackend>,
}

impl TaskRepository {
    /// Create a repository over the given backend, rehydrating any state
    /// stored under [`STORAGE_NAME`].
    ///
    /// A read failure or corrupt payload yields an empty task list; the
    /// repository never fails to initialize.
    #[must_use]
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        let tasks = backend
            .load(STORAGE_NAME)
            .ok()
            .flatten()
            .and_then(|raw| serde_json::from_str::<StoredState>(&raw).ok())
            .map(|state| state.tasks)
            .unwrap_or_default();
        Self { tasks, backend }
    }

    /// Create a repository backed by in-memory storage.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::new()))
    }

    /// All tasks in repository order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Get a task by id.
    #[must_use]
    pub fn get_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the repository holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Create a task with a fresh unique id and creation timestamp,
    /// appended to the end of the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be persisted.
    pub fn add_task(&mut self, data: NewTask) -> Result<Task> {
        let task = Task {
            id: self.fresh_id(&data.title),
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            created_at: Utc::now(),
            dependencies: None,
        };
        self.tasks.push(task.clone());
        self.persist()?;
        Ok(task)
    }

    /// Merge the set fields of `update` into the task matching `id`.
    ///
    /// Returns `Ok(None)` if the id is unknown (silent no-op). Setting
    /// `dependencies` to an empty list stores the field as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be persisted.
    pub fn update_task(&mut self, id: &str, update: TaskUpdate) -> Result<Option<Task>> {
        let Some(index) = self.index_of(id) else {
            return Ok(None);
        };
        if update.is_empty() {
            return Ok(self.tasks.get(index).cloned());
        }

        let Some(task) = self.tasks.get_mut(index) else {
            return Ok(None);
        };
        if let Some(title) = update.title {
            task.title = title;
        }
        if let Some(description) = update.description {
            task.description = Some(description);
        }
        if let Some(priority) = update.priority {
            task.priority = priority;
        }
        if let Some(status) = update.status {
            task.status = status;
        }
        if let Some(dependencies) = update.dependencies {
            task.dependencies = if dependencies.is_empty() { None } else { Some(dependencies) };
        }
        let updated = task.clone();

        self.persist()?;
        Ok(Some(updated))
    }

    /// Remove the task matching `id`.
    ///
    /// Returns `Ok(false)` if the id is unknown. Other tasks'
    /// `dependencies` entries naming the deleted id are left in place;
    /// read sites filter dangling references.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be persisted.
    pub fn delete_task(&mut self, id: &str) -> Result<bool> {
        let Some(index) = self.index_of(id) else {
            return Ok(false);
        };
        self.tasks.remove(index);
        self.persist()?;
        Ok(true)
    }

    /// Move the task at `active_id`'s position to the position currently
    /// occupied by `over_id`, shifting the tasks in between by one slot.
    ///
    /// Splice-and-reinsert, not a swap: the active task is removed and
    /// reinserted at the over task's pre-removal index. No-op when the
    /// ids are equal (rapid hover events during a drag) or when either
    /// id is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the new state cannot be persisted.
    pub fn reorder_tasks(&mut self, active_id: &str, over_id: &str) -> Result<()> {
        if active_id == over_id {
            return Ok(());
        }
        let (Some(active_index), Some(over_index)) =
            (self.index_of(active_id), self.index_of(over_id))
        else {
            return Ok(());
        };

        let task = self.tasks.remove(active_index);
        self.tasks.insert(over_index, task);
        self.persist()
    }

    /// The subsequence of tasks with the given status, in repository
    /// order.
    #[must_use]
    pub fn get_tasks_by_status(&self, status: Status) -> Vec<Task> {
        self.tasks.iter().filter(|task| task.status == status).cloned().collect()
    }

    /// Position of the task with the given id.
    fn index_of(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    /// Generate an id not already present in the list.
    fn fresh_id(&self, title: &str) -> String {
        loop {
            let id = generate_task_id(title);
            if !self.tasks.iter().any(|task| task.id == id) {
                return id;
            }
        }
    }

    /// Serialize the full task list to the backend.
    fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string(&StoredStateRef { tasks: &self.tasks })?;
        self.backend.save(STORAGE_NAME, &raw)
    }
}
