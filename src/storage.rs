//! Durable key-value storage for serialized board state.
//!
//! The task repository persists its entire task list as a single blob
//! under a fixed storage name on every mutation, and reads it back once
//! at startup. This module provides:
//! - [`StorageBackend`] — the persistence trait the repository writes to
//! - [`SqliteStorage`] — durable storage in a single `SQLite` table
//! - [`MemoryStorage`] — in-memory storage for tests and ephemeral boards

use crate::error::Result;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Trait for key-value blob storage.
///
/// Values are opaque strings; the repository stores serialized JSON under
/// a fixed name. Implementations must treat an unknown name as absent
/// rather than an error.
pub trait StorageBackend {
    /// Load the value stored under `name`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn load(&self, name: &str) -> Result<Option<String>>;

    /// Store `value` under `name`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn save(&self, name: &str, value: &str) -> Result<()>;
}

/// `SQLite`-based storage backend.
///
/// Each operation opens a new connection to the database file. This
/// avoids thread safety issues and is acceptable for the low frequency
/// of board mutations.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    /// Path to the database file.
    db_path: PathBuf,
}

impl SqliteStorage {
    /// Create a new `SQLite` storage backend at the given database path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let storage = Self { db_path: db_path.as_ref().to_path_buf() };
        storage.init_schema()?;
        Ok(storage)
    }

    /// Get the database path.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a connection to the database.
    fn open(&self) -> Result<Connection> {
        if let Some(parent) = self.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&self.db_path)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        Ok(conn)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<()> {
        let conn = self.open()?;

        conn.execute_batch(
            r"
            -- Serialized board state, one row per storage name
            CREATE TABLE IF NOT EXISTS storage (
                name TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            ",
        )?;

        Ok(())
    }
}

impl StorageBackend for SqliteStorage {
    fn load(&self, name: &str) -> Result<Option<String>> {
        let conn = self.open()?;
        let value = conn
            .query_row("SELECT value FROM storage WHERE name = ?1", params![name], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn save(&self, name: &str, value: &str) -> Result<()> {
        let conn = self.open()?;
        conn.execute(
            "INSERT INTO storage (name, value, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(name) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![name, value],
        )?;
        Ok(())
    }
}

/// In-memory storage backend.
///
/// Holds values in a map for the lifetime of the process. Used by tests
/// and by boards that do not need to survive a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty in-memory storage backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self, name: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(name).cloned())
    }

    fn save(&self, name: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(name.to_string(), value.to_string());
        Ok(())
    }
}
