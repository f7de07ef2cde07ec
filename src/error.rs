//! Crate-wide error type.
//!
//! [`Error`] is a `thiserror` enum with `#[from]` conversions for every
//! failure domain the crate touches — I/O, JSON, YAML and `SQLite` — so
//! fallible operations can use `?` directly. [`Result`] is the crate-wide
//! result alias over this error.

use thiserror::Error;

/// Errors produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization or deserialization failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A database operation failed.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
