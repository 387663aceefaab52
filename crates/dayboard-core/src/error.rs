//! Core error types for dayboard-core.
//!
//! This module defines the error hierarchy using thiserror. Engine
//! functions (partition, layout, statistics) never fail; only commands
//! that address a task by id, validate input, or touch storage do.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dayboard-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Planner command errors
    #[error("Planner error: {0}")]
    Planner(#[from] PlannerError),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by planner commands.
///
/// A command that returns one of these leaves the task list untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    /// No task with the given id exists in the store
    #[error("Task not found: {0}")]
    NotFound(String),

    /// Title was empty or whitespace-only
    #[error("Task title must not be empty")]
    EmptyTitle,

    /// Hour or minute outside the 24-hour clock
    #[error("Invalid time {hour}:{minute:02}: hour must be 0-23 and minute 0-59")]
    InvalidTime { hour: u32, minute: u32 },

    /// A stored start time could not be parsed as `HH:MM`
    #[error("Invalid start time '{0}': expected HH:MM")]
    InvalidStartTime(String),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// A stored row could not be decoded into a task
    #[error("Corrupt row for task '{id}': {message}")]
    CorruptRow { id: String, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseBusy
                    || err.code == rusqlite::ErrorCode::DatabaseLocked
                {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
