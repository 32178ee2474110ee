//! Error types for task store operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for task store operations.
pub type Result<T> = std::result::Result<T, TaskError>;

/// Everything that can go wrong while loading, mutating or saving the store.
#[derive(Error, Debug)]
pub enum TaskError {
    /// A task could not be built from the given input.
    #[error("invalid task: {0}")]
    Validation(String),

    /// No task carries the referenced id.
    #[error("Task {0} not found.")]
    NotFound(u64),

    /// Every id up to the largest representable one is taken.
    #[error("no task ids left: the store already holds id {0}")]
    IdsExhausted(u64),

    /// The store file exists but does not hold a valid task list.
    #[error("task store {} is corrupt: {reason}", .path.display())]
    CorruptStore { path: PathBuf, reason: String },

    /// Reading or writing the store file failed.
    #[error("failed to access task store {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TaskError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TaskError::Io { path: path.into(), source }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        TaskError::CorruptStore { path: path.into(), reason: reason.to_string() }
    }
}
