//! Error types for the task tracker
//!
//! Every library operation returns [`TaskError`]. None of the error cases leave
//! the store partially written: each mutation rewrites the collection document
//! as a whole or not at all.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskError {
    /// User input failed validation. `field` names the offending input.
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// No task with the given id exists.
    #[error("Task '{0}' not found")]
    NotFound(String),

    /// A task with the given id is already stored.
    #[error("Task id '{0}' already exists")]
    DuplicateKey(String),

    /// The document store could not be read or written.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl TaskError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        TaskError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        TaskError::StorageUnavailable(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, TaskError::Validation { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TaskError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;
