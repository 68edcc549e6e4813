//! Error types for task domain validation, parsing, and store mutations.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing or editing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,
}

/// Errors returned by task collection mutations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskStoreError {
    /// A task with the same identifier is already in the collection.
    #[error("duplicate task identifier: {0}")]
    DuplicateId(TaskId),

    /// The targeted task is not in the collection.
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

/// Error returned while parsing an enumerated task value from its wire name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseTaskValueError {
    /// Name of the value family being parsed (for example `priority`).
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseTaskValueError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}
