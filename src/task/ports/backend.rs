//! Persistence backend port: one-shot CRUD plus a continuous snapshot feed.

use crate::task::domain::{NewTask, Task, TaskId, TaskPatch, TaskStatus, UserId};
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

/// Result type for task backend operations.
pub type TaskBackendResult<T> = Result<T, TaskBackendError>;

/// Task persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskBackend: Send + Sync {
    /// Fetches every task owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBackendError::Transport`] or
    /// [`TaskBackendError::Unauthenticated`] when the call fails.
    async fn fetch_tasks(&self, user_id: &UserId) -> TaskBackendResult<Vec<Task>>;

    /// Stores a new task and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBackendError::Transport`] when the call fails.
    async fn create_task(&self, task: NewTask) -> TaskBackendResult<Task>;

    /// Applies a partial update to a stored task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBackendError::NotFound`] for an unknown identifier or
    /// [`TaskBackendError::Transport`] when the call fails.
    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> TaskBackendResult<()>;

    /// Deletes a stored task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBackendError::NotFound`] for an unknown identifier or
    /// [`TaskBackendError::Transport`] when the call fails.
    async fn delete_task(&self, id: TaskId) -> TaskBackendResult<()>;

    /// Flips a task between active and completed, given its current status.
    ///
    /// # Errors
    ///
    /// Same as [`TaskBackend::update_task`].
    async fn toggle_status(&self, id: TaskId, current: TaskStatus) -> TaskBackendResult<()> {
        let patch = TaskPatch::new().with_status(current.toggled());
        self.update_task(id, &patch).await
    }

    /// Opens a snapshot feed for `user_id`.
    ///
    /// The feed delivers an initial snapshot promptly and then the full task
    /// list after every change. Dropping the feed unsubscribes.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBackendError::Transport`] when the subscription cannot
    /// be established.
    async fn subscribe(&self, user_id: &UserId) -> TaskBackendResult<SnapshotFeed>;
}

/// Event delivered on a snapshot feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotEvent {
    /// The complete current task list for the subscribed user.
    Snapshot(Vec<Task>),
    /// The backend reported a feed error. The feed stays open.
    Error(TaskBackendError),
}

/// Receiving end of a backend snapshot subscription.
#[derive(Debug)]
pub struct SnapshotFeed {
    receiver: mpsc::UnboundedReceiver<SnapshotEvent>,
}

impl SnapshotFeed {
    /// Creates a connected sender and feed pair.
    #[must_use]
    pub fn channel() -> (mpsc::UnboundedSender<SnapshotEvent>, Self) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (sender, Self { receiver })
    }

    /// Waits for the next event. Returns `None` once the backend closes the
    /// feed.
    pub async fn recv(&mut self) -> Option<SnapshotEvent> {
        self.receiver.recv().await
    }
}

/// Errors returned by task backend implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskBackendError {
    /// The task does not exist in the backend.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The caller is not signed in or lacks access.
    #[error("not authenticated")]
    Unauthenticated,

    /// The call failed in transit.
    #[error("transport error: {0}")]
    Transport(String),
}

impl TaskBackendError {
    /// Wraps a transport failure.
    #[must_use]
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }
}
