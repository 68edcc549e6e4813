//! Sync reconciler: applies local intents optimistically and folds backend
//! results into the task store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use super::{SubscriptionHandle, TaskStore};
use crate::task::{
    domain::{
        NewTask, Priority, Task, TaskDomainError, TaskId, TaskPatch, TaskStatus, TaskStoreError,
        UserId,
    },
    ports::{TaskBackend, TaskBackendError},
};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    priority: Priority,
    description: Option<String>,
    deadline: Option<DateTime<Utc>>,
    category: Option<String>,
    tags: Vec<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, priority: Priority) -> Self {
        Self {
            title: title.into(),
            priority,
            description: None,
            deadline: None,
            category: None,
            tags: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    fn into_new_task(self, user_id: UserId, clock: &impl Clock) -> Result<NewTask, TaskDomainError> {
        let mut task = NewTask::new(user_id, self.title, self.priority, clock)?.with_tags(self.tags);
        if let Some(description) = self.description {
            task = task.with_description(description);
        }
        if let Some(deadline) = self.deadline {
            task = task.with_deadline(deadline);
        }
        if let Some(category) = self.category {
            task = task.with_category(category);
        }
        Ok(task)
    }
}

/// Service-level errors for task sync operations.
#[derive(Debug, Error)]
pub enum TaskSyncError {
    /// Input was rejected before any backend call.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),
    /// The local collection rejected the mutation.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
    /// The backend call failed.
    #[error(transparent)]
    Backend(#[from] TaskBackendError),
}

/// Result type for task sync operations.
pub type TaskSyncResult<T> = Result<T, TaskSyncError>;

/// Bridges the task backend and the task store.
///
/// Update, delete, and status toggles are applied to the store before the
/// backend call resolves and are not rolled back if it fails. Creation waits
/// for the backend because the backend assigns the identifier.
#[derive(Clone)]
pub struct TaskSyncService<B, C>
where
    B: TaskBackend,
    C: Clock + Send + Sync,
{
    backend: Arc<B>,
    store: TaskStore,
    clock: Arc<C>,
}

impl<B, C> TaskSyncService<B, C>
where
    B: TaskBackend,
    C: Clock + Send + Sync,
{
    /// Creates a new sync service over `store`.
    #[must_use]
    pub const fn new(backend: Arc<B>, store: TaskStore, clock: Arc<C>) -> Self {
        Self {
            backend,
            store,
            clock,
        }
    }

    /// Returns the store this service writes to.
    #[must_use]
    pub const fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Returns the filtered, ranked display list as of now.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<Task> {
        self.store.visible_tasks(&*self.clock)
    }

    /// Fetches the user's tasks once and replaces the collection.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSyncError::Backend`] when the fetch fails; the message
    /// is also recorded on the store.
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn load(&self, user_id: &UserId) -> TaskSyncResult<()> {
        self.store.set_loading(true);
        match self.backend.fetch_tasks(user_id).await {
            Ok(tasks) => {
                self.store.set_loading(false);
                self.store.replace_all(tasks);
                Ok(())
            }
            Err(err) => Err(self.surface("fetch", err)),
        }
    }

    /// Creates a task for `user_id` and adds it to the store.
    ///
    /// If a snapshot already delivered the new task, the snapshot's copy is
    /// kept.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSyncError::Validation`] for a blank title (no backend
    /// call is made) or [`TaskSyncError::Backend`] when creation fails.
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn create(
        &self,
        user_id: &UserId,
        request: CreateTaskRequest,
    ) -> TaskSyncResult<Task> {
        let new_task = request.into_new_task(user_id.clone(), &*self.clock)?;
        let task = self
            .backend
            .create_task(new_task)
            .await
            .map_err(|err| self.surface("create", err))?;
        if let Err(err) = self.store.insert(task.clone()) {
            debug!(task_id = %task.id(), error = %err, "created task already in collection");
        }
        Ok(task)
    }

    /// Applies a partial update optimistically, then persists it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSyncError::Validation`] for a blank title (nothing is
    /// applied) or [`TaskSyncError::Backend`] when persistence fails, in
    /// which case the optimistic change stays in place.
    #[instrument(skip_all, fields(task_id = %id))]
    pub async fn update(&self, id: TaskId, patch: TaskPatch) -> TaskSyncResult<()> {
        let validated = patch.validated()?;
        if let Err(err) = self.store.merge(id, &validated) {
            debug!(error = %err, "optimistic update skipped");
        }
        self.backend
            .update_task(id, &validated)
            .await
            .map_err(|err| self.surface("update", err))
    }

    /// Removes a task optimistically, then deletes it in the backend.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSyncError::Backend`] when deletion fails; the task
    /// stays removed locally.
    #[instrument(skip_all, fields(task_id = %id))]
    pub async fn delete(&self, id: TaskId) -> TaskSyncResult<()> {
        if self.store.remove(id).is_none() {
            debug!("optimistic delete skipped");
        }
        self.backend
            .delete_task(id)
            .await
            .map_err(|err| self.surface("delete", err))
    }

    /// Flips a task between active and completed, returning the new status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSyncError::Store`] when the task is not in the local
    /// collection (no backend call is made) or [`TaskSyncError::Backend`]
    /// when persistence fails, in which case the flip stays in place.
    #[instrument(skip_all, fields(task_id = %id))]
    pub async fn toggle_status(&self, id: TaskId) -> TaskSyncResult<TaskStatus> {
        let current = self
            .store
            .get(id)
            .map(|task| task.status())
            .ok_or(TaskStoreError::NotFound(id))?;
        let next = current.toggled();
        self.store.merge(id, &TaskPatch::new().with_status(next))?;
        self.backend
            .toggle_status(id, current)
            .await
            .map_err(|err| self.surface("toggle_status", err))?;
        Ok(next)
    }

    /// Opens the backend snapshot feed and starts applying it to the store.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSyncError::Backend`] when the feed cannot be opened.
    #[instrument(skip_all, fields(user_id = %user_id))]
    pub async fn subscribe(&self, user_id: &UserId) -> TaskSyncResult<SubscriptionHandle> {
        let feed = self
            .backend
            .subscribe(user_id)
            .await
            .map_err(|err| self.surface("subscribe", err))?;
        Ok(SubscriptionHandle::spawn(
            user_id.clone(),
            feed,
            self.store.clone(),
        ))
    }

    fn surface(&self, operation: &'static str, err: TaskBackendError) -> TaskSyncError {
        warn!(operation, error = %err, "task backend call failed");
        self.store.set_error(Some(err.to_string()));
        TaskSyncError::Backend(err)
    }
}
