//! Shared, single-writer handle over the task collection state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use mockable::Clock;
use parking_lot::Mutex;
use tracing::debug;

use crate::config::EngineConfig;
use crate::task::domain::{
    FilterPatch, SortMode, Task, TaskCollectionState, TaskFilter, TaskId, TaskPatch,
    TaskStoreError,
};

/// Cloneable handle to the one task collection of a session.
///
/// Every mutation runs to completion under a single lock, so no mutation
/// observes another half-applied. Reads hand out owned copies and never hold
/// the lock past the call.
#[derive(Debug, Clone)]
pub struct TaskStore {
    state: Arc<Mutex<TaskCollectionState>>,
    initial_filter: TaskFilter,
    initial_sort_mode: SortMode,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::with_view(TaskFilter::default(), SortMode::default())
    }
}

impl TaskStore {
    /// Creates an empty store with the default filter and `smart` sorting.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store whose filter and sort mode start (and reset on
    /// [`TaskStore::clear`]) at the given values.
    #[must_use]
    pub fn with_view(filter: TaskFilter, sort_mode: SortMode) -> Self {
        Self {
            state: Arc::new(Mutex::new(TaskCollectionState::new(
                filter.clone(),
                sort_mode,
            ))),
            initial_filter: filter,
            initial_sort_mode: sort_mode,
        }
    }

    /// Creates an empty store using the configured view defaults.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        let filter = TaskFilter {
            status: config.default_status_filter,
            ..TaskFilter::default()
        };
        Self::with_view(filter, config.default_sort_mode)
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> TaskCollectionState {
        self.state.lock().clone()
    }

    /// Returns a copy of the task with `id`, if present.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<Task> {
        self.state.lock().get(id).cloned()
    }

    /// Derives the display list from the current filter and sort mode.
    ///
    /// Filtering and ranking run on a copy taken under the lock, so writers
    /// are never held up by a reader. The clock is read once, before ranking.
    #[must_use]
    pub fn visible_tasks(&self, clock: &impl Clock) -> Vec<Task> {
        let now = clock.utc();
        let state = self.snapshot();
        state.visible_at(now).into_iter().cloned().collect()
    }

    /// Overwrites the whole collection and clears the loading flag.
    pub fn replace_all(&self, tasks: Vec<Task>) {
        let count = tasks.len();
        self.dispatch(|state| state.replace_all(tasks));
        debug!(count, "replaced task collection");
    }

    /// Adds one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateId`] when the identifier is present.
    pub fn insert(&self, task: Task) -> Result<(), TaskStoreError> {
        self.dispatch(|state| state.insert(task))
    }

    /// Applies a partial update to one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when `id` is absent.
    pub fn merge(&self, id: TaskId, patch: &TaskPatch) -> Result<(), TaskStoreError> {
        self.dispatch(|state| state.merge(id, patch))
    }

    /// Removes one task; a no-op when absent.
    pub fn remove(&self, id: TaskId) -> Option<Task> {
        self.dispatch(|state| state.remove(id))
    }

    /// Sets the loading flag.
    pub fn set_loading(&self, loading: bool) {
        self.dispatch(|state| state.set_loading(loading));
    }

    /// Records or clears the last error; always clears loading.
    pub fn set_error(&self, message: Option<String>) {
        self.dispatch(|state| state.set_error(message));
    }

    /// Merges a partial filter update.
    pub fn set_filter(&self, patch: FilterPatch) {
        self.dispatch(|state| state.set_filter(patch));
    }

    /// Selects the sort mode.
    pub fn set_sort_mode(&self, mode: SortMode) {
        self.dispatch(|state| state.set_sort_mode(mode));
    }

    /// Tears the collection down to its initial, empty state.
    pub fn clear(&self) {
        let fresh = TaskCollectionState::new(self.initial_filter.clone(), self.initial_sort_mode);
        self.dispatch(|state| *state = fresh);
        debug!("cleared task collection");
    }

    /// Applies `mutation` unless `cancelled` is set, checking the flag under
    /// the store lock. Returns whether the mutation ran.
    pub(crate) fn dispatch_unless(
        &self,
        cancelled: &AtomicBool,
        mutation: impl FnOnce(&mut TaskCollectionState),
    ) -> bool {
        let mut state = self.state.lock();
        if cancelled.load(Ordering::Acquire) {
            return false;
        }
        mutation(&mut state);
        true
    }

    /// Runs `action` while holding the store lock, excluding any dispatch.
    pub(crate) fn exclusive<R>(&self, action: impl FnOnce() -> R) -> R {
        let _guard = self.state.lock();
        action()
    }

    fn dispatch<R>(&self, mutation: impl FnOnce(&mut TaskCollectionState) -> R) -> R {
        mutation(&mut self.state.lock())
    }
}
