//! Collection state owned by the task store.
//!
//! Every operation here is a total, synchronous transition of the state. The
//! state keeps tasks keyed by identifier in a `BTreeMap`; any ordering shown
//! to users is derived by [`filter_tasks`](super::filter_tasks) and
//! [`rank_tasks`](super::rank_tasks).

use super::{
    FilterPatch, SortMode, Task, TaskFilter, TaskId, TaskPatch, TaskStoreError, filter_tasks,
    rank_tasks_at,
};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};

/// A user's task collection plus its view parameters and status flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskCollectionState {
    tasks: BTreeMap<TaskId, Task>,
    loading: bool,
    last_error: Option<String>,
    filter: TaskFilter,
    sort_mode: SortMode,
}

impl TaskCollectionState {
    /// Creates an empty collection with the given view parameters.
    #[must_use]
    pub const fn new(filter: TaskFilter, sort_mode: SortMode) -> Self {
        Self {
            tasks: BTreeMap::new(),
            loading: false,
            last_error: None,
            filter,
            sort_mode,
        }
    }

    /// Overwrites the whole collection and clears the loading flag.
    ///
    /// If `tasks` repeats an identifier, the later entry wins.
    pub fn replace_all(&mut self, tasks: impl IntoIterator<Item = Task>) {
        self.tasks = tasks.into_iter().map(|task| (task.id(), task)).collect();
        self.loading = false;
    }

    /// Adds one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateId`] when the identifier is
    /// already present; the collection is left unchanged.
    pub fn insert(&mut self, task: Task) -> Result<(), TaskStoreError> {
        let id = task.id();
        if self.tasks.contains_key(&id) {
            return Err(TaskStoreError::DuplicateId(id));
        }
        self.tasks.insert(id, task);
        Ok(())
    }

    /// Applies a partial update to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when `id` is absent; the
    /// collection is left unchanged.
    pub fn merge(&mut self, id: TaskId, patch: &TaskPatch) -> Result<(), TaskStoreError> {
        let task = self
            .tasks
            .get_mut(&id)
            .ok_or(TaskStoreError::NotFound(id))?;
        task.apply(patch);
        Ok(())
    }

    /// Removes a task, returning it if it was present.
    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        self.tasks.remove(&id)
    }

    /// Sets the loading flag.
    pub const fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Records (or clears) the last error and always clears loading.
    pub fn set_error(&mut self, message: Option<String>) {
        self.last_error = message;
        self.loading = false;
    }

    /// Merges a partial filter update.
    pub fn set_filter(&mut self, patch: FilterPatch) {
        self.filter.apply(patch);
    }

    /// Selects the sort mode.
    pub const fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort_mode = mode;
    }

    /// Returns the task with `id`, if present.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    /// Iterates over all tasks in identifier order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// Returns the number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when the collection holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns whether a fetch is in flight.
    #[must_use]
    pub const fn loading(&self) -> bool {
        self.loading
    }

    /// Returns the last recorded error message.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Returns the active filter.
    #[must_use]
    pub const fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    /// Returns the selected sort mode.
    #[must_use]
    pub const fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    /// Returns the distinct categories in use, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.tasks
            .values()
            .filter_map(Task::category)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    /// Derives the display list: filter, then rank relative to `now`.
    #[must_use]
    pub fn visible_at(&self, now: DateTime<Utc>) -> Vec<&Task> {
        let filtered = filter_tasks(self.tasks.values(), &self.filter);
        rank_tasks_at(filtered, self.sort_mode, now)
    }
}
