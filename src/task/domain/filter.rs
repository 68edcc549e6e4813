//! Filter predicate over a task collection.
//!
//! The three criteria are independent and conjunctive, so the order in which
//! they are checked does not affect the result.

use super::{ParseTaskValueError, Priority, Task, TaskStatus};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Status selector for the display list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// Every task regardless of status.
    #[default]
    All,
    /// Only active tasks.
    Active,
    /// Only completed tasks.
    Completed,
}

impl StatusFilter {
    /// Returns `true` when a task with `status` passes this selector.
    #[must_use]
    pub fn admits(self, status: TaskStatus) -> bool {
        match self {
            Self::All => true,
            Self::Active => status == TaskStatus::Active,
            Self::Completed => status == TaskStatus::Completed,
        }
    }

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for StatusFilter {
    type Error = ParseTaskValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskValueError::new("status filter", value)),
        }
    }
}

/// Active filter criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    /// Status selector.
    pub status: StatusFilter,
    /// Exact priority match, when set.
    pub priority: Option<Priority>,
    /// Exact, case-sensitive category match, when set.
    pub category: Option<String>,
}

impl TaskFilter {
    /// Returns `true` when `task` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.admits(task.status())
            && self.priority.is_none_or(|priority| task.priority() == priority)
            && self
                .category
                .as_deref()
                .is_none_or(|category| task.category() == Some(category))
    }

    /// Merges a partial update into this filter.
    pub fn apply(&mut self, patch: FilterPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
    }
}

/// Partial update to a [`TaskFilter`]; unset fields are left untouched and
/// `Some(None)` clears an optional criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    /// New status selector.
    pub status: Option<StatusFilter>,
    /// New priority criterion.
    pub priority: Option<Option<Priority>>,
    /// New category criterion.
    pub category: Option<Option<String>>,
}

impl FilterPatch {
    /// Patch that only changes the status selector.
    #[must_use]
    pub fn status(status: StatusFilter) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Patch that only changes the priority criterion.
    #[must_use]
    pub fn priority(priority: Option<Priority>) -> Self {
        Self {
            priority: Some(priority),
            ..Self::default()
        }
    }

    /// Patch that only changes the category criterion.
    #[must_use]
    pub fn category(category: Option<String>) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }
}

/// Returns the tasks matching `filter`, preserving input order.
#[must_use]
pub fn filter_tasks<T, I>(tasks: I, filter: &TaskFilter) -> Vec<T>
where
    T: Borrow<Task>,
    I: IntoIterator<Item = T>,
{
    tasks
        .into_iter()
        .filter(|task| filter.matches(task.borrow()))
        .collect()
}
