//! Partial task updates.

use super::task::{normalize_optional, normalize_title};
use super::{Priority, TaskDomainError, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A partial update to an existing task.
///
/// Every field is optional; unset fields leave the task untouched. Clearable
/// attributes use a nested `Option`, where `Some(None)` removes the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    title: Option<String>,
    description: Option<Option<String>>,
    deadline: Option<Option<DateTime<Utc>>>,
    priority: Option<Priority>,
    status: Option<TaskStatus>,
    category: Option<Option<String>>,
    tags: Option<Vec<String>>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title. Checked by [`TaskPatch::validated`].
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description; blank text clears it.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(normalize_optional(description.into()));
        self
    }

    /// Removes the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Replaces the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(Some(deadline));
        self
    }

    /// Removes the deadline.
    #[must_use]
    pub const fn clear_deadline(mut self) -> Self {
        self.deadline = Some(None);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the category; blank text clears it.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(normalize_optional(category.into()));
        self
    }

    /// Removes the category.
    #[must_use]
    pub fn clear_category(mut self) -> Self {
        self.category = Some(None);
        self
    }

    /// Replaces the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = Some(tags.into_iter().collect());
        self
    }

    /// Trims the title and rejects a blank one.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when a title is set but blank.
    pub fn validated(mut self) -> Result<Self, TaskDomainError> {
        if let Some(title) = self.title.take() {
            self.title = Some(normalize_title(title)?);
        }
        Ok(self)
    }

    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.deadline.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.category.is_none()
            && self.tags.is_none()
    }

    /// Returns the replacement title, if set.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the description change, if set.
    #[must_use]
    pub fn description(&self) -> Option<Option<&str>> {
        self.description.as_ref().map(Option::as_deref)
    }

    /// Returns the deadline change, if set.
    #[must_use]
    pub const fn deadline(&self) -> Option<Option<DateTime<Utc>>> {
        self.deadline
    }

    /// Returns the replacement priority, if set.
    #[must_use]
    pub const fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Returns the replacement status, if set.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the category change, if set.
    #[must_use]
    pub fn category(&self) -> Option<Option<&str>> {
        self.category.as_ref().map(Option::as_deref)
    }

    /// Returns the replacement tags, if set.
    #[must_use]
    pub fn tags(&self) -> Option<&[String]> {
        self.tags.as_deref()
    }
}
