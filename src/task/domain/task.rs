//! Task aggregate and its enumerated attributes.

use super::{ParseTaskValueError, TaskDomainError, TaskId, TaskPatch, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Most urgent.
    High,
    /// Default urgency.
    Medium,
    /// Least urgent.
    Low,
}

impl Priority {
    /// Returns the ranking weight (`high = 3`, `medium = 2`, `low = 1`).
    #[must_use]
    pub const fn weight(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParseTaskValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ParseTaskValueError::new("priority", value)),
        }
    }
}

/// Task completion status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Still to do.
    Active,
    /// Done.
    Completed,
}

impl TaskStatus {
    /// Returns the opposite status.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Completed,
            Self::Completed => Self::Active,
        }
    }

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskValueError::new("task status", value)),
        }
    }
}

/// A task that has not yet been assigned an identifier by persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    user_id: UserId,
    title: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    deadline: Option<DateTime<Utc>>,
    priority: Priority,
    status: TaskStatus,
    category: Option<String>,
    tags: Vec<String>,
}

impl NewTask {
    /// Creates an active task draft stamped with the current clock time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank.
    pub fn new(
        user_id: UserId,
        title: impl Into<String>,
        priority: Priority,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        Ok(Self {
            user_id,
            title: normalize_title(title.into())?,
            description: None,
            created_at: clock.utc(),
            deadline: None,
            priority,
            status: TaskStatus::Active,
            category: None,
            tags: Vec::new(),
        })
    }

    /// Sets the description; blank text leaves it unset.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = normalize_optional(description.into());
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the category; blank text leaves it unset.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = normalize_optional(category.into());
        self
    }

    /// Sets free-form tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the trimmed title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Assigns a persistence identifier, producing the stored task.
    #[must_use]
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            created_at: self.created_at,
            deadline: self.deadline,
            priority: self.priority,
            status: self.status,
            category: self.category,
            tags: self.tags,
        }
    }
}

/// Task aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    user_id: UserId,
    title: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    deadline: Option<DateTime<Utc>>,
    priority: Priority,
    status: TaskStatus,
    category: Option<String>,
    tags: Vec<String>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning user.
    pub user_id: UserId,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional deadline.
    pub deadline: Option<DateTime<Utc>>,
    /// Priority.
    pub priority: Priority,
    /// Completion status.
    pub status: TaskStatus,
    /// Optional category.
    pub category: Option<String>,
    /// Free-form tags.
    pub tags: Vec<String>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            title: data.title,
            description: data.description,
            created_at: data.created_at,
            deadline: data.deadline,
            priority: data.priority,
            status: data.status,
            category: data.category,
            tags: data.tags,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the completion status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the category, if any.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Returns the tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Applies a partial update. Identity, owner, and creation time never
    /// change.
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(title) = patch.title() {
            title.clone_into(&mut self.title);
        }
        if let Some(description) = patch.description() {
            self.description = description.map(str::to_owned);
        }
        if let Some(deadline) = patch.deadline() {
            self.deadline = deadline;
        }
        if let Some(priority) = patch.priority() {
            self.priority = priority;
        }
        if let Some(status) = patch.status() {
            self.status = status;
        }
        if let Some(category) = patch.category() {
            self.category = category.map(str::to_owned);
        }
        if let Some(tags) = patch.tags() {
            self.tags = tags.to_vec();
        }
    }
}

/// Trims a title, rejecting blank input.
pub(crate) fn normalize_title(title: String) -> Result<String, TaskDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}

/// Trims optional free text, mapping blank input to `None`.
pub(crate) fn normalize_optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
