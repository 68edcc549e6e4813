//! Domain model for personal task tracking.
//!
//! The domain holds the task aggregate, the collection state owned by the
//! task store, and the pure derivation pipeline (filtering and ranking) that
//! turns the collection into a display list. Nothing in here performs I/O.

mod error;
mod filter;
mod ids;
mod patch;
mod ranking;
mod store;
mod task;
mod user;

pub use error::{ParseTaskValueError, TaskDomainError, TaskStoreError};
pub use filter::{FilterPatch, StatusFilter, TaskFilter, filter_tasks};
pub use ids::{TaskId, UserId};
pub use patch::TaskPatch;
pub use ranking::{
    NO_DEADLINE_SENTINEL_MILLIS, PRIORITY_SCALE_MILLIS, SortMode, rank_tasks, rank_tasks_at,
    smart_score,
};
pub use store::TaskCollectionState;
pub use task::{NewTask, PersistedTaskData, Priority, Task, TaskStatus};
pub use user::User;
