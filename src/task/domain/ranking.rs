//! Ranking engine for the task display list.
//!
//! Ranking always partitions by status first: every active task precedes
//! every completed task. Within each partition the selected [`SortMode`]
//! comparator applies, and ties fall back to the task identifier so the
//! output is a total, deterministic order regardless of input order.
//!
//! The `smart` mode scores each task as
//! `priority_weight * PRIORITY_SCALE_MILLIS - time_until_deadline_millis`
//! and ranks higher scores first. A task without a deadline uses
//! [`NO_DEADLINE_SENTINEL_MILLIS`] as its time until deadline, so such tasks
//! rank by priority alone and after any equal-priority task with a deadline
//! inside that horizon.

use super::{ParseTaskValueError, Task, TaskStatus};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;

/// Weight applied to each priority step: 100 days in milliseconds.
pub const PRIORITY_SCALE_MILLIS: i64 = 8_640_000_000;

/// Time until deadline assumed for tasks without a deadline.
pub const NO_DEADLINE_SENTINEL_MILLIS: i64 = 9_999_999_999;

/// Display-list ordering mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Composite urgency score of priority and deadline proximity.
    #[default]
    Smart,
    /// Earliest deadline first; tasks without a deadline last.
    Deadline,
    /// Highest priority first.
    Priority,
    /// Most recently created first.
    Created,
}

impl SortMode {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Smart => "smart",
            Self::Deadline => "deadline",
            Self::Priority => "priority",
            Self::Created => "created",
        }
    }
}

impl TryFrom<&str> for SortMode {
    type Error = ParseTaskValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "smart" => Ok(Self::Smart),
            "deadline" => Ok(Self::Deadline),
            "priority" => Ok(Self::Priority),
            "created" => Ok(Self::Created),
            _ => Err(ParseTaskValueError::new("sort mode", value)),
        }
    }
}

/// Computes the `smart` urgency score of `task` relative to `now`.
#[must_use]
pub fn smart_score(task: &Task, now: DateTime<Utc>) -> i64 {
    let time_until_deadline = task.deadline().map_or(NO_DEADLINE_SENTINEL_MILLIS, |deadline| {
        deadline.signed_duration_since(now).num_milliseconds()
    });
    i64::from(task.priority().weight())
        .saturating_mul(PRIORITY_SCALE_MILLIS)
        .saturating_sub(time_until_deadline)
}

/// Ranks `tasks` using the clock's current time, read once for the call.
#[must_use]
pub fn rank_tasks<T>(tasks: Vec<T>, mode: SortMode, clock: &impl Clock) -> Vec<T>
where
    T: Borrow<Task>,
{
    rank_tasks_at(tasks, mode, clock.utc())
}

/// Ranks `tasks` with `now` as the reference time for `smart` scoring.
#[must_use]
pub fn rank_tasks_at<T>(mut tasks: Vec<T>, mode: SortMode, now: DateTime<Utc>) -> Vec<T>
where
    T: Borrow<Task>,
{
    tasks.sort_by(|a, b| compare(a.borrow(), b.borrow(), mode, now));
    tasks
}

fn compare(a: &Task, b: &Task, mode: SortMode, now: DateTime<Utc>) -> Ordering {
    status_rank(a.status())
        .cmp(&status_rank(b.status()))
        .then_with(|| compare_by_mode(a, b, mode, now))
        .then_with(|| a.id().cmp(&b.id()))
}

const fn status_rank(status: TaskStatus) -> u8 {
    match status {
        TaskStatus::Active => 0,
        TaskStatus::Completed => 1,
    }
}

fn compare_by_mode(a: &Task, b: &Task, mode: SortMode, now: DateTime<Utc>) -> Ordering {
    match mode {
        SortMode::Deadline => match (a.deadline(), b.deadline()) {
            (Some(left), Some(right)) => left.cmp(&right),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortMode::Priority => b.priority().weight().cmp(&a.priority().weight()),
        SortMode::Created => b.created_at().cmp(&a.created_at()),
        SortMode::Smart => smart_score(b, now).cmp(&smart_score(a, now)),
    }
}
