//! In-memory task backend with a live snapshot feed.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockWriteGuard};
use tokio::sync::mpsc;

use crate::task::{
    domain::{NewTask, Task, TaskId, TaskPatch, UserId},
    ports::{SnapshotEvent, SnapshotFeed, TaskBackend, TaskBackendError, TaskBackendResult},
};

/// Thread-safe in-memory task backend.
///
/// Every successful mutation pushes the owner's full task list to that
/// owner's open feeds. Feeds whose receiver was dropped are pruned on the
/// next push.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskBackend {
    state: Arc<RwLock<InMemoryBackendState>>,
}

#[derive(Debug, Default)]
struct InMemoryBackendState {
    tasks: BTreeMap<TaskId, Task>,
    subscribers: Vec<Subscriber>,
    offline: bool,
}

#[derive(Debug)]
struct Subscriber {
    user_id: UserId,
    sender: mpsc::UnboundedSender<SnapshotEvent>,
}

impl InMemoryBackendState {
    fn tasks_for(&self, user_id: &UserId) -> Vec<Task> {
        self.tasks
            .values()
            .filter(|task| task.user_id() == user_id)
            .cloned()
            .collect()
    }

    fn ensure_online(&self) -> TaskBackendResult<()> {
        if self.offline {
            return Err(TaskBackendError::Transport("backend offline".to_owned()));
        }
        Ok(())
    }

    fn broadcast(&mut self, user_id: &UserId, event: &SnapshotEvent) {
        self.subscribers.retain(|subscriber| {
            if subscriber.user_id != *user_id {
                return !subscriber.sender.is_closed();
            }
            subscriber.sender.send(event.clone()).is_ok()
        });
    }

    fn publish(&mut self, user_id: &UserId) {
        let snapshot = SnapshotEvent::Snapshot(self.tasks_for(user_id));
        self.broadcast(user_id, &snapshot);
    }
}

impl InMemoryTaskBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with a transport error (or recover).
    pub fn set_offline(&self, offline: bool) {
        if let Ok(mut state) = self.write() {
            state.offline = offline;
        }
    }

    /// Pushes an arbitrary snapshot to `user_id`'s feeds without touching
    /// stored tasks. Simulates a delayed or stale delivery.
    pub fn push_snapshot(&self, user_id: &UserId, tasks: Vec<Task>) {
        if let Ok(mut state) = self.write() {
            state.broadcast(user_id, &SnapshotEvent::Snapshot(tasks));
        }
    }

    /// Pushes a feed error to `user_id`'s feeds.
    pub fn push_error(&self, user_id: &UserId, error: TaskBackendError) {
        if let Ok(mut state) = self.write() {
            state.broadcast(user_id, &SnapshotEvent::Error(error));
        }
    }

    /// Returns the number of open feeds for `user_id`.
    #[must_use]
    pub fn subscriber_count(&self, user_id: &UserId) -> usize {
        self.state.read().map_or(0, |state| {
            state
                .subscribers
                .iter()
                .filter(|subscriber| {
                    subscriber.user_id == *user_id && !subscriber.sender.is_closed()
                })
                .count()
        })
    }

    /// Returns the stored task with `id`, bypassing any feed.
    #[must_use]
    pub fn stored(&self, id: TaskId) -> Option<Task> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.tasks.get(&id).cloned())
    }

    fn write(&self) -> TaskBackendResult<RwLockWriteGuard<'_, InMemoryBackendState>> {
        self.state
            .write()
            .map_err(TaskBackendError::transport)
    }
}

#[async_trait]
impl TaskBackend for InMemoryTaskBackend {
    async fn fetch_tasks(&self, user_id: &UserId) -> TaskBackendResult<Vec<Task>> {
        let state = self
            .state
            .read()
            .map_err(TaskBackendError::transport)?;
        state.ensure_online()?;
        Ok(state.tasks_for(user_id))
    }

    async fn create_task(&self, task: NewTask) -> TaskBackendResult<Task> {
        let mut state = self.write()?;
        state.ensure_online()?;
        let created = task.into_task(TaskId::new());
        let owner = created.user_id().clone();
        state.tasks.insert(created.id(), created.clone());
        state.publish(&owner);
        Ok(created)
    }

    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> TaskBackendResult<()> {
        let mut state = self.write()?;
        state.ensure_online()?;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(TaskBackendError::NotFound(id))?;
        task.apply(patch);
        let owner = task.user_id().clone();
        state.publish(&owner);
        Ok(())
    }

    async fn delete_task(&self, id: TaskId) -> TaskBackendResult<()> {
        let mut state = self.write()?;
        state.ensure_online()?;
        let removed = state
            .tasks
            .remove(&id)
            .ok_or(TaskBackendError::NotFound(id))?;
        state.publish(removed.user_id());
        Ok(())
    }

    async fn subscribe(&self, user_id: &UserId) -> TaskBackendResult<SnapshotFeed> {
        let mut state = self.write()?;
        state.ensure_online()?;
        let (sender, feed) = SnapshotFeed::channel();
        sender
            .send(SnapshotEvent::Snapshot(state.tasks_for(user_id)))
            .map_err(TaskBackendError::transport)?;
        state.subscribers.push(Subscriber {
            user_id: user_id.clone(),
            sender,
        });
        Ok(feed)
    }
}
