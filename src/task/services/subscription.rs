//! Cancellable consumer of a backend snapshot feed.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::TaskStore;
use crate::task::{
    domain::UserId,
    ports::{SnapshotEvent, SnapshotFeed},
};

/// Handle to a running snapshot subscription.
///
/// Each snapshot replaces the whole collection, with no merge against local
/// optimistic edits. Feed errors are recorded on the store and do not end
/// the subscription. Dropping the handle cancels it.
#[derive(Debug)]
pub struct SubscriptionHandle {
    user_id: UserId,
    cancelled: Arc<AtomicBool>,
    store: TaskStore,
    consumer: JoinHandle<()>,
}

impl SubscriptionHandle {
    /// Spawns the feed consumer on the current tokio runtime.
    pub(crate) fn spawn(user_id: UserId, feed: SnapshotFeed, store: TaskStore) -> Self {
        let cancelled = Arc::new(AtomicBool::new(false));
        let consumer = tokio::spawn(consume(
            feed,
            store.clone(),
            Arc::clone(&cancelled),
            user_id.clone(),
        ));
        info!(user_id = %user_id, "task subscription started");
        Self {
            user_id,
            cancelled,
            store,
            consumer,
        }
    }

    /// Stops the subscription.
    ///
    /// Idempotent. Once this returns, the feed dispatches nothing further to
    /// the store, even if the consumer task has not yet been torn down.
    pub fn cancel(&self) {
        let already = self
            .store
            .exclusive(|| self.cancelled.swap(true, Ordering::AcqRel));
        if already {
            return;
        }
        self.consumer.abort();
        info!(user_id = %self.user_id, "task subscription cancelled");
    }

    /// Returns `true` once [`SubscriptionHandle::cancel`] has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Returns `true` when the consumer has exited, either because the
    /// backend closed the feed or because the handle was cancelled.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.consumer.is_finished()
    }

    /// Returns the subscribed user.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn consume(
    mut feed: SnapshotFeed,
    store: TaskStore,
    cancelled: Arc<AtomicBool>,
    user_id: UserId,
) {
    while let Some(event) = feed.recv().await {
        let applied = match event {
            SnapshotEvent::Snapshot(tasks) => {
                let count = tasks.len();
                let applied = store.dispatch_unless(&cancelled, |state| state.replace_all(tasks));
                if applied {
                    debug!(user_id = %user_id, count, "applied task snapshot");
                }
                applied
            }
            SnapshotEvent::Error(err) => {
                warn!(user_id = %user_id, error = %err, "task snapshot feed error");
                store.dispatch_unless(&cancelled, |state| state.set_error(Some(err.to_string())))
            }
        };
        if !applied {
            return;
        }
    }
    debug!(user_id = %user_id, "task snapshot feed closed");
}
