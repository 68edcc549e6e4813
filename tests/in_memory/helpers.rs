//! Shared test helpers for in-memory backend integration tests.

use std::{sync::Arc, time::Duration};

use mockable::DefaultClock;
use rstest::fixture;
use todomaster::task::{
    adapters::memory::InMemoryTaskBackend,
    domain::UserId,
    services::{TaskStore, TaskSyncService},
};

/// Sync service type used across integration tests.
pub type MemorySync = TaskSyncService<InMemoryTaskBackend, DefaultClock>;

/// Provides a fresh in-memory backend for each test.
#[fixture]
pub fn backend() -> InMemoryTaskBackend {
    InMemoryTaskBackend::new()
}

/// Provides the identifier of the signed-in user.
#[fixture]
pub fn user_id() -> UserId {
    UserId::new("user-123")
}

/// Builds a sync service over `backend` with an empty store.
pub fn sync_over(backend: &InMemoryTaskBackend) -> MemorySync {
    TaskSyncService::new(
        Arc::new(backend.clone()),
        TaskStore::new(),
        Arc::new(DefaultClock),
    )
}

/// Polls `condition` until it holds or roughly one second has passed.
pub async fn eventually(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}
