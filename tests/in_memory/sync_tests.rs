//! Sync tests for [`TaskSyncService`] over [`InMemoryTaskBackend`].
//!
//! Tests optimistic intents and their reconciliation with live snapshots.

use crate::in_memory::helpers::{backend, eventually, sync_over, user_id};
use rstest::rstest;
use todomaster::task::{
    adapters::memory::InMemoryTaskBackend,
    domain::{Priority, TaskDomainError, TaskPatch, TaskStatus, UserId},
    ports::TaskBackend,
    services::{CreateTaskRequest, TaskSyncError},
};

/// Tests that a created task reaches both the backend and the store.
#[rstest]
#[tokio::test]
async fn created_task_is_stored_and_visible(backend: InMemoryTaskBackend, user_id: UserId) {
    let sync = sync_over(&backend);
    let handle = sync.subscribe(&user_id).await.expect("subscribe");

    let task = sync
        .create(
            &user_id,
            CreateTaskRequest::new("  Write report  ", Priority::High).with_category("Work"),
        )
        .await
        .expect("create task");

    assert_eq!(task.title(), "Write report");
    assert_eq!(task.status(), TaskStatus::Active);
    assert_eq!(backend.stored(task.id()).as_ref(), Some(&task));
    assert!(eventually(|| sync.store().snapshot().categories() == ["Work"]).await);
    handle.cancel();
}

/// Tests that a blank title never reaches the backend.
#[rstest]
#[tokio::test]
async fn blank_title_is_rejected_before_backend(backend: InMemoryTaskBackend, user_id: UserId) {
    let sync = sync_over(&backend);

    let result = sync
        .create(&user_id, CreateTaskRequest::new("   ", Priority::Low))
        .await;

    assert!(matches!(
        result,
        Err(TaskSyncError::Validation(TaskDomainError::EmptyTitle))
    ));
    let stored = backend.fetch_tasks(&user_id).await.expect("fetch");
    assert!(stored.is_empty());
}

/// Tests that an update shows locally before the backend confirms it.
#[rstest]
#[tokio::test]
async fn update_is_visible_immediately_and_persisted(
    backend: InMemoryTaskBackend,
    user_id: UserId,
) {
    let sync = sync_over(&backend);
    let task = sync
        .create(&user_id, CreateTaskRequest::new("Draft", Priority::Low))
        .await
        .expect("create task");

    sync.update(
        task.id(),
        TaskPatch::new()
            .with_title("Final")
            .with_priority(Priority::High),
    )
    .await
    .expect("update task");

    let local = sync.store().get(task.id()).expect("task in store");
    assert_eq!(local.title(), "Final");
    assert_eq!(local.priority(), Priority::High);
    let remote = backend.stored(task.id()).expect("task in backend");
    assert_eq!(remote.title(), "Final");
    assert_eq!(remote.description(), task.description());
}

/// Tests that a failed update keeps the optimistic change and records the error.
#[rstest]
#[tokio::test]
async fn failed_update_keeps_optimistic_change(backend: InMemoryTaskBackend, user_id: UserId) {
    let sync = sync_over(&backend);
    let task = sync
        .create(&user_id, CreateTaskRequest::new("Draft", Priority::Low))
        .await
        .expect("create task");
    backend.set_offline(true);

    let result = sync
        .update(task.id(), TaskPatch::new().with_title("Offline edit"))
        .await;

    assert!(matches!(result, Err(TaskSyncError::Backend(_))));
    let state = sync.store().snapshot();
    assert_eq!(
        state.get(task.id()).map(|local| local.title()),
        Some("Offline edit")
    );
    assert!(state.last_error().is_some());
    assert_eq!(
        backend.stored(task.id()).map(|remote| remote.title().to_owned()),
        Some("Draft".to_owned())
    );
}

/// Tests that delete removes the task locally and remotely.
#[rstest]
#[tokio::test]
async fn delete_removes_task_everywhere(backend: InMemoryTaskBackend, user_id: UserId) {
    let sync = sync_over(&backend);
    let handle = sync.subscribe(&user_id).await.expect("subscribe");
    let task = sync
        .create(&user_id, CreateTaskRequest::new("Temporary", Priority::Medium))
        .await
        .expect("create task");

    sync.delete(task.id()).await.expect("delete task");

    assert!(backend.stored(task.id()).is_none());
    assert!(eventually(|| sync.store().snapshot().is_empty()).await);
    assert!(sync.store().snapshot().last_error().is_none());
    handle.cancel();
}

/// Tests that toggling twice returns the task to active.
#[rstest]
#[tokio::test]
async fn toggle_flips_status_both_ways(backend: InMemoryTaskBackend, user_id: UserId) {
    let sync = sync_over(&backend);
    let task = sync
        .create(&user_id, CreateTaskRequest::new("Water plants", Priority::Low))
        .await
        .expect("create task");

    let first = sync.toggle_status(task.id()).await.expect("first toggle");
    let second = sync.toggle_status(task.id()).await.expect("second toggle");

    assert_eq!(first, TaskStatus::Completed);
    assert_eq!(second, TaskStatus::Active);
    assert_eq!(
        backend.stored(task.id()).map(|remote| remote.status()),
        Some(TaskStatus::Active)
    );
}

/// Tests that another user's activity never reaches the subscriber's store.
#[rstest]
#[tokio::test]
async fn snapshots_are_scoped_to_owner(backend: InMemoryTaskBackend, user_id: UserId) {
    let sync = sync_over(&backend);
    let other_sync = sync_over(&backend);
    let other = UserId::new("user-456");
    let handle = sync.subscribe(&user_id).await.expect("subscribe");

    let mine = sync
        .create(&user_id, CreateTaskRequest::new("Mine", Priority::Low))
        .await
        .expect("create own task");
    other_sync
        .create(&other, CreateTaskRequest::new("Theirs", Priority::High))
        .await
        .expect("create other task");
    backend.push_snapshot(&user_id, vec![mine.clone()]);

    assert!(eventually(|| sync.store().snapshot().len() == 1).await);
    let state = sync.store().snapshot();
    assert!(state.tasks().all(|task| task.user_id() == &user_id));
    handle.cancel();
}

/// Tests that a cancelled subscription stops applying snapshots.
#[rstest]
#[tokio::test]
async fn cancelled_subscription_ignores_later_snapshots(
    backend: InMemoryTaskBackend,
    user_id: UserId,
) {
    let sync = sync_over(&backend);
    let writer = sync_over(&backend);
    let handle = sync.subscribe(&user_id).await.expect("subscribe");
    handle.cancel();

    writer
        .create(&user_id, CreateTaskRequest::new("Late", Priority::Low))
        .await
        .expect("create task");

    assert!(handle.is_cancelled());
    assert!(eventually(|| backend.subscriber_count(&user_id) == 0).await);
    assert!(sync.store().snapshot().is_empty());
}
