//! View tests for the filtered, ranked display list.

use crate::in_memory::helpers::{backend, eventually, sync_over, user_id};
use chrono::{TimeDelta, Utc};
use rstest::rstest;
use todomaster::task::{
    adapters::memory::InMemoryTaskBackend,
    domain::{
        FilterPatch, PersistedTaskData, Priority, SortMode, StatusFilter, Task, TaskId,
        TaskPatch, TaskStatus, UserId,
    },
    services::CreateTaskRequest,
};

fn snapshot_task(
    user_id: &UserId,
    title: &str,
    priority: Priority,
    due_in: Option<TimeDelta>,
) -> Task {
    let now = Utc::now();
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        user_id: user_id.clone(),
        title: title.to_owned(),
        description: None,
        created_at: now,
        deadline: due_in.map(|offset| now + offset),
        priority,
        status: TaskStatus::Active,
        category: None,
        tags: Vec::new(),
    })
}

fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(Task::title).collect()
}

/// Tests smart ranking over a snapshot delivered by the backend.
#[rstest]
#[tokio::test]
async fn smart_ranking_weighs_priority_against_deadline(
    backend: InMemoryTaskBackend,
    user_id: UserId,
) {
    let sync = sync_over(&backend);
    let handle = sync.subscribe(&user_id).await.expect("subscribe");
    let far_high = snapshot_task(
        &user_id,
        "Quarterly plan",
        Priority::High,
        Some(TimeDelta::days(10)),
    );
    let near_low = snapshot_task(
        &user_id,
        "Buy milk",
        Priority::Low,
        Some(TimeDelta::hours(1)),
    );
    let undated_medium = snapshot_task(&user_id, "Read book", Priority::Medium, None);
    backend.push_snapshot(
        &user_id,
        vec![near_low.clone(), undated_medium, far_high.clone()],
    );

    assert!(eventually(|| sync.store().snapshot().len() == 3).await);
    let visible = sync.visible_tasks();

    assert_eq!(titles(&visible), vec!["Quarterly plan", "Buy milk", "Read book"]);
    handle.cancel();
}

/// Tests that completed tasks always follow active ones.
#[rstest]
#[tokio::test]
async fn completed_tasks_rank_after_active(backend: InMemoryTaskBackend, user_id: UserId) {
    let sync = sync_over(&backend);
    let urgent = sync
        .create(
            &user_id,
            CreateTaskRequest::new("Urgent", Priority::High)
                .with_deadline(Utc::now() + TimeDelta::minutes(5)),
        )
        .await
        .expect("create urgent task");
    sync.create(&user_id, CreateTaskRequest::new("Someday", Priority::Low))
        .await
        .expect("create idle task");

    sync.toggle_status(urgent.id()).await.expect("toggle");

    assert_eq!(titles(&sync.visible_tasks()), vec!["Someday", "Urgent"]);
}

/// Tests deadline ordering with undated tasks last.
#[rstest]
fn deadline_mode_puts_undated_tasks_last(user_id: UserId) {
    let sync = sync_over(&InMemoryTaskBackend::new());
    sync.store().replace_all(vec![
        snapshot_task(&user_id, "Undated", Priority::High, None),
        snapshot_task(&user_id, "Later", Priority::Low, Some(TimeDelta::days(2))),
        snapshot_task(&user_id, "Sooner", Priority::Low, Some(TimeDelta::hours(2))),
    ]);
    sync.store().set_sort_mode(SortMode::Deadline);

    assert_eq!(
        titles(&sync.visible_tasks()),
        vec!["Sooner", "Later", "Undated"]
    );
}

/// Tests that filters narrow the view and can be reset.
#[rstest]
fn filters_narrow_and_reset(user_id: UserId) {
    let sync = sync_over(&InMemoryTaskBackend::new());
    let mut work = snapshot_task(&user_id, "Report", Priority::High, None);
    let home = snapshot_task(&user_id, "Laundry", Priority::Low, None);
    work.apply(
        &TaskPatch::new()
            .with_category("Work")
            .with_status(TaskStatus::Completed),
    );
    sync.store().replace_all(vec![work, home]);

    sync.store()
        .set_filter(FilterPatch::category(Some("Work".to_owned())));
    assert_eq!(titles(&sync.visible_tasks()), vec!["Report"]);

    sync.store().set_filter(FilterPatch::status(StatusFilter::Active));
    assert!(sync.visible_tasks().is_empty());

    sync.store().set_filter(FilterPatch::category(None));
    assert_eq!(titles(&sync.visible_tasks()), vec!["Laundry"]);

    sync.store().set_filter(FilterPatch::priority(Some(Priority::High)));
    assert!(sync.visible_tasks().is_empty());
}
