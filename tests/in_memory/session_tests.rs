//! Session tests: the full sign-in, work, sign-out cycle.

use std::sync::Arc;

use crate::in_memory::helpers::{backend, eventually, sync_over};
use mockable::DefaultClock;
use rstest::rstest;
use todomaster::task::{
    adapters::memory::{InMemoryIdentityProvider, InMemoryTaskBackend},
    domain::Priority,
    ports::IdentityError,
    services::{CreateTaskRequest, TaskSession, TaskSessionError},
};

type MemorySession = TaskSession<InMemoryTaskBackend, InMemoryIdentityProvider, DefaultClock>;

fn session_over(backend: &InMemoryTaskBackend) -> MemorySession {
    TaskSession::new(
        Arc::new(InMemoryIdentityProvider::new()),
        sync_over(backend),
    )
}

/// Tests that tasks survive a sign-out and come back on the next sign-in.
#[rstest]
#[tokio::test]
async fn tasks_return_after_signing_back_in(backend: InMemoryTaskBackend) {
    let session = session_over(&backend);
    let user = session
        .register("ada@example.com", "hunter2")
        .await
        .expect("register");
    let task = session
        .create_task(CreateTaskRequest::new("Plan trip", Priority::High))
        .await
        .expect("create task");

    session.logout().await.expect("logout");
    assert!(session.sync().store().snapshot().is_empty());
    assert!(eventually(|| backend.subscriber_count(&user.id) == 0).await);

    let again = session
        .login("ada@example.com", "hunter2")
        .await
        .expect("login");
    assert_eq!(again.id, user.id);
    assert!(eventually(|| session.sync().store().get(task.id()).is_some()).await);
    assert!(!session.sync().store().snapshot().loading());
}

/// Tests that a second registration with the same email is rejected.
#[rstest]
#[tokio::test]
async fn duplicate_registration_is_rejected(backend: InMemoryTaskBackend) {
    let session = session_over(&backend);
    session
        .register("ada@example.com", "hunter2")
        .await
        .expect("first registration");
    session.logout().await.expect("logout");

    let result = session.register("ada@example.com", "other").await;

    assert!(matches!(
        result,
        Err(TaskSessionError::Identity(IdentityError::AlreadyRegistered(_)))
    ));
    assert!(!session.is_active());
}

/// Tests that a wrong password does not start a session.
#[rstest]
#[tokio::test]
async fn wrong_password_is_rejected(backend: InMemoryTaskBackend) {
    let session = session_over(&backend);
    session
        .register("ada@example.com", "hunter2")
        .await
        .expect("registration");
    session.logout().await.expect("logout");

    let result = session.login("ada@example.com", "wrong").await;

    assert!(matches!(
        result,
        Err(TaskSessionError::Identity(IdentityError::InvalidCredentials))
    ));
    assert!(session.current_user().is_none());
}
