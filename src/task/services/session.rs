//! Session lifecycle: ties the snapshot subscription and the task store to
//! the signed-in user.

use std::sync::Arc;

use mockable::Clock;
use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::Mutex as TransitionLock;
use tracing::{info, warn};

use super::{CreateTaskRequest, SubscriptionHandle, TaskSyncError, TaskSyncService};
use crate::task::{
    domain::{Task, User},
    ports::{IdentityError, IdentityProvider, TaskBackend},
};

/// Errors returned by session operations.
#[derive(Debug, Error)]
pub enum TaskSessionError {
    /// The identity provider rejected the call.
    #[error(transparent)]
    Identity(#[from] IdentityError),
    /// A task sync operation failed.
    #[error(transparent)]
    Sync(#[from] TaskSyncError),
    /// The operation needs a signed-in user.
    #[error("no active session")]
    NoActiveSession,
}

/// Result type for session operations.
pub type TaskSessionResult<T> = Result<T, TaskSessionError>;

struct ActiveSession {
    user: User,
    subscription: SubscriptionHandle,
}

/// A user's task session.
///
/// Starting a session opens the snapshot subscription and performs an
/// initial fetch. Ending it cancels the subscription and clears the store
/// before signing out. Starts and sign-outs are serialised, so a sign-out
/// issued while a start is still fetching tears that session down once it is
/// installed.
pub struct TaskSession<B, I, C>
where
    B: TaskBackend,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    identity: Arc<I>,
    sync: TaskSyncService<B, C>,
    active: Mutex<Option<ActiveSession>>,
    transition: TransitionLock<()>,
}

impl<B, I, C> TaskSession<B, I, C>
where
    B: TaskBackend,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    /// Creates a session with no signed-in user.
    #[must_use]
    pub fn new(identity: Arc<I>, sync: TaskSyncService<B, C>) -> Self {
        Self {
            identity,
            sync,
            active: Mutex::new(None),
            transition: TransitionLock::new(()),
        }
    }

    /// Returns the sync service for task intents.
    #[must_use]
    pub const fn sync(&self) -> &TaskSyncService<B, C> {
        &self.sync
    }

    /// Returns the signed-in user of the active session.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.active.lock().as_ref().map(|session| session.user.clone())
    }

    /// Returns `true` while a session is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.lock().is_some()
    }

    /// Starts a session for an already signed-in user, if there is one.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSessionError::Sync`] when the subscription cannot be
    /// opened.
    pub async fn resume(&self) -> TaskSessionResult<Option<User>> {
        match self.identity.current_user() {
            Some(user) => self.start(user).await.map(Some),
            None => Ok(None),
        }
    }

    /// Signs in and starts a session.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSessionError::Identity`] on rejected credentials or
    /// [`TaskSessionError::Sync`] when the subscription cannot be opened.
    pub async fn login(&self, email: &str, password: &str) -> TaskSessionResult<User> {
        let user = self.identity.login(email, password).await?;
        self.start(user).await
    }

    /// Registers, signs in, and starts a session.
    ///
    /// # Errors
    ///
    /// Same as [`TaskSession::login`].
    pub async fn register(&self, email: &str, password: &str) -> TaskSessionResult<User> {
        let user = self.identity.register(email, password).await?;
        self.start(user).await
    }

    /// Starts a session for `user`, replacing any active one.
    ///
    /// A failed initial fetch does not abort the session: the error is
    /// recorded on the store and the subscription keeps running.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSessionError::Sync`] when the subscription cannot be
    /// opened; no session is active afterwards.
    pub async fn start(&self, user: User) -> TaskSessionResult<User> {
        let _transition = self.transition.lock().await;
        self.end_active();
        let subscription = self.sync.subscribe(&user.id).await?;
        if let Err(err) = self.sync.load(&user.id).await {
            warn!(user_id = %user.id, error = %err, "initial task fetch failed");
        }
        info!(user_id = %user.id, "task session started");
        *self.active.lock() = Some(ActiveSession {
            user: user.clone(),
            subscription,
        });
        Ok(user)
    }

    /// Creates a task owned by the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSessionError::NoActiveSession`] when nobody is signed
    /// in, otherwise any [`TaskSyncError`] from creation.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskSessionResult<Task> {
        let user = self
            .current_user()
            .ok_or(TaskSessionError::NoActiveSession)?;
        Ok(self.sync.create(&user.id, request).await?)
    }

    /// Ends the session and signs out.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSessionError::Identity`] when sign-out fails; the local
    /// session is already torn down by then.
    pub async fn logout(&self) -> TaskSessionResult<()> {
        let _transition = self.transition.lock().await;
        self.end_active();
        self.identity.logout().await?;
        Ok(())
    }

    fn end_active(&self) {
        let previous = self.active.lock().take();
        if let Some(session) = previous {
            session.subscription.cancel();
            self.sync.store().clear();
            info!(user_id = %session.user.id, "task session ended");
        }
    }
}
