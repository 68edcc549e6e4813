//! Identity provider port.

use crate::task::domain::User;
use async_trait::async_trait;
use thiserror::Error;

/// Result type for identity operations.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Authentication contract. Opaque to the core beyond supplying a user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the currently signed-in user, if any.
    fn current_user(&self) -> Option<User>;

    /// Signs in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::InvalidCredentials`] on a rejected login.
    async fn login(&self, email: &str, password: &str) -> IdentityResult<User>;

    /// Creates an account and signs it in.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::AlreadyRegistered`] when the email is taken.
    async fn register(&self, email: &str, password: &str) -> IdentityResult<User>;

    /// Signs out the current user.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Transport`] when the call fails.
    async fn logout(&self) -> IdentityResult<()>;
}

/// Errors returned by identity provider implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// Email or password was rejected.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The email already belongs to an account.
    #[error("email already registered: {0}")]
    AlreadyRegistered(String),

    /// The call failed in transit.
    #[error("transport error: {0}")]
    Transport(String),
}
