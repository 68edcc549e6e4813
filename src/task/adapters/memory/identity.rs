//! In-memory identity provider.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{User, UserId},
    ports::{IdentityError, IdentityProvider, IdentityResult},
};

/// Thread-safe in-memory account registry with a single signed-in slot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityProvider {
    state: Arc<RwLock<IdentityState>>,
}

#[derive(Debug, Default)]
struct IdentityState {
    accounts: HashMap<String, Account>,
    current: Option<User>,
}

#[derive(Debug)]
struct Account {
    password: String,
    user: User,
}

impl InMemoryIdentityProvider {
    /// Creates a registry with no accounts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry where `user` is already signed in.
    #[must_use]
    pub fn signed_in(user: User) -> Self {
        let provider = Self::default();
        if let Ok(mut state) = provider.state.write() {
            state.current = Some(user);
        }
        provider
    }
}

fn poisoned(err: impl std::fmt::Display) -> IdentityError {
    IdentityError::Transport(err.to_string())
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    fn current_user(&self) -> Option<User> {
        self.state.read().ok().and_then(|state| state.current.clone())
    }

    async fn login(&self, email: &str, password: &str) -> IdentityResult<User> {
        let mut state = self.state.write().map_err(poisoned)?;
        let user = state
            .accounts
            .get(email)
            .filter(|account| account.password == password)
            .map(|account| account.user.clone())
            .ok_or(IdentityError::InvalidCredentials)?;
        state.current = Some(user.clone());
        Ok(user)
    }

    async fn register(&self, email: &str, password: &str) -> IdentityResult<User> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.accounts.contains_key(email) {
            return Err(IdentityError::AlreadyRegistered(email.to_owned()));
        }
        let user = User::new(UserId::new(uuid::Uuid::new_v4().to_string()), email);
        state.accounts.insert(
            email.to_owned(),
            Account {
                password: password.to_owned(),
                user: user.clone(),
            },
        );
        state.current = Some(user.clone());
        Ok(user)
    }

    async fn logout(&self) -> IdentityResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.current = None;
        Ok(())
    }
}
