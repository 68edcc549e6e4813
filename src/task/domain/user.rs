//! Authenticated user as seen by the task core.

use super::UserId;
use serde::{Deserialize, Serialize};

/// A signed-in user. The core only uses the identifier to scope queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identity-provider user identifier.
    pub id: UserId,
    /// Sign-in email address.
    pub email: String,
    /// Optional display name.
    pub display_name: Option<String>,
}

impl User {
    /// Creates a user without a display name.
    #[must_use]
    pub fn new(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            display_name: None,
        }
    }
}
