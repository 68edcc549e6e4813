//! Port contracts for the task core.
//!
//! Ports define the collaborator interfaces the core depends on: the task
//! persistence backend and the identity provider.

pub mod backend;
pub mod identity;

pub use backend::{SnapshotEvent, SnapshotFeed, TaskBackend, TaskBackendError, TaskBackendResult};
pub use identity::{IdentityError, IdentityProvider, IdentityResult};
