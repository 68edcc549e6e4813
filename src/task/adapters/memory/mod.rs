//! In-memory adapters for tests and local runs.

mod backend;
mod identity;

pub use backend::InMemoryTaskBackend;
pub use identity::InMemoryIdentityProvider;
