//! Personal task tracking core.
//!
//! This module holds the task collection, the filter/rank derivation that
//! produces the display list, and the reconciliation between optimistic
//! local edits and full snapshots pushed by the persistence backend. It
//! follows hexagonal architecture:
//!
//! - Domain types and pure derivations in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
