//! Todomaster: personal task tracking core.
//!
//! This crate provides the task state and ranking engine behind a personal
//! task tracker: the in-memory task collection, filtering and urgency
//! ranking of the display list, and reconciliation of optimistic local edits
//! with full snapshots pushed by a persistence backend.
//!
//! # Architecture
//!
//! Todomaster follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`task`]: Task collection, ranking, and backend sync
//! - [`config`]: Engine configuration
//! - [`telemetry`]: Logging setup

pub mod config;
pub mod task;
pub mod telemetry;
