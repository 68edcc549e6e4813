//! Step definitions for task synchronisation scenarios.

pub mod when;
