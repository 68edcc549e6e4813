//! Unit tests for the task module.
//!
//! Tests are organised by component: domain values, the filter predicate,
//! the ranking engine, the collection store, and the sync services.
