//! # pulse-storage
//!
//! SQLite persistence for the Pulse engine: a single-writer connection
//! pool with WAL, versioned migrations, the activity-signal rollup
//! queries, and CRUD for the engine-owned rows (variant configs,
//! assignments, engagement scores, run history).

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

// Query modules wrap every rusqlite error through this.
pub use pulse_core::errors::to_storage_err;
