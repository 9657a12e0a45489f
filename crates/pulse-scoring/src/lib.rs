//! # pulse-scoring
//!
//! Pure engagement scoring: four log-dampened pillar scores, a profile
//! quality bonus, behavioral penalties, and a six-bucket recency
//! multiplier. No I/O lives here — the recompute orchestrator feeds
//! the engine population snapshots and persists the results.

pub mod engine;
pub mod factors;
pub mod formula;

pub use engine::ScoringEngine;
