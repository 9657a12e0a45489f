//! Scoring parameter schema: fixed-field record, per-key bounds table,
//! and compiled per-variant defaults.

pub mod defaults;
mod keys;
mod schema;

pub use keys::ParamKey;
pub use schema::ScoringParams;
