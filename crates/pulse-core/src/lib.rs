//! # pulse-core
//!
//! Foundation crate for the Pulse engagement engine.
//! Defines all types, the scoring parameter schema, traits, errors,
//! config, and constants. Every other crate in the workspace depends
//! on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod params;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::PulseConfig;
pub use errors::{PulseError, PulseResult};
pub use params::{ParamKey, ScoringParams};
pub use types::{
    Assignment, MemberId, MemberProfile, Score, ScoreResult, ScoreRow, SignalCounts,
    SignalWindows, VariantCode, VariantConfig,
};
