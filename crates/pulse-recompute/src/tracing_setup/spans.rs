//! Span definitions for the recompute surface.
//!
//! Each pass runs inside one span carrying the run id and trigger
//! reason, so every per-member event groups under it.

/// Create a recompute-pass span.
#[macro_export]
macro_rules! pass_span {
    ($run_id:expr, $reason:expr) => {
        tracing::info_span!("pulse.recompute", run_id = %$run_id, reason = %$reason)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RECOMPUTE: &str = "pulse.recompute";
}
