/// Recompute scheduler/orchestrator errors.
#[derive(Debug, thiserror::Error)]
pub enum RecomputeError {
    #[error("recompute pass already in progress")]
    AlreadyRunning,

    #[error("recompute pass failed: {reason}")]
    PassFailed { reason: String },
}
