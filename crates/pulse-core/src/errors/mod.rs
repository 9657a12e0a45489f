//! Error taxonomy for the Pulse engine.
//!
//! Subsystem errors live in their own enums and convert into the
//! top-level [`PulseError`] via `From`. Malformed configuration values
//! are never errors anywhere in the engine — they are normalized away
//! by clamping and compiled-default fallback.

mod recompute_error;
mod storage_error;

pub use recompute_error::RecomputeError;
pub use storage_error::{to_storage_err, StorageError};

/// Result alias used across the workspace.
pub type PulseResult<T> = Result<T, PulseError>;

/// Top-level error for all Pulse operations.
#[derive(Debug, thiserror::Error)]
pub enum PulseError {
    #[error("member not found: {id}")]
    MemberNotFound { id: i64 },

    #[error("invalid variant code {code:?}: {reason}")]
    InvalidVariantCode { code: String, reason: String },

    #[error("config error: {message}")]
    ConfigError { message: String },

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("recompute error: {0}")]
    RecomputeError(#[from] RecomputeError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
