//! TOML-backed configuration. Every section tolerates partial input —
//! absent fields take their documented defaults.

pub mod defaults;

mod analytics_config;
mod assignment_config;
mod recompute_config;
mod storage_config;

pub use analytics_config::AnalyticsConfig;
pub use assignment_config::AssignmentConfig;
pub use recompute_config::RecomputeConfig;
pub use storage_config::StorageConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{PulseError, PulseResult};

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    pub storage: StorageConfig,
    pub recompute: RecomputeConfig,
    pub assignment: AssignmentConfig,
    pub analytics: AnalyticsConfig,
}

impl PulseConfig {
    /// Parse a TOML document. Empty and partial documents are valid.
    pub fn from_toml(input: &str) -> PulseResult<Self> {
        toml::from_str(input).map_err(|e| PulseError::ConfigError {
            message: e.to_string(),
        })
    }
}
