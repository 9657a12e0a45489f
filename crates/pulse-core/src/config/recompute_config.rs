use serde::{Deserialize, Serialize};

use super::defaults;

/// Recompute scheduler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecomputeConfig {
    /// Delay before the one-shot startup pass, giving the data store
    /// time to finish initializing.
    pub startup_delay_secs: u64,
    /// Fixed interval between periodic passes.
    pub interval_secs: u64,
    /// Quiet period an activity burst must respect before the debounced
    /// pass fires.
    pub debounce_secs: u64,
}

impl Default for RecomputeConfig {
    fn default() -> Self {
        Self {
            startup_delay_secs: defaults::DEFAULT_STARTUP_DELAY_SECS,
            interval_secs: defaults::DEFAULT_INTERVAL_SECS,
            debounce_secs: defaults::DEFAULT_DEBOUNCE_SECS,
        }
    }
}
