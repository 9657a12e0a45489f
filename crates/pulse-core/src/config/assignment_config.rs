use serde::{Deserialize, Serialize};

use super::defaults;

/// Variant assignment configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignmentConfig {
    /// Variant code assigned when no variant qualifies for traffic.
    pub fallback_variant: String,
}

impl Default for AssignmentConfig {
    fn default() -> Self {
        Self {
            fallback_variant: defaults::DEFAULT_FALLBACK_VARIANT.to_string(),
        }
    }
}
