use serde::{Deserialize, Serialize};

use super::defaults;

/// Analytics & recommender configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Variant every comparison is made against.
    pub baseline_variant: String,
    /// Minimum scored population before a variant is compared at all.
    pub min_sample_size: usize,
    /// Size of a proposed traffic shift, in percentage points.
    pub traffic_shift_points: u8,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            baseline_variant: defaults::DEFAULT_BASELINE_VARIANT.to_string(),
            min_sample_size: defaults::DEFAULT_MIN_SAMPLE_SIZE,
            traffic_shift_points: defaults::DEFAULT_TRAFFIC_SHIFT_POINTS,
        }
    }
}
