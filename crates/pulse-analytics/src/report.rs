//! The dashboard payload: rollup + recommendations + last run.

use serde::Serialize;

use pulse_core::config::AnalyticsConfig;
use pulse_core::types::{RunRecord, ScoreRow, VariantConfig};

use crate::recommend::{recommend, Recommendation};
use crate::rollup::{rollup, VariantPerformance};

/// Everything the admin dashboard renders in one call.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub performance_by_variant: Vec<VariantPerformance>,
    pub recommendations: Vec<Recommendation>,
    pub last_run: Option<RunRecord>,
}

pub struct AnalyticsEngine {
    options: AnalyticsConfig,
}

impl AnalyticsEngine {
    pub fn new(options: AnalyticsConfig) -> Self {
        Self { options }
    }

    pub fn build_report(
        &self,
        scores: &[ScoreRow],
        configs: &[VariantConfig],
        last_run: Option<RunRecord>,
    ) -> AnalyticsReport {
        let performance = rollup(scores);
        let recommendations = recommend(configs, &performance, &self.options);
        AnalyticsReport {
            performance_by_variant: performance,
            recommendations,
            last_run,
        }
    }
}
