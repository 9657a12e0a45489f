//! Variant analytics: performance rollups over stored scores and
//! rule-based tuning recommendations.
//!
//! Everything here is read-only and advisory. Rollups average the
//! persisted score rows per variant; the recommender compares variants
//! against the configured baseline and proposes parameter patches and
//! traffic shifts, but never applies them.

pub mod recommend;
pub mod report;
pub mod rollup;

pub use recommend::{recommend, Recommendation, RecommendationAction};
pub use report::{AnalyticsEngine, AnalyticsReport};
pub use rollup::{rollup, VariantPerformance};
