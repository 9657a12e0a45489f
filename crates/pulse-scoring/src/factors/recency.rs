//! Recency-bucket multiplier.

use chrono::{DateTime, Utc};

use pulse_core::constants::NEVER_ACTIVE_AGE_DAYS;
use pulse_core::params::ScoringParams;

/// Six-bucket step function over days since the member's most recent
/// activity:
///
/// ```text
/// ≤1d → recency_1d    ≤7d → recency_7d      ≤30d → recency_30d
/// ≤90d → recency_90d  ≤180d → recency_180d  else → recency_old
/// ```
///
/// Never-active members age as 365 days and land in the last bucket.
pub fn factor(
    last_activity: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    params: &ScoringParams,
) -> f64 {
    let days = match last_activity {
        Some(at) => (now - at).num_seconds().max(0) as f64 / 86_400.0,
        None => NEVER_ACTIVE_AGE_DAYS as f64,
    };
    if days <= 1.0 {
        params.recency_1d
    } else if days <= 7.0 {
        params.recency_7d
    } else if days <= 30.0 {
        params.recency_30d
    } else if days <= 90.0 {
        params.recency_90d
    } else if days <= 180.0 {
        params.recency_180d
    } else {
        params.recency_old
    }
}
