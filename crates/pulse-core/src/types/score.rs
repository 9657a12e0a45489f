use std::fmt;
use std::ops::Mul;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{SCORE_MAX, SCORE_MIN};

use super::{MemberId, SignalCounts, VariantCode};

/// Engagement score clamped to [0.0, 100.0].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Score(f64);

impl Score {
    /// Members above this are surfaced as highly engaged.
    pub const HIGH: f64 = 70.0;
    /// Members below this are candidates for re-engagement campaigns.
    pub const LOW: f64 = 15.0;

    /// Create a new Score, clamping to [0.0, 100.0].
    pub fn new(value: f64) -> Self {
        Self(value.clamp(SCORE_MIN, SCORE_MAX))
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_high(self) -> bool {
        self.0 >= Self::HIGH
    }

    pub fn is_low(self) -> bool {
        self.0 < Self::LOW
    }
}

impl Default for Score {
    fn default() -> Self {
        Self(0.0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<f64> for Score {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Score> for f64 {
    fn from(s: Score) -> Self {
        s.0
    }
}

impl Mul<f64> for Score {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.0 * rhs)
    }
}

/// Round to 2 decimal places — applied to every figure that gets
/// persisted or reported.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Output of one score computation, sub-scores included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Final clamped score.
    pub score: Score,
    /// Pre-recency sum of pillars plus bonus minus penalty. May be
    /// negative or above 100; only the final score is clamped.
    pub raw_score: f64,
    pub received_score: f64,
    pub creator_score: f64,
    pub community_score: f64,
    pub network_score: f64,
    pub quality_bonus: f64,
    pub penalty: f64,
    /// Recency-bucket multiplier that was applied.
    pub recency_factor: f64,
    /// Derived most-recent-activity stamp, if the member ever acted.
    pub last_activity_at: Option<DateTime<Utc>>,
}

/// Persisted engagement score row — one per existing member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRow {
    pub member_id: MemberId,
    pub variant_code: VariantCode,
    pub score: f64,
    pub raw_score: f64,
    pub received_score: f64,
    pub creator_score: f64,
    pub community_score: f64,
    pub network_score: f64,
    pub quality_bonus: f64,
    pub penalty: f64,
    /// The raw per-signal counts the score was computed from.
    pub signal_counts: SignalCounts,
    pub last_activity_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl ScoreRow {
    /// Build the persisted row from a computation result, rounding every
    /// figure to 2 decimals.
    pub fn from_result(
        member_id: MemberId,
        variant_code: VariantCode,
        result: &ScoreResult,
        counts: SignalCounts,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            member_id,
            variant_code,
            score: round2(result.score.value()),
            raw_score: round2(result.raw_score),
            received_score: round2(result.received_score),
            creator_score: round2(result.creator_score),
            community_score: round2(result.community_score),
            network_score: round2(result.network_score),
            quality_bonus: round2(result.quality_bonus),
            penalty: round2(result.penalty),
            signal_counts: counts,
            last_activity_at: result.last_activity_at,
            updated_at,
        }
    }
}
