use chrono::{DateTime, Utc};

use pulse_core::params::ScoringParams;
use pulse_core::types::{MemberProfile, Score, ScoreResult, SignalCounts};

use crate::factors::{penalty, pillars, quality, recency};

/// Full scoring formula.
///
/// ```text
/// rawScore = receivedScore + creatorScore + communityScore + networkScore
///          + qualityBonus − penalty
/// finalScore = clamp(rawScore × recencyFactor, 0, 100)
/// ```
///
/// Pure and total: no finite parameter set makes it fail. Params are
/// assumed already normalized (the config store guarantees bounds).
pub fn compute(
    profile: &MemberProfile,
    counts: &SignalCounts,
    last_activity: Option<DateTime<Utc>>,
    params: &ScoringParams,
    now: DateTime<Utc>,
) -> ScoreResult {
    let received_score = pillars::received(counts, params);
    let creator_score = pillars::creator(counts, params);
    let community_score = pillars::community(counts, params);
    let network_score = pillars::network(profile, counts, params);
    let quality_bonus = quality::bonus(profile, params);
    let penalty = penalty::total(profile, counts, params);

    let raw_score = received_score + creator_score + community_score + network_score
        + quality_bonus
        - penalty;

    let recency_factor = recency::factor(last_activity, now, params);
    let score = Score::new(raw_score * recency_factor);

    ScoreResult {
        score,
        raw_score,
        received_score,
        creator_score,
        community_score,
        network_score,
        quality_bonus,
        penalty,
        recency_factor,
        last_activity_at: last_activity,
    }
}
