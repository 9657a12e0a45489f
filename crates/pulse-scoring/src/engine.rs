use chrono::{DateTime, Utc};

use pulse_core::params::ScoringParams;
use pulse_core::types::{MemberId, MemberProfile, ScoreResult, SignalWindows};

use crate::formula;

/// Scoring engine. Stateless — each call takes the variant's parameter
/// set, so the same engine scores members across all variants.
pub struct ScoringEngine;

impl ScoringEngine {
    pub fn new() -> Self {
        Self
    }

    /// Score one member from the population snapshot.
    pub fn score_member(
        &self,
        profile: &MemberProfile,
        windows: &SignalWindows,
        params: &ScoringParams,
        now: DateTime<Utc>,
    ) -> ScoreResult {
        let counts = windows.counts_for(profile.id);
        let last_activity = Self::last_activity(profile, windows);
        formula::compute(profile, &counts, last_activity, params, now)
    }

    /// Score a whole population snapshot against one parameter set.
    pub fn process_batch(
        &self,
        profiles: &[MemberProfile],
        windows: &SignalWindows,
        params: &ScoringParams,
        now: DateTime<Utc>,
    ) -> Vec<(MemberId, ScoreResult)> {
        profiles
            .iter()
            .map(|p| (p.id, self.score_member(p, windows, params, now)))
            .collect()
    }

    /// Most recent of the windowed signal timestamps and the legacy
    /// last-seen stamp carried on the profile.
    fn last_activity(profile: &MemberProfile, windows: &SignalWindows) -> Option<DateTime<Utc>> {
        match (windows.last_activity_for(profile.id), profile.last_seen_at) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}
