use chrono::{DateTime, Utc};

use crate::errors::PulseResult;
use crate::types::{MemberProfile, SignalWindows};

/// Read-only access to the application's member and activity data.
///
/// No retries and no side effects: data-store failures propagate to the
/// orchestrator, which owns the error boundary for a pass.
pub trait IActivitySource: Send + Sync {
    /// Profile snapshot of every existing member.
    fn member_profiles(&self) -> PulseResult<Vec<MemberProfile>>;

    /// Windowed rollup of all ten activity signals: 30-day counts plus
    /// the 7-day post counts, cutoffs computed from `now`.
    fn signal_windows(&self, now: DateTime<Utc>) -> PulseResult<SignalWindows>;
}
