//! Behavioral penalties. Each condition adds its variant-tunable
//! amount; the thresholds themselves are fixed.

use pulse_core::params::ScoringParams;
use pulse_core::types::{MemberProfile, SignalCounts};

// "Low-quality posting": many posts, almost no received engagement.
const LOW_QUALITY_POSTS_MIN: u64 = 8;
const LOW_QUALITY_RECEIVED_MAX: u64 = 2;

// "Aggressive following": many follows given, almost none gained back.
const AGGRESSIVE_FOLLOWS_GIVEN_MIN: u64 = 120;
const AGGRESSIVE_FOLLOWS_GAINED_MAX: u64 = 3;

// "Low follower ratio": follow-heavy account nobody follows back.
const RATIO_FOLLOWING_MIN: u64 = 150;
const RATIO_FLOOR: f64 = 0.03;

/// Sum of every penalty that applies to the member.
pub fn total(profile: &MemberProfile, counts: &SignalCounts, params: &ScoringParams) -> f64 {
    let mut penalty = 0.0;
    if profile.is_banned {
        penalty += params.banned_penalty;
    }
    if !profile.is_active {
        penalty += params.inactive_penalty;
    }

    let received = counts.likes_received_30d + counts.comments_received_30d;
    if counts.posts_30d >= LOW_QUALITY_POSTS_MIN && received <= LOW_QUALITY_RECEIVED_MAX {
        penalty += params.low_quality_post_penalty;
    }

    if counts.follows_given_30d >= AGGRESSIVE_FOLLOWS_GIVEN_MIN
        && counts.follows_gained_30d <= AGGRESSIVE_FOLLOWS_GAINED_MAX
    {
        penalty += params.aggressive_follow_penalty;
    }

    if profile.following_total >= RATIO_FOLLOWING_MIN && profile.follower_ratio() < RATIO_FLOOR {
        penalty += params.low_follower_ratio_penalty;
    }

    penalty
}
