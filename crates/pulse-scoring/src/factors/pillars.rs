//! The four pillar scores, each `min(cap, log1p(weightedSum) * scale)`.
//!
//! Log dampening keeps heavy activity from dominating; the cap bounds
//! each pillar's contribution to the final score.

use pulse_core::params::ScoringParams;
use pulse_core::types::{MemberProfile, SignalCounts};

fn dampened(weighted_sum: f64, scale: f64, cap: f64) -> f64 {
    (weighted_sum.ln_1p() * scale).min(cap)
}

/// Received-engagement pillar: reactions other members gave to this
/// member's content.
///
/// `likesReceived*w + commentsReceived*w + storyViewsReceived*w`
pub fn received(counts: &SignalCounts, params: &ScoringParams) -> f64 {
    let weighted = counts.likes_received_30d as f64 * params.received_like_weight
        + counts.comments_received_30d as f64 * params.received_comment_weight
        + counts.story_views_received_30d as f64 * params.received_story_view_weight;
    dampened(weighted, params.scale_received, params.cap_received)
}

/// Creator pillar: content produced. The 7-day post count carries its
/// own weight so a recent posting burst moves the score faster than
/// month-old output.
pub fn creator(counts: &SignalCounts, params: &ScoringParams) -> f64 {
    let weighted = counts.posts_30d as f64 * params.creator_post_weight
        + counts.posts_7d as f64 * params.creator_recent_post_weight
        + counts.stories_30d as f64 * params.creator_story_weight;
    dampened(weighted, params.scale_creator, params.cap_creator)
}

/// Community pillar: outbound engagement toward other members.
pub fn community(counts: &SignalCounts, params: &ScoringParams) -> f64 {
    let weighted = counts.likes_given_30d as f64 * params.community_like_weight
        + counts.comments_given_30d as f64 * params.community_comment_weight
        + counts.follows_given_30d as f64 * params.community_follow_weight
        + counts.chat_messages_30d as f64 * params.community_chat_weight;
    dampened(weighted, params.scale_community, params.cap_community)
}

/// Network pillar: audience size (all-time follower total) plus
/// windowed follower growth.
pub fn network(profile: &MemberProfile, counts: &SignalCounts, params: &ScoringParams) -> f64 {
    let weighted = profile.followers_total as f64 * params.network_follower_weight
        + counts.follows_gained_30d as f64 * params.network_follow_gain_weight;
    dampened(weighted, params.scale_network, params.cap_network)
}
