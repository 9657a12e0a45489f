//! Compiled per-variant parameter defaults.
//!
//! Each built-in variant carries its own complete default set; unknown
//! variant codes resolve to the baseline. These are the values every
//! normalization fallback lands on, so they all sit inside the
//! documented bounds.

use super::ScoringParams;
use crate::constants::VARIANT_B;

/// Baseline defaults — variant "A".
pub fn baseline() -> ScoringParams {
    ScoringParams {
        received_like_weight: 1.0,
        received_comment_weight: 2.4,
        received_story_view_weight: 0.35,
        scale_received: 7.5,
        cap_received: 36.0,
        creator_post_weight: 3.0,
        creator_recent_post_weight: 1.8,
        creator_story_weight: 1.2,
        scale_creator: 8.0,
        cap_creator: 30.0,
        community_like_weight: 0.8,
        community_comment_weight: 1.5,
        community_follow_weight: 1.0,
        community_chat_weight: 0.25,
        scale_community: 5.5,
        cap_community: 20.0,
        network_follower_weight: 0.9,
        network_follow_gain_weight: 2.2,
        scale_network: 5.0,
        cap_network: 14.0,
        verified_bonus: 3.0,
        online_bonus: 1.5,
        photo_bonus: 2.0,
        field_bonus: 0.75,
        banned_penalty: 60.0,
        inactive_penalty: 25.0,
        low_quality_post_penalty: 6.0,
        aggressive_follow_penalty: 10.0,
        low_follower_ratio_penalty: 8.0,
        recency_1d: 1.15,
        recency_7d: 1.08,
        recency_30d: 1.0,
        recency_90d: 0.92,
        recency_180d: 0.84,
        recency_old: 0.76,
    }
}

/// Growth-tuned defaults — variant "B" leans harder on creator output
/// and network growth, and forgives inactivity a little less.
pub fn growth() -> ScoringParams {
    ScoringParams {
        received_like_weight: 1.0,
        received_comment_weight: 2.6,
        received_story_view_weight: 0.4,
        scale_received: 7.5,
        cap_received: 36.0,
        creator_post_weight: 3.4,
        creator_recent_post_weight: 2.2,
        creator_story_weight: 1.5,
        scale_creator: 8.5,
        cap_creator: 32.0,
        community_like_weight: 0.8,
        community_comment_weight: 1.6,
        community_follow_weight: 1.2,
        community_chat_weight: 0.3,
        scale_community: 5.5,
        cap_community: 20.0,
        network_follower_weight: 0.9,
        network_follow_gain_weight: 2.8,
        scale_network: 5.5,
        cap_network: 16.0,
        verified_bonus: 3.0,
        online_bonus: 1.5,
        photo_bonus: 2.0,
        field_bonus: 0.75,
        banned_penalty: 60.0,
        inactive_penalty: 20.0,
        low_quality_post_penalty: 6.0,
        aggressive_follow_penalty: 12.0,
        low_follower_ratio_penalty: 8.0,
        recency_1d: 1.2,
        recency_7d: 1.12,
        recency_30d: 1.02,
        recency_90d: 0.9,
        recency_180d: 0.8,
        recency_old: 0.7,
    }
}

/// Compiled defaults for a variant code. Codes without a built-in set
/// use the baseline.
pub fn for_variant(code: &str) -> ScoringParams {
    match code {
        VARIANT_B => growth(),
        _ => baseline(),
    }
}
