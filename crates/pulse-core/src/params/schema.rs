use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{defaults, ParamKey};

/// A variant's full parameter set: a fixed-schema record, not a dynamic
/// map, so a new tunable cannot be added without extending the accessors
/// and bounds table below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringParams {
    // Received-engagement pillar
    pub received_like_weight: f64,
    pub received_comment_weight: f64,
    pub received_story_view_weight: f64,
    pub scale_received: f64,
    pub cap_received: f64,
    // Creator pillar
    pub creator_post_weight: f64,
    pub creator_recent_post_weight: f64,
    pub creator_story_weight: f64,
    pub scale_creator: f64,
    pub cap_creator: f64,
    // Community pillar
    pub community_like_weight: f64,
    pub community_comment_weight: f64,
    pub community_follow_weight: f64,
    pub community_chat_weight: f64,
    pub scale_community: f64,
    pub cap_community: f64,
    // Network pillar
    pub network_follower_weight: f64,
    pub network_follow_gain_weight: f64,
    pub scale_network: f64,
    pub cap_network: f64,
    // Quality bonuses
    pub verified_bonus: f64,
    pub online_bonus: f64,
    pub photo_bonus: f64,
    pub field_bonus: f64,
    // Penalties
    pub banned_penalty: f64,
    pub inactive_penalty: f64,
    pub low_quality_post_penalty: f64,
    pub aggressive_follow_penalty: f64,
    pub low_follower_ratio_penalty: f64,
    // Recency-bucket multipliers
    pub recency_1d: f64,
    pub recency_7d: f64,
    pub recency_30d: f64,
    pub recency_90d: f64,
    pub recency_180d: f64,
    pub recency_old: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        defaults::baseline()
    }
}

impl ScoringParams {
    /// Read one tunable by key.
    pub fn get(&self, key: ParamKey) -> f64 {
        match key {
            ParamKey::ReceivedLikeWeight => self.received_like_weight,
            ParamKey::ReceivedCommentWeight => self.received_comment_weight,
            ParamKey::ReceivedStoryViewWeight => self.received_story_view_weight,
            ParamKey::ScaleReceived => self.scale_received,
            ParamKey::CapReceived => self.cap_received,
            ParamKey::CreatorPostWeight => self.creator_post_weight,
            ParamKey::CreatorRecentPostWeight => self.creator_recent_post_weight,
            ParamKey::CreatorStoryWeight => self.creator_story_weight,
            ParamKey::ScaleCreator => self.scale_creator,
            ParamKey::CapCreator => self.cap_creator,
            ParamKey::CommunityLikeWeight => self.community_like_weight,
            ParamKey::CommunityCommentWeight => self.community_comment_weight,
            ParamKey::CommunityFollowWeight => self.community_follow_weight,
            ParamKey::CommunityChatWeight => self.community_chat_weight,
            ParamKey::ScaleCommunity => self.scale_community,
            ParamKey::CapCommunity => self.cap_community,
            ParamKey::NetworkFollowerWeight => self.network_follower_weight,
            ParamKey::NetworkFollowGainWeight => self.network_follow_gain_weight,
            ParamKey::ScaleNetwork => self.scale_network,
            ParamKey::CapNetwork => self.cap_network,
            ParamKey::VerifiedBonus => self.verified_bonus,
            ParamKey::OnlineBonus => self.online_bonus,
            ParamKey::PhotoBonus => self.photo_bonus,
            ParamKey::FieldBonus => self.field_bonus,
            ParamKey::BannedPenalty => self.banned_penalty,
            ParamKey::InactivePenalty => self.inactive_penalty,
            ParamKey::LowQualityPostPenalty => self.low_quality_post_penalty,
            ParamKey::AggressiveFollowPenalty => self.aggressive_follow_penalty,
            ParamKey::LowFollowerRatioPenalty => self.low_follower_ratio_penalty,
            ParamKey::Recency1d => self.recency_1d,
            ParamKey::Recency7d => self.recency_7d,
            ParamKey::Recency30d => self.recency_30d,
            ParamKey::Recency90d => self.recency_90d,
            ParamKey::Recency180d => self.recency_180d,
            ParamKey::RecencyOld => self.recency_old,
        }
    }

    /// Write one tunable by key. No validation here — callers run
    /// [`clamped`](Self::clamped) or [`normalized`](Self::normalized)
    /// before the value is used or persisted.
    pub fn set(&mut self, key: ParamKey, value: f64) {
        match key {
            ParamKey::ReceivedLikeWeight => self.received_like_weight = value,
            ParamKey::ReceivedCommentWeight => self.received_comment_weight = value,
            ParamKey::ReceivedStoryViewWeight => self.received_story_view_weight = value,
            ParamKey::ScaleReceived => self.scale_received = value,
            ParamKey::CapReceived => self.cap_received = value,
            ParamKey::CreatorPostWeight => self.creator_post_weight = value,
            ParamKey::CreatorRecentPostWeight => self.creator_recent_post_weight = value,
            ParamKey::CreatorStoryWeight => self.creator_story_weight = value,
            ParamKey::ScaleCreator => self.scale_creator = value,
            ParamKey::CapCreator => self.cap_creator = value,
            ParamKey::CommunityLikeWeight => self.community_like_weight = value,
            ParamKey::CommunityCommentWeight => self.community_comment_weight = value,
            ParamKey::CommunityFollowWeight => self.community_follow_weight = value,
            ParamKey::CommunityChatWeight => self.community_chat_weight = value,
            ParamKey::ScaleCommunity => self.scale_community = value,
            ParamKey::CapCommunity => self.cap_community = value,
            ParamKey::NetworkFollowerWeight => self.network_follower_weight = value,
            ParamKey::NetworkFollowGainWeight => self.network_follow_gain_weight = value,
            ParamKey::ScaleNetwork => self.scale_network = value,
            ParamKey::CapNetwork => self.cap_network = value,
            ParamKey::VerifiedBonus => self.verified_bonus = value,
            ParamKey::OnlineBonus => self.online_bonus = value,
            ParamKey::PhotoBonus => self.photo_bonus = value,
            ParamKey::FieldBonus => self.field_bonus = value,
            ParamKey::BannedPenalty => self.banned_penalty = value,
            ParamKey::InactivePenalty => self.inactive_penalty = value,
            ParamKey::LowQualityPostPenalty => self.low_quality_post_penalty = value,
            ParamKey::AggressiveFollowPenalty => self.aggressive_follow_penalty = value,
            ParamKey::LowFollowerRatioPenalty => self.low_follower_ratio_penalty = value,
            ParamKey::Recency1d => self.recency_1d = value,
            ParamKey::Recency7d => self.recency_7d = value,
            ParamKey::Recency30d => self.recency_30d = value,
            ParamKey::Recency90d => self.recency_90d = value,
            ParamKey::Recency180d => self.recency_180d = value,
            ParamKey::RecencyOld => self.recency_old = value,
        }
    }

    /// Write-path normalization: clamp every finite value to its bound
    /// edges; non-finite values fall back to the variant's compiled
    /// default. Idempotent.
    pub fn clamped(&self, variant_code: &str) -> ScoringParams {
        let fallback = defaults::for_variant(variant_code);
        let mut out = self.clone();
        for key in ParamKey::ALL {
            let (min, max) = key.bounds();
            let v = out.get(key);
            if v.is_finite() {
                out.set(key, v.clamp(min, max));
            } else {
                out.set(key, fallback.get(key));
            }
        }
        out
    }

    /// Read-path normalization for rows edited outside the engine: any
    /// value that is non-finite or strictly out of bounds is replaced by
    /// the variant's compiled default for that key (not the global
    /// default). Idempotent; in-bound values pass through.
    pub fn normalized(&self, variant_code: &str) -> ScoringParams {
        let fallback = defaults::for_variant(variant_code);
        let mut out = self.clone();
        for key in ParamKey::ALL {
            let (min, max) = key.bounds();
            let v = out.get(key);
            if !v.is_finite() || v < min || v > max {
                out.set(key, fallback.get(key));
            }
        }
        out
    }

    /// Decode a stored JSON parameter object. Keys that are absent,
    /// unknown, non-numeric, or out of bounds resolve to the variant's
    /// compiled default; everything else passes through.
    pub fn from_stored(variant_code: &str, stored: &serde_json::Value) -> ScoringParams {
        let mut out = defaults::for_variant(variant_code);
        if let Some(map) = stored.as_object() {
            for key in ParamKey::ALL {
                let (min, max) = key.bounds();
                if let Some(v) = map.get(key.as_str()).and_then(serde_json::Value::as_f64) {
                    if v.is_finite() && v >= min && v <= max {
                        out.set(key, v);
                    }
                }
            }
        }
        out
    }

    /// Merge a partial patch. Unknown names are ignored; values are taken
    /// verbatim, so callers follow up with [`clamped`](Self::clamped).
    /// Returns the number of tunables that were recognized.
    pub fn apply_patch(&mut self, patch: &HashMap<String, f64>) -> usize {
        let mut applied = 0;
        for (name, value) in patch {
            if let Some(key) = ParamKey::parse(name) {
                self.set(key, *value);
                applied += 1;
            }
        }
        applied
    }
}
