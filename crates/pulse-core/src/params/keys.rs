use super::defaults;

/// Every tunable in a variant's parameter set.
///
/// Adding a tunable here forces the bounds table, the schema accessors,
/// and the compiled defaults to be extended — the matches are exhaustive
/// on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKey {
    // Received-engagement pillar
    ReceivedLikeWeight,
    ReceivedCommentWeight,
    ReceivedStoryViewWeight,
    ScaleReceived,
    CapReceived,
    // Creator pillar
    CreatorPostWeight,
    CreatorRecentPostWeight,
    CreatorStoryWeight,
    ScaleCreator,
    CapCreator,
    // Community pillar
    CommunityLikeWeight,
    CommunityCommentWeight,
    CommunityFollowWeight,
    CommunityChatWeight,
    ScaleCommunity,
    CapCommunity,
    // Network pillar
    NetworkFollowerWeight,
    NetworkFollowGainWeight,
    ScaleNetwork,
    CapNetwork,
    // Quality bonuses
    VerifiedBonus,
    OnlineBonus,
    PhotoBonus,
    FieldBonus,
    // Penalties
    BannedPenalty,
    InactivePenalty,
    LowQualityPostPenalty,
    AggressiveFollowPenalty,
    LowFollowerRatioPenalty,
    // Recency-bucket multipliers
    Recency1d,
    Recency7d,
    Recency30d,
    Recency90d,
    Recency180d,
    RecencyOld,
}

impl ParamKey {
    /// All tunables, in schema order.
    pub const ALL: [ParamKey; 35] = [
        ParamKey::ReceivedLikeWeight,
        ParamKey::ReceivedCommentWeight,
        ParamKey::ReceivedStoryViewWeight,
        ParamKey::ScaleReceived,
        ParamKey::CapReceived,
        ParamKey::CreatorPostWeight,
        ParamKey::CreatorRecentPostWeight,
        ParamKey::CreatorStoryWeight,
        ParamKey::ScaleCreator,
        ParamKey::CapCreator,
        ParamKey::CommunityLikeWeight,
        ParamKey::CommunityCommentWeight,
        ParamKey::CommunityFollowWeight,
        ParamKey::CommunityChatWeight,
        ParamKey::ScaleCommunity,
        ParamKey::CapCommunity,
        ParamKey::NetworkFollowerWeight,
        ParamKey::NetworkFollowGainWeight,
        ParamKey::ScaleNetwork,
        ParamKey::CapNetwork,
        ParamKey::VerifiedBonus,
        ParamKey::OnlineBonus,
        ParamKey::PhotoBonus,
        ParamKey::FieldBonus,
        ParamKey::BannedPenalty,
        ParamKey::InactivePenalty,
        ParamKey::LowQualityPostPenalty,
        ParamKey::AggressiveFollowPenalty,
        ParamKey::LowFollowerRatioPenalty,
        ParamKey::Recency1d,
        ParamKey::Recency7d,
        ParamKey::Recency30d,
        ParamKey::Recency90d,
        ParamKey::Recency180d,
        ParamKey::RecencyOld,
    ];

    /// Stable string name, as stored in config JSON and accepted in patches.
    pub fn as_str(self) -> &'static str {
        match self {
            ParamKey::ReceivedLikeWeight => "received_like_weight",
            ParamKey::ReceivedCommentWeight => "received_comment_weight",
            ParamKey::ReceivedStoryViewWeight => "received_story_view_weight",
            ParamKey::ScaleReceived => "scale_received",
            ParamKey::CapReceived => "cap_received",
            ParamKey::CreatorPostWeight => "creator_post_weight",
            ParamKey::CreatorRecentPostWeight => "creator_recent_post_weight",
            ParamKey::CreatorStoryWeight => "creator_story_weight",
            ParamKey::ScaleCreator => "scale_creator",
            ParamKey::CapCreator => "cap_creator",
            ParamKey::CommunityLikeWeight => "community_like_weight",
            ParamKey::CommunityCommentWeight => "community_comment_weight",
            ParamKey::CommunityFollowWeight => "community_follow_weight",
            ParamKey::CommunityChatWeight => "community_chat_weight",
            ParamKey::ScaleCommunity => "scale_community",
            ParamKey::CapCommunity => "cap_community",
            ParamKey::NetworkFollowerWeight => "network_follower_weight",
            ParamKey::NetworkFollowGainWeight => "network_follow_gain_weight",
            ParamKey::ScaleNetwork => "scale_network",
            ParamKey::CapNetwork => "cap_network",
            ParamKey::VerifiedBonus => "verified_bonus",
            ParamKey::OnlineBonus => "online_bonus",
            ParamKey::PhotoBonus => "photo_bonus",
            ParamKey::FieldBonus => "field_bonus",
            ParamKey::BannedPenalty => "banned_penalty",
            ParamKey::InactivePenalty => "inactive_penalty",
            ParamKey::LowQualityPostPenalty => "low_quality_post_penalty",
            ParamKey::AggressiveFollowPenalty => "aggressive_follow_penalty",
            ParamKey::LowFollowerRatioPenalty => "low_follower_ratio_penalty",
            ParamKey::Recency1d => "recency_1d",
            ParamKey::Recency7d => "recency_7d",
            ParamKey::Recency30d => "recency_30d",
            ParamKey::Recency90d => "recency_90d",
            ParamKey::Recency180d => "recency_180d",
            ParamKey::RecencyOld => "recency_old",
        }
    }

    /// Reverse of [`as_str`]. Unknown names yield `None` — patches carrying
    /// them are silently ignored.
    pub fn parse(name: &str) -> Option<ParamKey> {
        ParamKey::ALL.iter().copied().find(|k| k.as_str() == name)
    }

    /// Documented [min, max] bound for this tunable.
    pub fn bounds(self) -> (f64, f64) {
        use ParamKey::*;
        match self {
            // Signal weights
            ReceivedLikeWeight | ReceivedCommentWeight | ReceivedStoryViewWeight
            | CreatorPostWeight | CreatorRecentPostWeight | CreatorStoryWeight
            | CommunityLikeWeight | CommunityCommentWeight | CommunityFollowWeight
            | CommunityChatWeight | NetworkFollowerWeight | NetworkFollowGainWeight => (0.0, 10.0),
            // Log-scale multipliers
            ScaleReceived | ScaleCreator | ScaleCommunity | ScaleNetwork => (0.5, 25.0),
            // Sub-score caps
            CapReceived | CapCreator | CapCommunity | CapNetwork => (5.0, 60.0),
            // Quality bonuses
            VerifiedBonus | OnlineBonus | PhotoBonus => (0.0, 10.0),
            FieldBonus => (0.0, 5.0),
            // Penalties
            BannedPenalty | InactivePenalty | LowQualityPostPenalty
            | AggressiveFollowPenalty | LowFollowerRatioPenalty => (0.0, 100.0),
            // Recency multipliers
            Recency1d | Recency7d | Recency30d | Recency90d | Recency180d | RecencyOld => {
                (0.2, 2.0)
            }
        }
    }

    /// Compiled default for this tunable under the given variant code.
    pub fn default_for(self, variant_code: &str) -> f64 {
        defaults::for_variant(variant_code).get(self)
    }
}

impl std::fmt::Display for ParamKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
