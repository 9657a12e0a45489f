use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Member ids come straight from the application's integer primary keys.
pub type MemberId = i64;

/// Profile snapshot of one member, as scoring sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberProfile {
    pub id: MemberId,
    pub display_name: String,
    pub is_verified: bool,
    pub is_online: bool,
    pub is_banned: bool,
    pub is_active: bool,
    /// True when the member uploaded a real avatar (not the placeholder).
    pub has_avatar: bool,
    /// How many of graduation year / university / city / occupation are
    /// filled in, 0..=4.
    pub filled_profile_fields: u32,
    /// All-time follower count.
    pub followers_total: u64,
    /// All-time following count.
    pub following_total: u64,
    /// Later of the legacy last-seen and last-login stamps, when either
    /// exists. Recency falls back to this for members with no windowed
    /// activity.
    pub last_seen_at: Option<DateTime<Utc>>,
}

impl MemberProfile {
    /// Follower-to-following ratio; 0.0 when the member follows nobody.
    pub fn follower_ratio(&self) -> f64 {
        if self.following_total == 0 {
            0.0
        } else {
            self.followers_total as f64 / self.following_total as f64
        }
    }
}
