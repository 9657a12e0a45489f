use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MemberId;

/// The ten raw activity signals the engine aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    Posts,
    LikesGiven,
    LikesReceived,
    CommentsGiven,
    CommentsReceived,
    FollowsGained,
    FollowsGiven,
    Stories,
    StoryViewsReceived,
    ChatMessages,
}

impl SignalKind {
    pub const ALL: [SignalKind; 10] = [
        SignalKind::Posts,
        SignalKind::LikesGiven,
        SignalKind::LikesReceived,
        SignalKind::CommentsGiven,
        SignalKind::CommentsReceived,
        SignalKind::FollowsGained,
        SignalKind::FollowsGiven,
        SignalKind::Stories,
        SignalKind::StoryViewsReceived,
        SignalKind::ChatMessages,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SignalKind::Posts => "posts",
            SignalKind::LikesGiven => "likes_given",
            SignalKind::LikesReceived => "likes_received",
            SignalKind::CommentsGiven => "comments_given",
            SignalKind::CommentsReceived => "comments_received",
            SignalKind::FollowsGained => "follows_gained",
            SignalKind::FollowsGiven => "follows_given",
            SignalKind::Stories => "stories",
            SignalKind::StoryViewsReceived => "story_views_received",
            SignalKind::ChatMessages => "chat_messages",
        }
    }
}

/// One member's aggregate for one signal within a window.
#[derive(Debug, Clone, Copy)]
pub struct SignalSample {
    pub count: u64,
    /// Most recent event timestamp inside the window.
    pub last_at: DateTime<Utc>,
}

/// Per-member signal counts used by scoring and persisted alongside the
/// score row. All counts cover the 30-day window except `posts_7d`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalCounts {
    pub posts_7d: u64,
    pub posts_30d: u64,
    pub likes_given_30d: u64,
    pub likes_received_30d: u64,
    pub comments_given_30d: u64,
    pub comments_received_30d: u64,
    pub follows_gained_30d: u64,
    pub follows_given_30d: u64,
    pub stories_30d: u64,
    pub story_views_received_30d: u64,
    pub chat_messages_30d: u64,
}

/// Full-population activity rollup for one recompute pass: counts per
/// member plus the most recent event timestamp seen across every signal.
/// Members with no activity in the windows simply do not appear.
#[derive(Debug, Clone, Default)]
pub struct SignalWindows {
    counts: HashMap<MemberId, SignalCounts>,
    last_activity: HashMap<MemberId, DateTime<Utc>>,
}

impl SignalWindows {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one 30-day aggregation sample into the rollup.
    pub fn record(&mut self, kind: SignalKind, member_id: MemberId, sample: SignalSample) {
        let counts = self.counts.entry(member_id).or_default();
        match kind {
            SignalKind::Posts => counts.posts_30d = sample.count,
            SignalKind::LikesGiven => counts.likes_given_30d = sample.count,
            SignalKind::LikesReceived => counts.likes_received_30d = sample.count,
            SignalKind::CommentsGiven => counts.comments_given_30d = sample.count,
            SignalKind::CommentsReceived => counts.comments_received_30d = sample.count,
            SignalKind::FollowsGained => counts.follows_gained_30d = sample.count,
            SignalKind::FollowsGiven => counts.follows_given_30d = sample.count,
            SignalKind::Stories => counts.stories_30d = sample.count,
            SignalKind::StoryViewsReceived => counts.story_views_received_30d = sample.count,
            SignalKind::ChatMessages => counts.chat_messages_30d = sample.count,
        }
        self.touch(member_id, sample.last_at);
    }

    /// Fold the 7-day posts sample in. Only the count is kept — the
    /// 30-day posts sample already carries the later timestamp.
    pub fn record_recent_posts(&mut self, member_id: MemberId, count: u64) {
        self.counts.entry(member_id).or_default().posts_7d = count;
    }

    /// Advance a member's last-activity stamp, keeping the max.
    pub fn touch(&mut self, member_id: MemberId, at: DateTime<Utc>) {
        self.last_activity
            .entry(member_id)
            .and_modify(|cur| {
                if at > *cur {
                    *cur = at;
                }
            })
            .or_insert(at);
    }

    /// Counts for one member; zeroes when the member had no activity.
    pub fn counts_for(&self, member_id: MemberId) -> SignalCounts {
        self.counts.get(&member_id).cloned().unwrap_or_default()
    }

    /// Most recent windowed event for one member, if any.
    pub fn last_activity_for(&self, member_id: MemberId) -> Option<DateTime<Utc>> {
        self.last_activity.get(&member_id).copied()
    }

    /// Number of members with any windowed activity.
    pub fn active_member_count(&self) -> usize {
        self.counts.len()
    }
}
