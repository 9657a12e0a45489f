//! Per-variant averages over the persisted score rows.

use std::collections::BTreeMap;

use serde::Serialize;

use pulse_core::types::{round2, ScoreRow};

/// Aggregated figures for one variant's scored population. Averages are
/// rounded to 2 decimals like every other presented figure.
#[derive(Debug, Clone, Serialize)]
pub struct VariantPerformance {
    pub variant_code: String,
    pub sample_size: u64,
    pub avg_score: f64,
    pub avg_raw_score: f64,
    pub avg_posts_30d: f64,
    pub avg_likes_received_30d: f64,
    pub avg_comments_received_30d: f64,
    pub avg_follows_gained_30d: f64,
    pub avg_story_views_received_30d: f64,
    /// `(avg likes received + 2 * avg comments received) / max(avg posts, 1)`.
    /// Comments weigh double: they cost the engaging member more.
    pub engagement_rate: f64,
}

#[derive(Default)]
struct Accumulator {
    n: u64,
    score: f64,
    raw_score: f64,
    posts: f64,
    likes_received: f64,
    comments_received: f64,
    follows_gained: f64,
    story_views_received: f64,
}

/// Group score rows by variant and average the figures the recommender
/// works from. Variants come back in ascending code order.
pub fn rollup(scores: &[ScoreRow]) -> Vec<VariantPerformance> {
    let mut by_code: BTreeMap<&str, Accumulator> = BTreeMap::new();
    for row in scores {
        let acc = by_code.entry(row.variant_code.as_str()).or_default();
        acc.n += 1;
        acc.score += row.score;
        acc.raw_score += row.raw_score;
        acc.posts += row.signal_counts.posts_30d as f64;
        acc.likes_received += row.signal_counts.likes_received_30d as f64;
        acc.comments_received += row.signal_counts.comments_received_30d as f64;
        acc.follows_gained += row.signal_counts.follows_gained_30d as f64;
        acc.story_views_received += row.signal_counts.story_views_received_30d as f64;
    }

    by_code
        .into_iter()
        .map(|(code, acc)| {
            let n = acc.n as f64;
            let avg_posts = acc.posts / n;
            let avg_likes = acc.likes_received / n;
            let avg_comments = acc.comments_received / n;
            VariantPerformance {
                variant_code: code.to_string(),
                sample_size: acc.n,
                avg_score: round2(acc.score / n),
                avg_raw_score: round2(acc.raw_score / n),
                avg_posts_30d: round2(avg_posts),
                avg_likes_received_30d: round2(avg_likes),
                avg_comments_received_30d: round2(avg_comments),
                avg_follows_gained_30d: round2(acc.follows_gained / n),
                avg_story_views_received_30d: round2(acc.story_views_received / n),
                engagement_rate: round2((avg_likes + 2.0 * avg_comments) / avg_posts.max(1.0)),
            }
        })
        .collect()
}
