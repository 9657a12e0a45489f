//! Property tests for the scoring formula: bounds, monotonicity, and
//! bucket membership under arbitrary in-bound parameter sets.

use chrono::{Duration, Utc};
use proptest::prelude::*;

use pulse_core::params::{ParamKey, ScoringParams};
use pulse_core::types::{MemberProfile, SignalCounts};
use pulse_scoring::formula;

prop_compose! {
    fn arb_counts()(
        posts_7d in 0u64..50,
        posts_30d in 0u64..200,
        likes_given_30d in 0u64..5_000,
        likes_received_30d in 0u64..5_000,
        comments_given_30d in 0u64..1_000,
        comments_received_30d in 0u64..1_000,
        follows_gained_30d in 0u64..500,
        follows_given_30d in 0u64..500,
        stories_30d in 0u64..100,
        story_views_received_30d in 0u64..20_000,
        chat_messages_30d in 0u64..10_000,
    ) -> SignalCounts {
        SignalCounts {
            posts_7d,
            posts_30d,
            likes_given_30d,
            likes_received_30d,
            comments_given_30d,
            comments_received_30d,
            follows_gained_30d,
            follows_given_30d,
            stories_30d,
            story_views_received_30d,
            chat_messages_30d,
        }
    }
}

prop_compose! {
    fn arb_profile()(
        is_verified in any::<bool>(),
        is_online in any::<bool>(),
        is_banned in any::<bool>(),
        is_active in any::<bool>(),
        has_avatar in any::<bool>(),
        filled_profile_fields in 0u32..=4,
        followers_total in 0u64..100_000,
        following_total in 0u64..10_000,
    ) -> MemberProfile {
        MemberProfile {
            id: 1,
            display_name: "prop".to_string(),
            is_verified,
            is_online,
            is_banned,
            is_active,
            has_avatar,
            filled_profile_fields,
            followers_total,
            following_total,
            last_seen_at: None,
        }
    }
}

/// Every tunable drawn uniformly from its documented bound.
fn arb_params() -> impl Strategy<Value = ScoringParams> {
    proptest::collection::vec(0.0f64..=1.0, ParamKey::ALL.len()).prop_map(|units| {
        let mut params = ScoringParams::default();
        for (key, unit) in ParamKey::ALL.iter().zip(units) {
            let (min, max) = key.bounds();
            params.set(*key, min + (max - min) * unit);
        }
        params
    })
}

proptest! {
    #[test]
    fn final_score_is_always_in_range(
        profile in arb_profile(),
        counts in arb_counts(),
        params in arb_params(),
        idle_days in proptest::option::of(0i64..1_000),
    ) {
        let now = Utc::now();
        let last_activity = idle_days.map(|d| now - Duration::days(d));
        let result = formula::compute(&profile, &counts, last_activity, &params, now);

        prop_assert!(result.score.value() >= 0.0);
        prop_assert!(result.score.value() <= 100.0);
        prop_assert!(result.score.value().is_finite());
        prop_assert!(result.raw_score.is_finite());
    }

    #[test]
    fn pillars_stay_within_their_caps(
        profile in arb_profile(),
        counts in arb_counts(),
        params in arb_params(),
    ) {
        let now = Utc::now();
        let result = formula::compute(&profile, &counts, Some(now), &params, now);

        prop_assert!(result.received_score >= 0.0 && result.received_score <= params.cap_received);
        prop_assert!(result.creator_score >= 0.0 && result.creator_score <= params.cap_creator);
        prop_assert!(
            result.community_score >= 0.0 && result.community_score <= params.cap_community
        );
        prop_assert!(result.network_score >= 0.0 && result.network_score <= params.cap_network);
    }

    #[test]
    fn recency_factor_comes_from_the_bounded_buckets(
        params in arb_params(),
        idle_days in proptest::option::of(0i64..2_000),
    ) {
        let now = Utc::now();
        let profile = MemberProfile {
            id: 1,
            display_name: "prop".to_string(),
            is_verified: false,
            is_online: false,
            is_banned: false,
            is_active: true,
            has_avatar: false,
            filled_profile_fields: 0,
            followers_total: 0,
            following_total: 0,
            last_seen_at: None,
        };
        let last_activity = idle_days.map(|d| now - Duration::days(d));
        let result =
            formula::compute(&profile, &SignalCounts::default(), last_activity, &params, now);

        let buckets = [
            params.recency_1d,
            params.recency_7d,
            params.recency_30d,
            params.recency_90d,
            params.recency_180d,
            params.recency_old,
        ];
        prop_assert!(buckets.contains(&result.recency_factor));
        prop_assert!(result.recency_factor >= 0.2 && result.recency_factor <= 2.0);
    }

    #[test]
    fn more_received_engagement_never_lowers_the_received_pillar(
        profile in arb_profile(),
        counts in arb_counts(),
        params in arb_params(),
        extra_likes in 1u64..1_000,
    ) {
        let now = Utc::now();
        let base = formula::compute(&profile, &counts, Some(now), &params, now);

        let mut more = counts.clone();
        more.likes_received_30d += extra_likes;
        let boosted = formula::compute(&profile, &more, Some(now), &params, now);

        prop_assert!(boosted.received_score >= base.received_score - 1e-12);
    }

    #[test]
    fn banning_a_member_never_raises_the_raw_score(
        profile in arb_profile(),
        counts in arb_counts(),
        params in arb_params(),
    ) {
        let now = Utc::now();
        let mut clean = profile.clone();
        clean.is_banned = false;
        let mut banned = profile;
        banned.is_banned = true;

        let a = formula::compute(&clean, &counts, Some(now), &params, now);
        let b = formula::compute(&banned, &counts, Some(now), &params, now);
        prop_assert!(b.raw_score <= a.raw_score + 1e-12);
    }
}
