//! Rollup and recommender tests: per-variant averages, the baseline
//! comparison rules, absolute floors, and the traffic-shift proposal.

use std::collections::HashMap;

use chrono::Utc;

use pulse_analytics::{
    recommend, rollup, AnalyticsEngine, Recommendation, RecommendationAction,
};
use pulse_core::config::AnalyticsConfig;
use pulse_core::params::defaults;
use pulse_core::types::{RunRecord, ScoreRow, SignalCounts, VariantCode, VariantConfig};

fn make_score(member_id: i64, code: &str, score: f64, counts: SignalCounts) -> ScoreRow {
    ScoreRow {
        member_id,
        variant_code: VariantCode::new(code).unwrap(),
        score,
        raw_score: score,
        received_score: 0.0,
        creator_score: 0.0,
        community_score: 0.0,
        network_score: 0.0,
        quality_bonus: 0.0,
        penalty: 0.0,
        signal_counts: counts,
        last_activity_at: None,
        updated_at: Utc::now(),
    }
}

fn counts(posts: u64, likes_received: u64, comments_received: u64) -> SignalCounts {
    SignalCounts {
        posts_30d: posts,
        likes_received_30d: likes_received,
        comments_received_30d: comments_received,
        ..SignalCounts::default()
    }
}

fn make_config(code: &str, share: u8, enabled: bool) -> VariantConfig {
    VariantConfig {
        code: VariantCode::new(code).unwrap(),
        display_name: code.to_string(),
        description: String::new(),
        traffic_share: share,
        enabled,
        params: defaults::for_variant(code),
        updated_at: Utc::now(),
    }
}

/// A population of `n` identical rows for one variant.
fn population(code: &str, n: i64, score: f64, c: SignalCounts) -> Vec<ScoreRow> {
    (0..n)
        .map(|i| make_score(i + 1, code, score, c.clone()))
        .collect()
}

fn patch_params(rec: &Recommendation) -> &HashMap<String, f64> {
    match &rec.action {
        RecommendationAction::AdjustParams { patch } => &patch.params,
        RecommendationAction::ShiftTraffic { .. } => panic!("expected a parameter patch"),
    }
}

// ── Rollup ────────────────────────────────────────────────────────────────

#[test]
fn rollup_averages_scores_per_variant_in_code_order() {
    let mut scores = vec![
        make_score(1, "B", 30.0, counts(0, 0, 0)),
        make_score(2, "A", 40.0, counts(0, 0, 0)),
        make_score(3, "A", 60.0, counts(0, 0, 0)),
    ];
    scores[0].raw_score = 35.0;

    let perf = rollup(&scores);
    assert_eq!(perf.len(), 2);
    assert_eq!(perf[0].variant_code, "A");
    assert_eq!(perf[0].sample_size, 2);
    assert_eq!(perf[0].avg_score, 50.0);
    assert_eq!(perf[1].variant_code, "B");
    assert_eq!(perf[1].sample_size, 1);
    assert_eq!(perf[1].avg_score, 30.0);
    assert_eq!(perf[1].avg_raw_score, 35.0);
}

#[test]
fn rollup_computes_engagement_rate_from_signal_averages() {
    // 4 posts, 6 likes, 3 comments each: (6 + 2*3) / 4 = 3.0.
    let scores = population("A", 10, 50.0, counts(4, 6, 3));
    let perf = rollup(&scores);
    assert_eq!(perf[0].avg_posts_30d, 4.0);
    assert_eq!(perf[0].avg_likes_received_30d, 6.0);
    assert_eq!(perf[0].avg_comments_received_30d, 3.0);
    assert_eq!(perf[0].engagement_rate, 3.0);
}

#[test]
fn rollup_engagement_rate_floors_posts_at_one() {
    // Lurkers with zero posts still divide by 1, not 0.
    let scores = population("A", 5, 20.0, counts(0, 2, 1));
    let perf = rollup(&scores);
    assert_eq!(perf[0].engagement_rate, 4.0);
}

#[test]
fn rollup_of_no_scores_is_empty() {
    assert!(rollup(&[]).is_empty());
}

// ── Baseline comparison rules ─────────────────────────────────────────────

#[test]
fn score_below_baseline_proposes_recency_and_penalty_nudges() {
    // A: avg score 40, rate 1.0. B: avg score 30, rate 0.75 — both
    // deltas land 25% below baseline.
    let mut scores = population("A", 20, 40.0, counts(4, 2, 1));
    scores.extend(population("B", 20, 30.0, counts(4, 1, 1)));
    let configs = vec![make_config("A", 50, true), make_config("B", 50, true)];

    let recs = recommend(&configs, &rollup(&scores), &AnalyticsConfig::default());

    let score_rec = recs
        .iter()
        .find(|r| r.variant_code == "B" && r.rationale.contains("score") && r.rationale.contains("below"))
        .expect("score-below-baseline recommendation");
    // |delta| 0.25, n 20: 0.35 + 0.25*0.8 + (20/200)*0.2 = 0.57.
    assert_eq!(score_rec.confidence, 0.57);

    let growth = defaults::growth();
    let params = patch_params(score_rec);
    assert!((params["recency_7d"] - growth.recency_7d * 1.05).abs() < 1e-9);
    assert!((params["recency_30d"] - growth.recency_30d * 1.05).abs() < 1e-9);
    assert!(
        (params["low_quality_post_penalty"] - growth.low_quality_post_penalty * 0.85).abs() < 1e-9
    );

    // The engagement-rate shortfall fires its own recommendation.
    let rate_rec = recs
        .iter()
        .find(|r| r.variant_code == "B" && r.rationale.contains("engagement rate"))
        .expect("rate-below-baseline recommendation");
    let rate_params = patch_params(rate_rec);
    assert!((rate_params["received_comment_weight"] - growth.received_comment_weight * 1.15).abs() < 1e-9);
    assert!((rate_params["scale_received"] - growth.scale_received * 1.10).abs() < 1e-9);
}

#[test]
fn engagement_above_baseline_with_stable_score_raises_received_headroom() {
    // Same avg score, but B's rate is 3.5 against A's 1.0.
    let mut scores = population("A", 20, 40.0, counts(4, 2, 1));
    scores.extend(population("B", 20, 40.0, counts(4, 8, 3)));
    let configs = vec![make_config("A", 50, true), make_config("B", 50, true)];

    let recs = recommend(&configs, &rollup(&scores), &AnalyticsConfig::default());

    let rec = recs
        .iter()
        .find(|r| r.variant_code == "B" && r.rationale.contains("above baseline"))
        .expect("rate-above-baseline recommendation");
    let growth = defaults::growth();
    let params = patch_params(rec);
    assert!((params["received_comment_weight"] - growth.received_comment_weight * 1.08).abs() < 1e-9);
    assert!((params["cap_received"] - growth.cap_received * 1.08).abs() < 1e-9);
}

#[test]
fn degrading_score_suppresses_the_rate_upside_rule() {
    // B's rate is far above baseline but its score collapsed, so the
    // upside nudge must not fire; the score shortfall rule must.
    let mut scores = population("A", 20, 40.0, counts(4, 2, 1));
    scores.extend(population("B", 20, 20.0, counts(4, 8, 3)));
    let configs = vec![make_config("A", 50, true), make_config("B", 50, true)];

    let recs = recommend(&configs, &rollup(&scores), &AnalyticsConfig::default());

    assert!(!recs
        .iter()
        .any(|r| r.variant_code == "B" && r.rationale.contains("engagement rate") && r.rationale.contains("above")));
    assert!(recs
        .iter()
        .any(|r| r.variant_code == "B" && r.rationale.contains("score") && r.rationale.contains("below")));
}

#[test]
fn undersampled_variants_are_skipped_entirely() {
    let mut scores = population("A", 20, 40.0, counts(4, 2, 1));
    scores.extend(population("B", 5, 1.0, counts(0, 0, 0)));
    let configs = vec![make_config("A", 50, true), make_config("B", 50, true)];

    let recs = recommend(&configs, &rollup(&scores), &AnalyticsConfig::default());
    assert!(recs.iter().all(|r| r.variant_code != "B"));
    assert!(!recs
        .iter()
        .any(|r| matches!(r.action, RecommendationAction::ShiftTraffic { .. })));
}

// ── Absolute floors ───────────────────────────────────────────────────────

#[test]
fn weak_creation_and_growth_floors_fire_for_the_baseline_itself() {
    let scores = population("A", 25, 30.0, counts(0, 0, 0));
    let configs = vec![make_config("A", 100, true)];

    let recs = recommend(&configs, &rollup(&scores), &AnalyticsConfig::default());
    assert_eq!(recs.len(), 2);

    let baseline = defaults::baseline();
    let posting = recs
        .iter()
        .find(|r| r.rationale.contains("posting activity low"))
        .expect("posting floor recommendation");
    assert!(
        (patch_params(posting)["creator_recent_post_weight"]
            - baseline.creator_recent_post_weight * 1.15)
            .abs()
            < 1e-9
    );

    let growth = recs
        .iter()
        .find(|r| r.rationale.contains("follow growth low"))
        .expect("follow-gain floor recommendation");
    assert!(
        (patch_params(growth)["network_follow_gain_weight"]
            - baseline.network_follow_gain_weight * 1.15)
            .abs()
            < 1e-9
    );
}

#[test]
fn healthy_floors_produce_no_recommendations_without_a_baseline() {
    // Baseline "A" has no rollup at all; B posts and gains followers
    // enough to clear both floors.
    let scores = population("B", 20, 40.0, counts(4, 2, 1))
        .into_iter()
        .map(|mut row| {
            row.signal_counts.follows_gained_30d = 2;
            row
        })
        .collect::<Vec<_>>();
    let configs = vec![make_config("A", 50, true), make_config("B", 50, true)];

    let recs = recommend(&configs, &rollup(&scores), &AnalyticsConfig::default());
    assert!(recs.is_empty());
}

// ── Traffic shift ─────────────────────────────────────────────────────────

#[test]
fn composite_quality_gap_proposes_a_traffic_shift() {
    let mut scores = population("A", 20, 30.0, counts(4, 2, 1));
    scores.extend(population("B", 20, 60.0, counts(4, 2, 1)));
    let configs = vec![make_config("A", 50, true), make_config("B", 50, true)];

    let recs = recommend(&configs, &rollup(&scores), &AnalyticsConfig::default());
    let shift = recs
        .iter()
        .find_map(|r| match &r.action {
            RecommendationAction::ShiftTraffic { from, to, points } => {
                Some((from.clone(), to.clone(), *points))
            }
            _ => None,
        })
        .expect("traffic-shift recommendation");
    assert_eq!(shift, ("A".to_string(), "B".to_string(), 5));
}

#[test]
fn disabled_variants_never_receive_traffic_shifts() {
    let mut scores = population("A", 20, 30.0, counts(4, 2, 1));
    scores.extend(population("B", 20, 60.0, counts(4, 2, 1)));
    let configs = vec![make_config("A", 100, true), make_config("B", 0, false)];

    let recs = recommend(&configs, &rollup(&scores), &AnalyticsConfig::default());
    assert!(!recs
        .iter()
        .any(|r| matches!(r.action, RecommendationAction::ShiftTraffic { .. })));
    // The disabled variant still gets compared against the baseline.
    assert!(recs.iter().any(|r| r.variant_code == "B"));
}

#[test]
fn near_identical_variants_produce_no_shift() {
    let mut scores = population("A", 20, 40.0, counts(4, 2, 1));
    scores.extend(population("B", 20, 41.0, counts(4, 2, 1)));
    let configs = vec![make_config("A", 50, true), make_config("B", 50, true)];

    let recs = recommend(&configs, &rollup(&scores), &AnalyticsConfig::default());
    assert!(!recs
        .iter()
        .any(|r| matches!(r.action, RecommendationAction::ShiftTraffic { .. })));
}

// ── Report assembly ───────────────────────────────────────────────────────

#[test]
fn report_carries_rollup_recommendations_and_last_run() {
    let mut scores = population("A", 20, 40.0, counts(4, 2, 1));
    scores.extend(population("B", 20, 30.0, counts(4, 1, 1)));
    let configs = vec![make_config("A", 50, true), make_config("B", 50, true)];
    let run = RunRecord {
        run_id: "run-1".to_string(),
        reason: "interval".to_string(),
        members_processed: 40,
        duration_ms: 12,
        variant_populations: HashMap::from([("A".to_string(), 20), ("B".to_string(), 20)]),
        success: true,
        error: None,
        started_at: Utc::now(),
        finished_at: Utc::now(),
    };

    let report = AnalyticsEngine::new(AnalyticsConfig::default()).build_report(
        &scores,
        &configs,
        Some(run),
    );
    assert_eq!(report.performance_by_variant.len(), 2);
    assert!(!report.recommendations.is_empty());
    assert_eq!(report.last_run.as_ref().unwrap().members_processed, 40);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["performance_by_variant"][0]["variant_code"], "A");
    let kind = &json["recommendations"][0]["action"]["kind"];
    assert!(kind == "adjust_params" || kind == "shift_traffic");
}
