//! Rule-based tuning recommendations.
//!
//! Variants are compared against the configured baseline on relative
//! deltas of engagement rate and average score. Each fired rule becomes
//! one advisory [`Recommendation`] carrying a clamped parameter patch
//! (or a traffic-shift proposal) plus a bounded confidence figure.
//! Undersampled variants are skipped silently, not errored.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use pulse_core::config::AnalyticsConfig;
use pulse_core::params::{ParamKey, ScoringParams};
use pulse_core::types::{round2, VariantConfig, VariantPatch};

use crate::rollup::VariantPerformance;

/// Relative engagement-rate delta below which a variant counts as
/// underperforming the baseline, and above which as outperforming.
const RATE_DELTA_LOW: f64 = -0.08;
const RATE_DELTA_HIGH: f64 = 0.08;
/// Same thresholds for the average final score.
const SCORE_DELTA_LOW: f64 = -0.08;
const SCORE_DELTA_HIGH: f64 = 0.12;
/// A companion metric still counts as stable above this delta.
const STABLE_DELTA_FLOOR: f64 = -0.08;
/// Absolute floors that flag weak creation and weak network growth.
const LOW_POSTS_FLOOR: f64 = 1.2;
const LOW_FOLLOW_GAIN_FLOOR: f64 = 0.5;
/// Composite-quality gap that justifies proposing a traffic shift.
const QUALITY_GAP_MIN: f64 = 0.05;
const CONFIDENCE_CAP: f64 = 0.95;

/// One advisory proposal. Never applied automatically — the admin
/// surface decides whether to feed the patch back through an upsert.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub variant_code: String,
    pub rationale: String,
    /// In `[0, 0.95]`, from delta magnitude plus a sample-size factor.
    pub confidence: f64,
    pub action: RecommendationAction,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecommendationAction {
    AdjustParams { patch: VariantPatch },
    ShiftTraffic { from: String, to: String, points: u8 },
}

/// Run every rule over the rolled-up performance figures.
pub fn recommend(
    configs: &[VariantConfig],
    performance: &[VariantPerformance],
    options: &AnalyticsConfig,
) -> Vec<Recommendation> {
    let min_n = options.min_sample_size as u64;
    let baseline = performance
        .iter()
        .find(|p| p.variant_code == options.baseline_variant && p.sample_size >= min_n);

    let mut out = Vec::new();
    for perf in performance {
        if perf.sample_size < min_n {
            debug!(
                variant = %perf.variant_code,
                sample = perf.sample_size,
                "variant skipped: sample below minimum"
            );
            continue;
        }
        let config = match configs.iter().find(|c| c.code.as_str() == perf.variant_code) {
            Some(c) => c,
            None => {
                debug!(variant = %perf.variant_code, "variant skipped: no stored config");
                continue;
            }
        };

        if let Some(base) = baseline {
            if perf.variant_code != base.variant_code {
                baseline_rules(perf, base, &config.params, &mut out);
            }
        }
        floor_rules(perf, &config.params, &mut out);
    }

    if let Some(shift) = traffic_shift(configs, performance, options) {
        out.push(shift);
    }
    debug!(recommendations = out.len(), "recommender rules evaluated");
    out
}

fn baseline_rules(
    perf: &VariantPerformance,
    base: &VariantPerformance,
    params: &ScoringParams,
    out: &mut Vec<Recommendation>,
) {
    let rate_delta = relative_delta(perf.engagement_rate, base.engagement_rate);
    let score_delta = relative_delta(perf.avg_score, base.avg_score);

    if let Some(delta) = rate_delta {
        if delta < RATE_DELTA_LOW {
            out.push(Recommendation {
                variant_code: perf.variant_code.clone(),
                rationale: format!(
                    "engagement rate {:.0}% below baseline",
                    delta.abs() * 100.0
                ),
                confidence: confidence(delta, perf.sample_size),
                action: param_patch(vec![
                    nudged(params, ParamKey::ReceivedCommentWeight, 1.15),
                    nudged(params, ParamKey::ScaleReceived, 1.10),
                ]),
            });
        } else if delta > RATE_DELTA_HIGH && stable(score_delta) {
            out.push(Recommendation {
                variant_code: perf.variant_code.clone(),
                rationale: format!(
                    "engagement rate {:.0}% above baseline with score holding",
                    delta * 100.0
                ),
                confidence: confidence(delta, perf.sample_size),
                action: param_patch(vec![
                    nudged(params, ParamKey::ReceivedCommentWeight, 1.08),
                    nudged(params, ParamKey::CapReceived, 1.08),
                ]),
            });
        }
    }

    if let Some(delta) = score_delta {
        if delta < SCORE_DELTA_LOW {
            out.push(Recommendation {
                variant_code: perf.variant_code.clone(),
                rationale: format!("average score {:.0}% below baseline", delta.abs() * 100.0),
                confidence: confidence(delta, perf.sample_size),
                action: param_patch(vec![
                    nudged(params, ParamKey::Recency7d, 1.05),
                    nudged(params, ParamKey::Recency30d, 1.05),
                    nudged(params, ParamKey::LowQualityPostPenalty, 0.85),
                ]),
            });
        } else if delta > SCORE_DELTA_HIGH && stable(rate_delta) {
            out.push(Recommendation {
                variant_code: perf.variant_code.clone(),
                rationale: format!(
                    "average score {:.0}% above baseline with engagement holding",
                    delta * 100.0
                ),
                confidence: confidence(delta, perf.sample_size),
                action: param_patch(vec![nudged(
                    params,
                    ParamKey::AggressiveFollowPenalty,
                    1.15,
                )]),
            });
        }
    }
}

/// Absolute floors, checked per variant independently of the baseline.
fn floor_rules(perf: &VariantPerformance, params: &ScoringParams, out: &mut Vec<Recommendation>) {
    if perf.avg_posts_30d < LOW_POSTS_FLOOR {
        let shortfall = (LOW_POSTS_FLOOR - perf.avg_posts_30d) / LOW_POSTS_FLOOR;
        out.push(Recommendation {
            variant_code: perf.variant_code.clone(),
            rationale: format!("posting activity low ({:.2}/30d)", perf.avg_posts_30d),
            confidence: confidence(shortfall, perf.sample_size),
            action: param_patch(vec![nudged(params, ParamKey::CreatorRecentPostWeight, 1.15)]),
        });
    }
    if perf.avg_follows_gained_30d < LOW_FOLLOW_GAIN_FLOOR {
        let shortfall =
            (LOW_FOLLOW_GAIN_FLOOR - perf.avg_follows_gained_30d) / LOW_FOLLOW_GAIN_FLOOR;
        out.push(Recommendation {
            variant_code: perf.variant_code.clone(),
            rationale: format!(
                "follow growth low ({:.2}/30d)",
                perf.avg_follows_gained_30d
            ),
            confidence: confidence(shortfall, perf.sample_size),
            action: param_patch(vec![nudged(params, ParamKey::NetworkFollowGainWeight, 1.15)]),
        });
    }
}

/// Among enabled, sufficiently sampled variants: if the best composite
/// quality beats the worst by more than the gap threshold, propose
/// moving a fixed slice of traffic from loser to winner.
fn traffic_shift(
    configs: &[VariantConfig],
    performance: &[VariantPerformance],
    options: &AnalyticsConfig,
) -> Option<Recommendation> {
    let min_n = options.min_sample_size as u64;
    let eligible: Vec<&VariantPerformance> = performance
        .iter()
        .filter(|p| {
            p.sample_size >= min_n
                && configs
                    .iter()
                    .any(|c| c.code.as_str() == p.variant_code && c.enabled)
        })
        .collect();
    if eligible.len() < 2 {
        return None;
    }

    let best = eligible
        .iter()
        .copied()
        .max_by(|a, b| quality(a).partial_cmp(&quality(b)).unwrap_or(Ordering::Equal))?;
    let worst = eligible
        .iter()
        .copied()
        .min_by(|a, b| quality(a).partial_cmp(&quality(b)).unwrap_or(Ordering::Equal))?;
    if best.variant_code == worst.variant_code {
        return None;
    }

    let (best_q, worst_q) = (quality(best), quality(worst));
    let gap = if worst_q <= 0.0 {
        if best_q > 0.0 {
            1.0
        } else {
            return None;
        }
    } else {
        (best_q - worst_q) / worst_q
    };
    if gap <= QUALITY_GAP_MIN {
        return None;
    }

    Some(Recommendation {
        variant_code: best.variant_code.clone(),
        rationale: format!(
            "{} outperforms {} on composite quality by {:.0}%",
            best.variant_code,
            worst.variant_code,
            gap * 100.0
        ),
        confidence: confidence(gap, best.sample_size.min(worst.sample_size)),
        action: RecommendationAction::ShiftTraffic {
            from: worst.variant_code.clone(),
            to: best.variant_code.clone(),
            points: options.traffic_shift_points,
        },
    })
}

/// `0.6 * avg_score + 0.4 * engagement_rate`, the single figure the
/// traffic-shift rule ranks variants by.
fn quality(perf: &VariantPerformance) -> f64 {
    0.6 * perf.avg_score + 0.4 * perf.engagement_rate
}

/// `(value - base) / base`, undefined for non-positive baselines.
fn relative_delta(value: f64, base: f64) -> Option<f64> {
    if base <= 0.0 {
        None
    } else {
        Some((value - base) / base)
    }
}

/// A companion metric that could not be computed counts as stable.
fn stable(delta: Option<f64>) -> bool {
    delta.map_or(true, |d| d > STABLE_DELTA_FLOOR)
}

fn confidence(delta: f64, sample: u64) -> f64 {
    let magnitude = delta.abs().min(0.5) * 0.8;
    let weight = (sample as f64 / 200.0).min(1.0) * 0.2;
    round2((0.35 + magnitude + weight).min(CONFIDENCE_CAP))
}

fn nudged(params: &ScoringParams, key: ParamKey, factor: f64) -> (String, f64) {
    let (lo, hi) = key.bounds();
    let proposed = (params.get(key) * factor).clamp(lo, hi);
    (key.as_str().to_string(), proposed)
}

fn param_patch(changes: Vec<(String, f64)>) -> RecommendationAction {
    let params: HashMap<String, f64> = changes.into_iter().collect();
    RecommendationAction::AdjustParams {
        patch: VariantPatch {
            params,
            ..VariantPatch::default()
        },
    }
}
