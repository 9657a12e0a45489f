//! Batch recompute orchestrator: one full pass over the population.
//!
//! A pass snapshots the member population and all activity windows,
//! prunes rows for vanished members, then derives every member's
//! assignment and score. Failures never escape [`run_pass`] — the
//! returned run record says whether the pass succeeded, and rows
//! upserted before a mid-pass failure stay persisted (per-row
//! atomicity, no pass-wide rollback).

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;

use pulse_core::config::AssignmentConfig;
use pulse_core::errors::PulseResult;
use pulse_core::params::{defaults, ScoringParams};
use pulse_core::traits::{IActivitySource, IEngagementStore};
use pulse_core::types::{MemberId, MemberProfile, RunRecord, ScoreRow};
use pulse_scoring::ScoringEngine;
use pulse_variants::{AssignmentOutcome, AssignmentService, VariantStore};

struct PassStats {
    members_processed: u64,
    variant_populations: HashMap<String, u64>,
    orphan_scores: usize,
    orphan_assignments: usize,
}

pub struct RecomputeOrchestrator {
    activity: Arc<dyn IActivitySource>,
    store: Arc<dyn IEngagementStore>,
    variants: VariantStore,
    assignment: AssignmentService,
    scoring: ScoringEngine,
}

impl RecomputeOrchestrator {
    pub fn new(
        activity: Arc<dyn IActivitySource>,
        store: Arc<dyn IEngagementStore>,
        config: &AssignmentConfig,
    ) -> PulseResult<Self> {
        Ok(Self {
            variants: VariantStore::new(Arc::clone(&store)),
            assignment: AssignmentService::new(config)?,
            scoring: ScoringEngine::new(),
            activity,
            store,
        })
    }

    /// Run one full pass. Every failure is contained here: the record
    /// is persisted (best effort) and returned either way, and the
    /// pass is never retried automatically — the next trigger starts
    /// fresh.
    pub fn run_pass(&self, reason: &str) -> RunRecord {
        let run_id = Uuid::new_v4().to_string();
        let started_at = Utc::now();
        let timer = Instant::now();
        let span = crate::pass_span!(run_id, reason);
        let _guard = span.enter();
        info!("recompute pass started");

        let outcome = self.execute(started_at);
        let duration_ms = timer.elapsed().as_millis() as u64;
        let finished_at = Utc::now();

        let record = match outcome {
            Ok(stats) => {
                info!(
                    members = stats.members_processed,
                    orphan_scores = stats.orphan_scores,
                    orphan_assignments = stats.orphan_assignments,
                    populations = ?stats.variant_populations,
                    duration_ms,
                    "recompute pass finished"
                );
                RunRecord {
                    run_id,
                    reason: reason.to_string(),
                    members_processed: stats.members_processed,
                    duration_ms,
                    variant_populations: stats.variant_populations,
                    success: true,
                    error: None,
                    started_at,
                    finished_at,
                }
            }
            Err(e) => {
                error!(error = %e, duration_ms, "recompute pass failed");
                RunRecord {
                    run_id,
                    reason: reason.to_string(),
                    members_processed: 0,
                    duration_ms,
                    variant_populations: HashMap::new(),
                    success: false,
                    error: Some(e.to_string()),
                    started_at,
                    finished_at,
                }
            }
        };

        if let Err(e) = self.store.record_run(&record) {
            warn!(error = %e, "run record not persisted");
        }
        record
    }

    fn execute(&self, now: DateTime<Utc>) -> PulseResult<PassStats> {
        // Population snapshot: profiles, windowed signals, configs.
        let profiles = self.activity.member_profiles()?;
        let windows = self.activity.signal_windows(now)?;
        let configs = self.variants.list()?;

        // Pre-resolve each configured variant's normalized params once;
        // anything a sticky assignment still points at is in here.
        let mut params_by_code: HashMap<String, ScoringParams> = HashMap::new();
        for config in &configs {
            params_by_code.insert(
                config.code.as_str().to_string(),
                config.params.normalized(config.code.as_str()),
            );
        }

        let (orphan_scores, orphan_assignments) = self.prune_orphans(&profiles)?;

        let mut variant_populations: HashMap<String, u64> = HashMap::new();
        for profile in &profiles {
            let existing = self.store.get_assignment(profile.id)?;
            let outcome = self
                .assignment
                .resolve(profile.id, existing.as_ref(), &configs, now);
            if let AssignmentOutcome::Created(assignment) = &outcome {
                self.store.put_assignment(assignment)?;
            }
            let code = outcome.variant_code();

            // Vanished-variant safety net: the fallback code may not be
            // configured at all.
            if !params_by_code.contains_key(code.as_str()) {
                params_by_code.insert(
                    code.as_str().to_string(),
                    defaults::for_variant(code.as_str()),
                );
            }
            let params = &params_by_code[code.as_str()];

            let result = self.scoring.score_member(profile, &windows, params, now);
            let row = ScoreRow::from_result(
                profile.id,
                code.clone(),
                &result,
                windows.counts_for(profile.id),
                now,
            );
            self.store.upsert_score(&row)?;

            *variant_populations
                .entry(code.as_str().to_string())
                .or_insert(0) += 1;
        }

        Ok(PassStats {
            members_processed: profiles.len() as u64,
            variant_populations,
            orphan_scores,
            orphan_assignments,
        })
    }

    /// Delete score and assignment rows whose member no longer exists.
    fn prune_orphans(&self, profiles: &[MemberProfile]) -> PulseResult<(usize, usize)> {
        let live: HashSet<MemberId> = profiles.iter().map(|p| p.id).collect();

        let orphan_scores: Vec<MemberId> = self
            .store
            .all_scores()?
            .iter()
            .map(|r| r.member_id)
            .filter(|id| !live.contains(id))
            .collect();
        let orphan_assignments: Vec<MemberId> = self
            .store
            .all_assignments()?
            .iter()
            .map(|a| a.member_id)
            .filter(|id| !live.contains(id))
            .collect();

        let mut pruned_scores = 0;
        if !orphan_scores.is_empty() {
            pruned_scores = self.store.delete_scores(&orphan_scores)?;
        }
        let mut pruned_assignments = 0;
        if !orphan_assignments.is_empty() {
            pruned_assignments = self.store.delete_assignments(&orphan_assignments)?;
        }
        Ok((pruned_scores, pruned_assignments))
    }
}
