//! Composition root. Opens storage, wires the orchestrator and
//! scheduler, and exposes the call surface the host admin/HTTP layer
//! drives: triggers, variant configuration, and the analytics report.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::info;

use pulse_analytics::{AnalyticsEngine, AnalyticsReport};
use pulse_core::config::PulseConfig;
use pulse_core::errors::PulseResult;
use pulse_core::traits::{IActivitySource, IEngagementStore};
use pulse_core::types::{MemberId, RunRecord, ScoreRow, VariantCode, VariantConfig, VariantPatch};
use pulse_storage::StorageEngine;
use pulse_variants::VariantStore;

use crate::orchestrator::RecomputeOrchestrator;
use crate::scheduler::RecalcScheduler;

/// How to open the runtime. No path means an in-memory database, which
/// is what tests and local experiments use.
#[derive(Debug, Clone, Default)]
pub struct RuntimeOptions {
    pub db_path: Option<PathBuf>,
    /// TOML configuration document; absent sections take defaults.
    pub config_toml: Option<String>,
}

pub struct PulseRuntime {
    config: PulseConfig,
    engine: Arc<StorageEngine>,
    variants: VariantStore,
    analytics: AnalyticsEngine,
    scheduler: RecalcScheduler,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl PulseRuntime {
    pub fn new(options: RuntimeOptions) -> PulseResult<Self> {
        let config = match &options.config_toml {
            Some(input) => PulseConfig::from_toml(input)?,
            None => PulseConfig::default(),
        };
        let engine = Arc::new(match &options.db_path {
            Some(path) => StorageEngine::open(path, &config.storage)?,
            None => StorageEngine::open_in_memory(&config.storage)?,
        });
        let store: Arc<dyn IEngagementStore> = engine.clone();
        let activity: Arc<dyn IActivitySource> = engine.clone();
        let orchestrator = Arc::new(RecomputeOrchestrator::new(
            activity,
            Arc::clone(&store),
            &config.assignment,
        )?);
        let scheduler = RecalcScheduler::new(orchestrator, &config.recompute);
        Ok(Self {
            variants: VariantStore::new(store),
            analytics: AnalyticsEngine::new(config.analytics.clone()),
            scheduler,
            engine,
            config,
            tasks: Mutex::new(Vec::new()),
        })
    }

    /// Spawn the startup pass and the periodic interval loop. Must be
    /// called from within a tokio runtime.
    pub fn start(&self) {
        let handles = [self.scheduler.spawn_startup(), self.scheduler.spawn_interval()];
        if let Ok(mut tasks) = self.tasks.lock() {
            tasks.extend(handles);
        }
        info!(
            startup_delay_secs = self.config.recompute.startup_delay_secs,
            interval_secs = self.config.recompute.interval_secs,
            "recompute schedule started"
        );
    }

    /// Abort the background schedule. In-flight passes finish on the
    /// blocking pool; no new ones are scheduled.
    pub fn shutdown(&self) {
        if let Ok(mut tasks) = self.tasks.lock() {
            for task in tasks.drain(..) {
                task.abort();
            }
        }
    }

    /// Fire-and-forget activity trigger (debounced, mid-pass drops).
    pub fn trigger_debounced(&self, reason: &str) {
        self.scheduler.trigger_debounced(reason);
    }

    /// Run a pass now and wait for its run record.
    pub async fn trigger_manual(&self, reason: &str) -> PulseResult<RunRecord> {
        self.scheduler.trigger_manual(reason).await
    }

    /// Admin "rebalance" action: discard every sticky assignment, then
    /// run a full pass so the whole population is re-slotted.
    pub async fn rebalance(&self) -> PulseResult<RunRecord> {
        let cleared = self.engine.clear_assignments()?;
        info!(cleared, "assignments discarded for rebalance");
        self.scheduler.trigger_manual("rebalance").await
    }

    pub fn list_variant_configs(&self) -> PulseResult<Vec<VariantConfig>> {
        self.variants.list()
    }

    pub fn upsert_variant_config(
        &self,
        code: &str,
        patch: VariantPatch,
    ) -> PulseResult<VariantConfig> {
        let code = VariantCode::new(code)?;
        self.variants.upsert(&code, &patch, Utc::now())
    }

    /// The dashboard payload: per-variant rollup, recommendations, and
    /// the latest run record.
    pub fn analytics(&self) -> PulseResult<AnalyticsReport> {
        let scores = self.engine.all_scores()?;
        let configs = self.variants.list()?;
        let last_run = self.engine.latest_run()?;
        Ok(self.analytics.build_report(&scores, &configs, last_run))
    }

    pub fn score(&self, member_id: MemberId) -> PulseResult<Option<ScoreRow>> {
        self.engine.get_score(member_id)
    }

    pub fn is_recomputing(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn config(&self) -> &PulseConfig {
        &self.config
    }

    /// Direct storage access for the host layer's read paths.
    pub fn storage(&self) -> &Arc<StorageEngine> {
        &self.engine
    }
}
