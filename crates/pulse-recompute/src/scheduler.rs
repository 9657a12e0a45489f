//! Pass scheduling: one-shot startup run, fixed interval, debounced
//! activity triggers, and synchronous manual runs.
//!
//! At most one pass runs at a time, enforced by an atomic flag set at
//! entry and cleared on every exit path. Triggers landing while a pass
//! is in flight, or while a debounce timer is pending, are dropped —
//! never queued. A started pass always runs to completion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error};

use pulse_core::config::RecomputeConfig;
use pulse_core::errors::{PulseResult, RecomputeError};
use pulse_core::types::RunRecord;

use crate::orchestrator::RecomputeOrchestrator;

pub struct RecalcScheduler {
    orchestrator: Arc<RecomputeOrchestrator>,
    running: Arc<AtomicBool>,
    debounce_armed: Arc<AtomicBool>,
    startup_delay: Duration,
    interval: Duration,
    debounce: Duration,
}

impl RecalcScheduler {
    pub fn new(orchestrator: Arc<RecomputeOrchestrator>, config: &RecomputeConfig) -> Self {
        Self {
            orchestrator,
            running: Arc::new(AtomicBool::new(false)),
            debounce_armed: Arc::new(AtomicBool::new(false)),
            startup_delay: Duration::from_secs(config.startup_delay_secs),
            interval: Duration::from_secs(config.interval_secs),
            debounce: Duration::from_secs(config.debounce_secs),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// One pass shortly after startup, so a fresh deployment has scores
    /// without waiting out a full interval.
    pub fn spawn_startup(&self) -> JoinHandle<()> {
        let orchestrator = Arc::clone(&self.orchestrator);
        let running = Arc::clone(&self.running);
        let delay = self.startup_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            run_guarded(orchestrator, running, "startup".to_string()).await;
        })
    }

    /// Fixed-cadence passes for as long as the handle stays alive.
    pub fn spawn_interval(&self) -> JoinHandle<()> {
        let orchestrator = Arc::clone(&self.orchestrator);
        let running = Arc::clone(&self.running);
        let interval = self.interval;
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                run_guarded(
                    Arc::clone(&orchestrator),
                    Arc::clone(&running),
                    "interval".to_string(),
                )
                .await;
            }
        })
    }

    /// Fire-and-forget activity trigger. The first call in a burst arms
    /// the quiet-period timer and its reason is the one the eventual
    /// pass records; every further call while the timer is armed or a
    /// pass is in flight is dropped.
    pub fn trigger_debounced(&self, reason: &str) {
        if self.running.load(Ordering::SeqCst) {
            debug!(reason, "trigger dropped: pass in progress");
            return;
        }
        if self
            .debounce_armed
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!(reason, "trigger dropped: debounce timer already armed");
            return;
        }
        let orchestrator = Arc::clone(&self.orchestrator);
        let running = Arc::clone(&self.running);
        let armed = Arc::clone(&self.debounce_armed);
        let delay = self.debounce;
        let reason = reason.to_string();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            armed.store(false, Ordering::SeqCst);
            run_guarded(orchestrator, running, reason).await;
        });
    }

    /// Run a pass now and wait for it. Refuses (rather than queues)
    /// when one is already in flight.
    pub async fn trigger_manual(&self, reason: &str) -> PulseResult<RunRecord> {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(RecomputeError::AlreadyRunning.into());
        }
        let orchestrator = Arc::clone(&self.orchestrator);
        let reason = reason.to_string();
        let joined = tokio::task::spawn_blocking(move || orchestrator.run_pass(&reason)).await;
        self.running.store(false, Ordering::SeqCst);
        joined.map_err(|e| {
            RecomputeError::PassFailed {
                reason: format!("pass task panicked: {e}"),
            }
            .into()
        })
    }
}

/// Run one pass behind the mutual-exclusion flag, dropping the trigger
/// if a pass is already in flight. The flag is cleared on every exit
/// path, including a panicked pass task.
async fn run_guarded(
    orchestrator: Arc<RecomputeOrchestrator>,
    running: Arc<AtomicBool>,
    reason: String,
) {
    if running
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        debug!(reason = %reason, "scheduled trigger dropped: pass in progress");
        return;
    }
    let joined = tokio::task::spawn_blocking(move || orchestrator.run_pass(&reason)).await;
    if let Err(e) = joined {
        error!(error = %e, "pass task panicked");
    }
    running.store(false, Ordering::SeqCst);
}
