use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome record of one full recompute pass, persisted for the admin
/// dashboard and for post-hoc debugging of scoring regressions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// Random id correlating log events with the stored row.
    pub run_id: String,
    /// What triggered the pass ("startup", "interval", "manual", ...).
    pub reason: String,
    pub members_processed: u64,
    pub duration_ms: u64,
    /// Scored population per variant code.
    pub variant_populations: HashMap<String, u64>,
    pub success: bool,
    pub error: Option<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}
