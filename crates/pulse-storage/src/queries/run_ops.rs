//! Recompute run history.

use std::collections::HashMap;

use rusqlite::{params, Connection};

use pulse_core::errors::{PulseResult, StorageError};
use pulse_core::types::RunRecord;

use crate::queries::{parse_dt, OptionalRow};
use crate::to_storage_err;

pub fn insert_run(conn: &Connection, run: &RunRecord) -> PulseResult<()> {
    let populations_json = serde_json::to_string(&run.variant_populations)?;
    conn.execute(
        "INSERT INTO recompute_runs
             (run_id, reason, members_processed, duration_ms,
              variant_populations, success, error, started_at, finished_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            run.run_id,
            run.reason,
            run.members_processed as i64,
            run.duration_ms as i64,
            populations_json,
            run.success,
            run.error,
            run.started_at.to_rfc3339(),
            run.finished_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

struct RawRunRow {
    run_id: String,
    reason: String,
    members_processed: i64,
    duration_ms: i64,
    variant_populations: String,
    success: bool,
    error: Option<String>,
    started_at: String,
    finished_at: String,
}

fn map_run_row(row: &rusqlite::Row<'_>) -> Result<RawRunRow, rusqlite::Error> {
    Ok(RawRunRow {
        run_id: row.get(0)?,
        reason: row.get(1)?,
        members_processed: row.get(2)?,
        duration_ms: row.get(3)?,
        variant_populations: row.get(4)?,
        success: row.get(5)?,
        error: row.get(6)?,
        started_at: row.get(7)?,
        finished_at: row.get(8)?,
    })
}

fn into_record(row: RawRunRow) -> PulseResult<RunRecord> {
    let variant_populations: HashMap<String, u64> =
        serde_json::from_str(&row.variant_populations).map_err(|e| {
            StorageError::RowDecodeFailed {
                table: "recompute_runs".to_string(),
                reason: format!("variant_populations: {e}"),
            }
        })?;
    Ok(RunRecord {
        run_id: row.run_id,
        reason: row.reason,
        members_processed: row.members_processed.max(0) as u64,
        duration_ms: row.duration_ms.max(0) as u64,
        variant_populations,
        success: row.success,
        error: row.error,
        started_at: parse_dt(&row.started_at)?,
        finished_at: parse_dt(&row.finished_at)?,
    })
}

/// Most recent run, whether it succeeded or failed.
pub fn latest_run(conn: &Connection) -> PulseResult<Option<RunRecord>> {
    let row = conn
        .query_row(
            "SELECT run_id, reason, members_processed, duration_ms,
                    variant_populations, success, error, started_at, finished_at
             FROM recompute_runs ORDER BY id DESC LIMIT 1",
            [],
            map_run_row,
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.map(into_record).transpose()
}
