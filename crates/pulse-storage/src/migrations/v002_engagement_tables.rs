//! v002: variant_configs, variant_assignments, engagement_scores,
//! recompute_runs — the rows this engine owns.

use rusqlite::Connection;

use pulse_core::errors::PulseResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> PulseResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS variant_configs (
            code          TEXT PRIMARY KEY,
            display_name  TEXT NOT NULL,
            description   TEXT NOT NULL DEFAULT '',
            traffic_share INTEGER NOT NULL DEFAULT 0,
            enabled       INTEGER NOT NULL DEFAULT 1,
            params        TEXT NOT NULL DEFAULT '{}',
            updated_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE TABLE IF NOT EXISTS variant_assignments (
            member_id     INTEGER PRIMARY KEY,
            variant_code  TEXT NOT NULL,
            assigned_at   TEXT NOT NULL,
            updated_at    TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_assignments_variant ON variant_assignments(variant_code);

        CREATE TABLE IF NOT EXISTS engagement_scores (
            member_id        INTEGER PRIMARY KEY,
            variant_code     TEXT NOT NULL,
            score            REAL NOT NULL,
            raw_score        REAL NOT NULL,
            received_score   REAL NOT NULL,
            creator_score    REAL NOT NULL,
            community_score  REAL NOT NULL,
            network_score    REAL NOT NULL,
            quality_bonus    REAL NOT NULL,
            penalty          REAL NOT NULL,
            signal_counts    TEXT NOT NULL DEFAULT '{}',
            last_activity_at TEXT,
            updated_at       TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_scores_variant ON engagement_scores(variant_code);

        CREATE TABLE IF NOT EXISTS recompute_runs (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            run_id              TEXT NOT NULL,
            reason              TEXT NOT NULL,
            members_processed   INTEGER NOT NULL DEFAULT 0,
            duration_ms         INTEGER NOT NULL DEFAULT 0,
            variant_populations TEXT NOT NULL DEFAULT '{}',
            success             INTEGER NOT NULL DEFAULT 0,
            error               TEXT,
            started_at          TEXT NOT NULL,
            finished_at         TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_runs_started ON recompute_runs(started_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
