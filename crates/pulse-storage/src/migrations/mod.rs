//! Versioned schema migrations, applied in order and recorded in
//! `schema_version`.

mod v001_member_tables;
mod v002_engagement_tables;

use rusqlite::{params, Connection};

use pulse_core::errors::{PulseError, PulseResult, StorageError};

use crate::to_storage_err;

type Migration = (u32, fn(&Connection) -> PulseResult<()>);

const MIGRATIONS: [Migration; 2] = [
    (1, v001_member_tables::migrate),
    (2, v002_engagement_tables::migrate),
];

/// Apply every pending migration on the write connection.
pub fn run_migrations(conn: &Connection) -> PulseResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS schema_version (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    for (version, migrate) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }
        migrate(conn).map_err(|e| {
            PulseError::StorageError(StorageError::MigrationFailed {
                version,
                reason: e.to_string(),
            })
        })?;
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            params![version],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
        tracing::debug!(version, "schema migration applied");
    }
    Ok(())
}

/// Highest applied schema version; 0 for a fresh database.
pub fn current_version(conn: &Connection) -> PulseResult<u32> {
    let version: Option<u32> = conn
        .query_row(
            "SELECT MAX(version) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(version.unwrap_or(0))
}

fn is_applied(conn: &Connection, version: u32) -> PulseResult<bool> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM schema_version WHERE version = ?1",
            params![version],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count > 0)
}
