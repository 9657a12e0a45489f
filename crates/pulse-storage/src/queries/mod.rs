//! Query modules, one per concern. Everything maps rusqlite errors
//! through `to_storage_err`.

pub mod activity_rollup;
pub mod assignment_ops;
pub mod member_ops;
pub mod run_ops;
pub mod score_ops;
pub mod variant_ops;

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use pulse_core::constants::MAX_PRUNE_BATCH_SIZE;
use pulse_core::errors::PulseResult;
use pulse_core::types::MemberId;

use crate::to_storage_err;

/// Helper trait to make `query_row` return `Option` on not-found.
pub(crate) trait OptionalRow<T> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error>;
}

impl<T> OptionalRow<T> for Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Parse an RFC3339 timestamp persisted by this crate.
pub(crate) fn parse_dt(s: &str) -> PulseResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("parse datetime '{s}': {e}")).into())
}

/// Delete rows of `table` whose member_id is in `ids`, chunked to stay
/// under SQLite's bound-parameter limit.
pub(crate) fn delete_by_member_ids(
    conn: &Connection,
    table: &str,
    ids: &[MemberId],
) -> PulseResult<usize> {
    let mut deleted = 0;
    for chunk in ids.chunks(MAX_PRUNE_BATCH_SIZE) {
        let placeholders = vec!["?"; chunk.len()].join(", ");
        let sql = format!("DELETE FROM {table} WHERE member_id IN ({placeholders})");
        deleted += conn
            .execute(&sql, rusqlite::params_from_iter(chunk.iter()))
            .map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(deleted)
}
