//! CRUD for engagement_scores rows.

use rusqlite::{params, Connection};

use pulse_core::errors::{PulseResult, StorageError};
use pulse_core::types::{MemberId, ScoreRow, SignalCounts, VariantCode};

use crate::queries::{delete_by_member_ids, parse_dt, OptionalRow};
use crate::to_storage_err;

const SELECT_COLUMNS: &str = "SELECT member_id, variant_code, score, raw_score,
            received_score, creator_score, community_score, network_score,
            quality_bonus, penalty, signal_counts, last_activity_at, updated_at
     FROM engagement_scores";

struct RawScoreRow {
    member_id: MemberId,
    variant_code: String,
    score: f64,
    raw_score: f64,
    received_score: f64,
    creator_score: f64,
    community_score: f64,
    network_score: f64,
    quality_bonus: f64,
    penalty: f64,
    signal_counts: String,
    last_activity_at: Option<String>,
    updated_at: String,
}

fn map_score_row(row: &rusqlite::Row<'_>) -> Result<RawScoreRow, rusqlite::Error> {
    Ok(RawScoreRow {
        member_id: row.get(0)?,
        variant_code: row.get(1)?,
        score: row.get(2)?,
        raw_score: row.get(3)?,
        received_score: row.get(4)?,
        creator_score: row.get(5)?,
        community_score: row.get(6)?,
        network_score: row.get(7)?,
        quality_bonus: row.get(8)?,
        penalty: row.get(9)?,
        signal_counts: row.get(10)?,
        last_activity_at: row.get(11)?,
        updated_at: row.get(12)?,
    })
}

fn decode_err(reason: impl Into<String>) -> StorageError {
    StorageError::RowDecodeFailed {
        table: "engagement_scores".to_string(),
        reason: reason.into(),
    }
}

fn into_score_row(row: RawScoreRow) -> PulseResult<ScoreRow> {
    let variant_code =
        VariantCode::new(&row.variant_code).map_err(|e| decode_err(e.to_string()))?;
    let signal_counts: SignalCounts = serde_json::from_str(&row.signal_counts)
        .map_err(|e| decode_err(format!("signal_counts: {e}")))?;
    let last_activity_at = row.last_activity_at.as_deref().map(parse_dt).transpose()?;
    Ok(ScoreRow {
        member_id: row.member_id,
        variant_code,
        score: row.score,
        raw_score: row.raw_score,
        received_score: row.received_score,
        creator_score: row.creator_score,
        community_score: row.community_score,
        network_score: row.network_score,
        quality_bonus: row.quality_bonus,
        penalty: row.penalty,
        signal_counts,
        last_activity_at,
        updated_at: parse_dt(&row.updated_at)?,
    })
}

pub fn upsert_score(conn: &Connection, score: &ScoreRow) -> PulseResult<()> {
    let counts_json = serde_json::to_string(&score.signal_counts)?;
    conn.execute(
        "INSERT OR REPLACE INTO engagement_scores
             (member_id, variant_code, score, raw_score,
              received_score, creator_score, community_score, network_score,
              quality_bonus, penalty, signal_counts, last_activity_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            score.member_id,
            score.variant_code.as_str(),
            score.score,
            score.raw_score,
            score.received_score,
            score.creator_score,
            score.community_score,
            score.network_score,
            score.quality_bonus,
            score.penalty,
            counts_json,
            score.last_activity_at.map(|dt| dt.to_rfc3339()),
            score.updated_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn get_score(conn: &Connection, member_id: MemberId) -> PulseResult<Option<ScoreRow>> {
    let sql = format!("{SELECT_COLUMNS} WHERE member_id = ?1");
    let row = conn
        .query_row(&sql, [member_id], map_score_row)
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.map(into_score_row).transpose()
}

pub fn all_scores(conn: &Connection) -> PulseResult<Vec<ScoreRow>> {
    let sql = format!("{SELECT_COLUMNS} ORDER BY member_id");
    let mut stmt = conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], map_score_row)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut scores = Vec::new();
    for row in rows {
        scores.push(into_score_row(row.map_err(|e| to_storage_err(e.to_string()))?)?);
    }
    Ok(scores)
}

/// Remove score rows for members that no longer exist.
pub fn delete_scores(conn: &Connection, member_ids: &[MemberId]) -> PulseResult<usize> {
    delete_by_member_ids(conn, "engagement_scores", member_ids)
}
