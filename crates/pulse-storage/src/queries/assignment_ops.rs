//! CRUD for variant_assignments rows.

use rusqlite::{params, Connection};

use pulse_core::errors::{PulseResult, StorageError};
use pulse_core::types::{Assignment, MemberId, VariantCode};

use crate::queries::{delete_by_member_ids, parse_dt, OptionalRow};
use crate::to_storage_err;

const SELECT_COLUMNS: &str = "SELECT member_id, variant_code, assigned_at, updated_at
     FROM variant_assignments";

struct AssignmentRow {
    member_id: MemberId,
    variant_code: String,
    assigned_at: String,
    updated_at: String,
}

fn map_assignment_row(row: &rusqlite::Row<'_>) -> Result<AssignmentRow, rusqlite::Error> {
    Ok(AssignmentRow {
        member_id: row.get(0)?,
        variant_code: row.get(1)?,
        assigned_at: row.get(2)?,
        updated_at: row.get(3)?,
    })
}

fn into_assignment(row: AssignmentRow) -> PulseResult<Assignment> {
    let variant_code =
        VariantCode::new(&row.variant_code).map_err(|e| StorageError::RowDecodeFailed {
            table: "variant_assignments".to_string(),
            reason: e.to_string(),
        })?;
    Ok(Assignment {
        member_id: row.member_id,
        variant_code,
        assigned_at: parse_dt(&row.assigned_at)?,
        updated_at: parse_dt(&row.updated_at)?,
    })
}

pub fn get_assignment(conn: &Connection, member_id: MemberId) -> PulseResult<Option<Assignment>> {
    let sql = format!("{SELECT_COLUMNS} WHERE member_id = ?1");
    let row = conn
        .query_row(&sql, [member_id], map_assignment_row)
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    row.map(into_assignment).transpose()
}

pub fn all_assignments(conn: &Connection) -> PulseResult<Vec<Assignment>> {
    let sql = format!("{SELECT_COLUMNS} ORDER BY member_id");
    let mut stmt = conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], map_assignment_row)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut assignments = Vec::new();
    for row in rows {
        assignments.push(into_assignment(row.map_err(|e| to_storage_err(e.to_string()))?)?);
    }
    Ok(assignments)
}

pub fn put_assignment(conn: &Connection, assignment: &Assignment) -> PulseResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO variant_assignments
             (member_id, variant_code, assigned_at, updated_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            assignment.member_id,
            assignment.variant_code.as_str(),
            assignment.assigned_at.to_rfc3339(),
            assignment.updated_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Remove assignments for members that no longer exist.
pub fn delete_assignments(conn: &Connection, member_ids: &[MemberId]) -> PulseResult<usize> {
    delete_by_member_ids(conn, "variant_assignments", member_ids)
}

/// Wipe every assignment. Used by rebalancing; the next pass re-derives
/// all of them from slots.
pub fn clear_assignments(conn: &Connection) -> PulseResult<usize> {
    conn.execute("DELETE FROM variant_assignments", [])
        .map_err(|e| to_storage_err(e.to_string()).into())
}
