//! Member profile reads. The engine never writes member rows; they
//! belong to the wider application.

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use pulse_core::errors::PulseResult;
use pulse_core::types::{MemberId, MemberProfile};

use crate::queries::OptionalRow;
use crate::to_storage_err;

/// Raw row shape, converted after the rusqlite mapper closure so the
/// closure stays infallible beyond column decoding.
struct MemberRow {
    id: MemberId,
    display_name: String,
    is_verified: bool,
    is_online: bool,
    is_banned: bool,
    is_active: bool,
    avatar_path: Option<String>,
    graduation_year: Option<i64>,
    university: Option<String>,
    city: Option<String>,
    occupation: Option<String>,
    followers_total: i64,
    following_total: i64,
    last_seen_at: Option<String>,
    last_login_at: Option<String>,
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().map_or(false, |v| !v.trim().is_empty())
}

/// Legacy rows carry timestamps in whatever shape the application wrote
/// them; unparseable values count as "never", not as an error.
fn lenient_dt(value: &Option<String>) -> Option<DateTime<Utc>> {
    value
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

impl MemberRow {
    fn into_profile(self) -> MemberProfile {
        let mut filled = 0u32;
        if self.graduation_year.is_some() {
            filled += 1;
        }
        for field in [&self.university, &self.city, &self.occupation] {
            if has_text(field) {
                filled += 1;
            }
        }
        let last_seen = match (lenient_dt(&self.last_seen_at), lenient_dt(&self.last_login_at)) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        MemberProfile {
            id: self.id,
            display_name: self.display_name,
            is_verified: self.is_verified,
            is_online: self.is_online,
            is_banned: self.is_banned,
            is_active: self.is_active,
            has_avatar: has_text(&self.avatar_path),
            filled_profile_fields: filled,
            followers_total: self.followers_total.max(0) as u64,
            following_total: self.following_total.max(0) as u64,
            last_seen_at: last_seen,
        }
    }
}

// Follower totals are all-time counts, so they come from the follows
// table rather than any windowed rollup.
const SELECT_MEMBER_COLUMNS: &str = "
    SELECT m.id, m.display_name, m.is_verified, m.is_online, m.is_banned, m.is_active,
           m.avatar_path, m.graduation_year, m.university, m.city, m.occupation,
           (SELECT COUNT(*) FROM follows f WHERE f.followee_id = m.id) AS followers_total,
           (SELECT COUNT(*) FROM follows f WHERE f.follower_id = m.id) AS following_total,
           m.last_seen_at, m.last_login_at
    FROM members m";

fn map_member_row(row: &rusqlite::Row<'_>) -> Result<MemberRow, rusqlite::Error> {
    Ok(MemberRow {
        id: row.get(0)?,
        display_name: row.get(1)?,
        is_verified: row.get(2)?,
        is_online: row.get(3)?,
        is_banned: row.get(4)?,
        is_active: row.get(5)?,
        avatar_path: row.get(6)?,
        graduation_year: row.get(7)?,
        university: row.get(8)?,
        city: row.get(9)?,
        occupation: row.get(10)?,
        followers_total: row.get(11)?,
        following_total: row.get(12)?,
        last_seen_at: row.get(13)?,
        last_login_at: row.get(14)?,
    })
}

/// All member profiles, ordered by id for deterministic pass order.
pub fn list_members(conn: &Connection) -> PulseResult<Vec<MemberProfile>> {
    let sql = format!("{SELECT_MEMBER_COLUMNS} ORDER BY m.id");
    let mut stmt = conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], map_member_row)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut members = Vec::new();
    for row in rows {
        members.push(row.map_err(|e| to_storage_err(e.to_string()))?.into_profile());
    }
    Ok(members)
}

/// Single profile lookup, `None` when the member does not exist.
pub fn get_member(conn: &Connection, member_id: MemberId) -> PulseResult<Option<MemberProfile>> {
    let sql = format!("{SELECT_MEMBER_COLUMNS} WHERE m.id = ?1");
    let row = conn
        .query_row(&sql, [member_id], map_member_row)
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(row.map(MemberRow::into_profile))
}
