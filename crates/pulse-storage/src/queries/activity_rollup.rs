//! Windowed rollups over the raw activity tables.
//!
//! One aggregate query per signal, each returning
//! `(member_id, count, latest timestamp)` for every member with at
//! least one event inside the window. Members without events simply
//! don't appear; the in-memory [`SignalWindows`] treats absence as
//! zero.

use chrono::{DateTime, Duration, Utc};
use rusqlite::Connection;

use pulse_core::constants::{LONG_WINDOW_DAYS, SHORT_WINDOW_DAYS};
use pulse_core::errors::PulseResult;
use pulse_core::types::{SignalKind, SignalSample, SignalWindows};

use crate::queries::parse_dt;
use crate::to_storage_err;

// Received signals attribute to the content author via a join; the
// window filter is always on the event row, not the content row.
const LONG_WINDOW_QUERIES: [(SignalKind, &str); 10] = [
    (
        SignalKind::Posts,
        "SELECT author_id, COUNT(*), MAX(created_at)
         FROM posts WHERE created_at >= ?1 GROUP BY author_id",
    ),
    (
        SignalKind::LikesGiven,
        "SELECT member_id, COUNT(*), MAX(created_at)
         FROM likes WHERE created_at >= ?1 GROUP BY member_id",
    ),
    (
        SignalKind::LikesReceived,
        "SELECT p.author_id, COUNT(*), MAX(l.created_at)
         FROM likes l JOIN posts p ON p.id = l.post_id
         WHERE l.created_at >= ?1 GROUP BY p.author_id",
    ),
    (
        SignalKind::CommentsGiven,
        "SELECT author_id, COUNT(*), MAX(created_at)
         FROM comments WHERE created_at >= ?1 GROUP BY author_id",
    ),
    (
        SignalKind::CommentsReceived,
        "SELECT p.author_id, COUNT(*), MAX(c.created_at)
         FROM comments c JOIN posts p ON p.id = c.post_id
         WHERE c.created_at >= ?1 GROUP BY p.author_id",
    ),
    (
        SignalKind::FollowsGained,
        "SELECT followee_id, COUNT(*), MAX(created_at)
         FROM follows WHERE created_at >= ?1 GROUP BY followee_id",
    ),
    (
        SignalKind::FollowsGiven,
        "SELECT follower_id, COUNT(*), MAX(created_at)
         FROM follows WHERE created_at >= ?1 GROUP BY follower_id",
    ),
    (
        SignalKind::Stories,
        "SELECT author_id, COUNT(*), MAX(created_at)
         FROM stories WHERE created_at >= ?1 GROUP BY author_id",
    ),
    (
        SignalKind::StoryViewsReceived,
        "SELECT s.author_id, COUNT(*), MAX(v.created_at)
         FROM story_views v JOIN stories s ON s.id = v.story_id
         WHERE v.created_at >= ?1 GROUP BY s.author_id",
    ),
    (
        SignalKind::ChatMessages,
        "SELECT sender_id, COUNT(*), MAX(created_at)
         FROM chat_messages WHERE created_at >= ?1 GROUP BY sender_id",
    ),
];

const RECENT_POSTS_QUERY: &str = "SELECT author_id, COUNT(*)
     FROM posts WHERE created_at >= ?1 GROUP BY author_id";

/// Collect the signal windows visible at `now`: 30-day counts plus the
/// latest event timestamp per signal, and the separate 7-day post
/// count.
pub fn collect_windows(conn: &Connection, now: DateTime<Utc>) -> PulseResult<SignalWindows> {
    let long_cutoff = (now - Duration::days(LONG_WINDOW_DAYS)).to_rfc3339();
    let short_cutoff = (now - Duration::days(SHORT_WINDOW_DAYS)).to_rfc3339();

    let mut windows = SignalWindows::default();
    for (kind, sql) in LONG_WINDOW_QUERIES {
        collect_signal(conn, &mut windows, kind, sql, &long_cutoff)?;
    }

    let mut stmt = conn
        .prepare(RECENT_POSTS_QUERY)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([&short_cutoff], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    for row in rows {
        let (member_id, count) = row.map_err(|e| to_storage_err(e.to_string()))?;
        windows.record_recent_posts(member_id, count.max(0) as u64);
    }

    Ok(windows)
}

fn collect_signal(
    conn: &Connection,
    windows: &mut SignalWindows,
    kind: SignalKind,
    sql: &str,
    cutoff: &str,
) -> PulseResult<()> {
    let mut stmt = conn.prepare(sql).map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([cutoff], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    for row in rows {
        let (member_id, count, last_at) = row.map_err(|e| to_storage_err(e.to_string()))?;
        let sample = SignalSample {
            count: count.max(0) as u64,
            last_at: parse_dt(&last_at)?,
        };
        windows.record(kind, member_id, sample);
    }
    Ok(())
}
