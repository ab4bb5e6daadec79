//! SQL unit operations on the `segments` table.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use crate::db::{
    helpers::{parse_datetime, parse_optional_datetime},
    models::Segment,
};

fn row_to_segment(row: &Row) -> Result<Segment> {
    let start_time: String = row.get("start_time")?;
    let stop_time: Option<String> = row.get("stop_time")?;

    Ok(Segment {
        id: row.get("id")?,
        timer_id: row.get("timer_id")?,
        start_time: parse_datetime(&start_time, "start_time")?,
        stop_time: parse_optional_datetime(stop_time, "stop_time")?,
    })
}

/// Opens a new segment for the timer at `start_time`.
pub fn open(conn: &Connection, timer_id: &str, start_time: DateTime<Utc>) -> Result<Segment> {
    let segment = Segment {
        id: Uuid::new_v4().to_string(),
        timer_id: timer_id.to_string(),
        start_time,
        stop_time: None,
    };

    conn.execute(
        "INSERT INTO segments (id, timer_id, start_time, stop_time)
         VALUES (?1, ?2, ?3, NULL)",
        params![segment.id, segment.timer_id, segment.start_time.to_rfc3339()],
    )?;

    Ok(segment)
}

/// Closes every open segment of the timer at `stop_time`. A consistent timer
/// has at most one; closing all of them lets a transition repair storage that
/// a racing writer left inconsistent.
pub fn close_open(conn: &Connection, timer_id: &str, stop_time: DateTime<Utc>) -> Result<usize> {
    let affected = conn.execute(
        "UPDATE segments
         SET stop_time = ?1
         WHERE timer_id = ?2 AND stop_time IS NULL",
        params![stop_time.to_rfc3339(), timer_id],
    )?;
    Ok(affected)
}

/// All segments of a timer in chronological order.
pub fn for_timer(conn: &Connection, timer_id: &str) -> Result<Vec<Segment>> {
    let mut stmt = conn.prepare(
        "SELECT id, timer_id, start_time, stop_time
         FROM segments
         WHERE timer_id = ?1
         ORDER BY start_time ASC",
    )?;

    let rows = stmt.query_map(params![timer_id], |row| Ok(row_to_segment(row)))?;

    let mut segments = Vec::new();
    for row in rows {
        segments.push(row??);
    }

    Ok(segments)
}
