//! SQL unit operations on the `timers` table. These run on a borrowed
//! connection so the controller can compose several of them inside one
//! transaction.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::{
    helpers::{parse_datetime, parse_status},
    models::{Timer, TimerStatus},
};

fn row_to_timer(row: &Row) -> Result<Timer> {
    let status: String = row.get("status")?;
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(Timer {
        id: row.get("id")?,
        owner: row.get("owner")?,
        status: parse_status(&status)?,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

pub fn insert(conn: &Connection, timer: &Timer) -> Result<()> {
    conn.execute(
        "INSERT INTO timers (id, owner, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            timer.id,
            timer.owner,
            timer.status.as_str(),
            timer.created_at.to_rfc3339(),
            timer.updated_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn get(conn: &Connection, timer_id: &str) -> Result<Option<Timer>> {
    let mut stmt = conn.prepare(
        "SELECT id, owner, status, created_at, updated_at
         FROM timers
         WHERE id = ?1",
    )?;

    let row = stmt
        .query_row(params![timer_id], |row| Ok(row_to_timer(row)))
        .optional()?;
    row.transpose()
}

/// The running timer for an owner scope. The partial unique index keeps this
/// to at most one row.
pub fn find_running_for_owner(conn: &Connection, owner: Option<&str>) -> Result<Option<Timer>> {
    let mut stmt = conn.prepare(
        "SELECT id, owner, status, created_at, updated_at
         FROM timers
         WHERE status = 'running' AND ifnull(owner, '') = ifnull(?1, '')
         LIMIT 1",
    )?;

    let row = stmt
        .query_row(params![owner], |row| Ok(row_to_timer(row)))
        .optional()?;
    row.transpose()
}

/// Most recently created timer for an owner scope, any status.
pub fn latest_for_owner(conn: &Connection, owner: Option<&str>) -> Result<Option<Timer>> {
    let mut stmt = conn.prepare(
        "SELECT id, owner, status, created_at, updated_at
         FROM timers
         WHERE ifnull(owner, '') = ifnull(?1, '')
         ORDER BY created_at DESC
         LIMIT 1",
    )?;

    let row = stmt
        .query_row(params![owner], |row| Ok(row_to_timer(row)))
        .optional()?;
    row.transpose()
}

pub fn set_status(
    conn: &Connection,
    timer_id: &str,
    status: TimerStatus,
    updated_at: DateTime<Utc>,
) -> Result<()> {
    let affected = conn.execute(
        "UPDATE timers
         SET status = ?1,
             updated_at = ?2
         WHERE id = ?3",
        params![status.as_str(), updated_at.to_rfc3339(), timer_id],
    )?;

    if affected == 0 {
        return Err(anyhow!("timer {timer_id} not found"));
    }
    Ok(())
}
