use chrono::{Duration, Utc};
use log::info;
use serde::Serialize;
use uuid::Uuid;

use crate::db::{
    models::{Segment, Timer, TimerStatus},
    repositories::{segments, timers},
    Database,
};

use super::TimerError;

/// Point-in-time view of a timer for display layers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub timer: Timer,
    pub duration_ms: i64,
}

fn new_timer(owner: Option<&str>, status: TimerStatus) -> Timer {
    let now = Utc::now();
    Timer {
        id: Uuid::new_v4().to_string(),
        owner: owner.map(str::to_string),
        status,
        created_at: now,
        updated_at: now,
    }
}

/// The strict state machine over persisted timers. Every mutation is one
/// read-modify-write transaction on the database worker; state transitions
/// fail fast on misuse, so programmatic callers see their bugs. The forgiving
/// per-endpoint wrappers live in [`super::commands`].
#[derive(Clone)]
pub struct TimerController {
    db: Database,
}

impl TimerController {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Inserts a fresh timer with no segments. It is born paused: zero open
    /// segments, startable, not yet accumulating.
    pub async fn create(&self, owner: Option<&str>) -> Result<Timer, TimerError> {
        let timer = new_timer(owner, TimerStatus::Paused);
        let record = timer.clone();
        self.db
            .execute(move |conn| timers::insert(conn, &record))
            .await?;
        Ok(timer)
    }

    /// Creates a timer and opens its first segment in one transaction.
    pub async fn create_and_start(&self, owner: Option<&str>) -> Result<Timer, TimerError> {
        let timer = new_timer(owner, TimerStatus::Running);
        let record = timer.clone();
        self.db
            .execute(move |conn| {
                let tx = conn.transaction()?;
                timers::insert(&tx, &record)?;
                segments::open(&tx, &record.id, record.created_at)?;
                tx.commit()?;
                Ok(())
            })
            .await?;
        info!("Started timer {} in scope {:?}", timer.id, timer.owner);
        Ok(timer)
    }

    /// Opens a new segment and moves the timer to running. Fails with
    /// [`TimerError::StartWhileRunning`] if it already is.
    pub async fn start(&self, timer_id: &str) -> Result<Timer, TimerError> {
        let id = timer_id.to_string();
        self.db
            .execute(move |conn| {
                let tx = conn.transaction()?;
                let timer = match timers::get(&tx, &id)? {
                    Some(timer) => timer,
                    None => return Ok(Err(TimerError::NotFound { id })),
                };
                if timer.running() {
                    return Ok(Err(TimerError::StartWhileRunning));
                }

                let now = Utc::now();
                segments::open(&tx, &timer.id, now)?;
                timers::set_status(&tx, &timer.id, TimerStatus::Running, now)?;
                tx.commit()?;

                Ok(Ok(Timer {
                    status: TimerStatus::Running,
                    updated_at: now,
                    ..timer
                }))
            })
            .await?
    }

    /// Closes the open segment and moves the timer to paused. Pausing a timer
    /// that is not running is a silent no-op.
    pub async fn pause(&self, timer_id: &str) -> Result<Timer, TimerError> {
        let id = timer_id.to_string();
        self.db
            .execute(move |conn| {
                let tx = conn.transaction()?;
                let timer = match timers::get(&tx, &id)? {
                    Some(timer) => timer,
                    None => return Ok(Err(TimerError::NotFound { id })),
                };
                if !timer.running() {
                    return Ok(Ok(timer));
                }

                let now = Utc::now();
                segments::close_open(&tx, &timer.id, now)?;
                timers::set_status(&tx, &timer.id, TimerStatus::Paused, now)?;
                tx.commit()?;

                Ok(Ok(Timer {
                    status: TimerStatus::Paused,
                    updated_at: now,
                    ..timer
                }))
            })
            .await?
    }

    /// Opens a new segment on a paused timer. Running and stopped timers
    /// cannot be resumed; stopped is terminal.
    pub async fn resume(&self, timer_id: &str) -> Result<Timer, TimerError> {
        let id = timer_id.to_string();
        self.db
            .execute(move |conn| {
                let tx = conn.transaction()?;
                let timer = match timers::get(&tx, &id)? {
                    Some(timer) => timer,
                    None => return Ok(Err(TimerError::NotFound { id })),
                };
                match timer.status {
                    TimerStatus::Running => return Ok(Err(TimerError::ResumeWhileRunning)),
                    TimerStatus::Stopped => return Ok(Err(TimerError::ResumeAfterStop)),
                    TimerStatus::Paused => {}
                }

                let now = Utc::now();
                segments::open(&tx, &timer.id, now)?;
                timers::set_status(&tx, &timer.id, TimerStatus::Running, now)?;
                tx.commit()?;

                Ok(Ok(Timer {
                    status: TimerStatus::Running,
                    updated_at: now,
                    ..timer
                }))
            })
            .await?
    }

    /// Moves the timer to stopped, closing the open segment if it was
    /// running. Stopping an already-stopped timer is a silent no-op.
    pub async fn stop(&self, timer_id: &str) -> Result<Timer, TimerError> {
        let id = timer_id.to_string();
        let result = self
            .db
            .execute(move |conn| {
                let tx = conn.transaction()?;
                let timer = match timers::get(&tx, &id)? {
                    Some(timer) => timer,
                    None => return Ok(Err(TimerError::NotFound { id })),
                };
                if timer.stopped() {
                    return Ok(Ok(timer));
                }

                let now = Utc::now();
                if timer.running() {
                    segments::close_open(&tx, &timer.id, now)?;
                }
                timers::set_status(&tx, &timer.id, TimerStatus::Stopped, now)?;
                tx.commit()?;

                Ok(Ok(Timer {
                    status: TimerStatus::Stopped,
                    updated_at: now,
                    ..timer
                }))
            })
            .await?;

        if let Ok(timer) = &result {
            info!("Stopped timer {}", timer.id);
        }
        result
    }

    /// Total accumulated time: closed segment durations plus, for any open
    /// segment, elapsed time up to now. Open segments count regardless of the
    /// status column, so a racing writer can never make this jump backwards.
    pub async fn duration(&self, timer_id: &str) -> Result<Duration, TimerError> {
        let id = timer_id.to_string();
        self.db
            .execute(move |conn| {
                let timer = match timers::get(conn, &id)? {
                    Some(timer) => timer,
                    None => return Ok(Err(TimerError::NotFound { id })),
                };

                let now = Utc::now();
                let mut total = Duration::zero();
                for segment in segments::for_timer(conn, &timer.id)? {
                    let end = segment.stop_time.unwrap_or(now);
                    total = total + (end - segment.start_time);
                }

                Ok(Ok(total))
            })
            .await?
    }

    pub async fn get(&self, timer_id: &str) -> Result<Timer, TimerError> {
        let id = timer_id.to_string();
        self.db
            .execute(move |conn| {
                Ok(match timers::get(conn, &id)? {
                    Some(timer) => Ok(timer),
                    None => Err(TimerError::NotFound { id }),
                })
            })
            .await?
    }

    /// The timer's segments in chronological order.
    pub async fn segments(&self, timer_id: &str) -> Result<Vec<Segment>, TimerError> {
        let id = timer_id.to_string();
        let segments = self
            .db
            .execute(move |conn| segments::for_timer(conn, &id))
            .await?;
        Ok(segments)
    }

    /// The running timer for the owner scope, or a freshly started one. The
    /// lookup and insert share a transaction, so duplicate concurrent calls
    /// cannot create two running timers for the same scope.
    pub async fn get_or_start(&self, owner: Option<&str>) -> Result<Timer, TimerError> {
        let fresh = new_timer(owner, TimerStatus::Running);
        let owner_key = owner.map(str::to_string);
        let timer = self
            .db
            .execute(move |conn| {
                let tx = conn.transaction()?;
                if let Some(existing) = timers::find_running_for_owner(&tx, owner_key.as_deref())? {
                    return Ok(existing);
                }

                timers::insert(&tx, &fresh)?;
                segments::open(&tx, &fresh.id, fresh.created_at)?;
                tx.commit()?;
                info!("Started timer {} in scope {:?}", fresh.id, fresh.owner);
                Ok(fresh)
            })
            .await?;
        Ok(timer)
    }

    /// The currently running timer for the owner scope.
    pub async fn get_for_owner(&self, owner: Option<&str>) -> Result<Timer, TimerError> {
        let owner_key = owner.map(str::to_string);
        self.db
            .execute(move |conn| {
                Ok(match timers::find_running_for_owner(conn, owner_key.as_deref())? {
                    Some(timer) => Ok(timer),
                    None => Err(TimerError::NotRunning { owner: owner_key }),
                })
            })
            .await?
    }

    /// The most recently created timer for the owner scope, any status.
    pub async fn latest_for_owner(&self, owner: Option<&str>) -> Result<Option<Timer>, TimerError> {
        let owner_key = owner.map(str::to_string);
        let timer = self
            .db
            .execute(move |conn| timers::latest_for_owner(conn, owner_key.as_deref()))
            .await?;
        Ok(timer)
    }

    pub async fn snapshot(&self, timer_id: &str) -> Result<TimerSnapshot, TimerError> {
        let timer = self.get(timer_id).await?;
        let duration = self.duration(timer_id).await?;
        Ok(TimerSnapshot {
            timer,
            duration_ms: duration.num_milliseconds(),
        })
    }
}
