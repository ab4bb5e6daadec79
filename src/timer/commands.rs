//! Endpoint-shaped command layer. Each write function backs one POST route
//! in the host application and tolerates duplicate or out-of-order
//! submissions: a double-clicked button must never surface an error to the
//! user. Only storage failures propagate.
//!
//! Targets resolve by owner scope: the most recently created timer for that
//! scope, whatever its status, so a resume can reach the timer a pause just
//! left paused.

use anyhow::Result;
use log::warn;

use crate::db::models::Timer;

use super::{TimerController, TimerError, TimerSnapshot};

/// The running timer for the owner scope, creating and starting one if
/// needed. Posting twice yields the same timer.
pub async fn start_timer(controller: &TimerController, owner: Option<&str>) -> Result<Timer> {
    let timer = controller.get_or_start(owner).await?;
    Ok(timer)
}

/// Pauses the scope's latest timer. No timer, or one that is already paused
/// or stopped, is a no-op.
pub async fn pause_timer(
    controller: &TimerController,
    owner: Option<&str>,
) -> Result<Option<Timer>> {
    let Some(timer) = controller.latest_for_owner(owner).await? else {
        return Ok(None);
    };
    let timer = controller.pause(&timer.id).await?;
    Ok(Some(timer))
}

/// Resumes the scope's latest timer. Resuming one that is already running,
/// or stopped for good, is a no-op.
pub async fn resume_timer(
    controller: &TimerController,
    owner: Option<&str>,
) -> Result<Option<Timer>> {
    let Some(timer) = controller.latest_for_owner(owner).await? else {
        return Ok(None);
    };
    match controller.resume(&timer.id).await {
        Ok(resumed) => Ok(Some(resumed)),
        Err(err @ (TimerError::ResumeWhileRunning | TimerError::ResumeAfterStop)) => {
            warn!("Ignoring resume on timer {}: {err}", timer.id);
            Ok(Some(timer))
        }
        Err(other) => Err(other.into()),
    }
}

/// Stops the scope's latest timer. No timer, or one already stopped, is a
/// no-op.
pub async fn stop_timer(
    controller: &TimerController,
    owner: Option<&str>,
) -> Result<Option<Timer>> {
    let Some(timer) = controller.latest_for_owner(owner).await? else {
        return Ok(None);
    };
    let timer = controller.stop(&timer.id).await?;
    Ok(Some(timer))
}

/// Snapshot of the scope's latest timer for display glue.
pub async fn timer_state(
    controller: &TimerController,
    owner: Option<&str>,
) -> Result<Option<TimerSnapshot>> {
    let Some(timer) = controller.latest_for_owner(owner).await? else {
        return Ok(None);
    };
    let snapshot = controller.snapshot(&timer.id).await?;
    Ok(Some(snapshot))
}
