//! Error types for timer operations

use thiserror::Error;

/// Errors from the strict timer API. Direct callers get the misuse variants
/// as-is; the command layer in [`crate::timer::commands`] translates them
/// into no-ops and only ever surfaces `Storage`.
#[derive(Debug, Error)]
pub enum TimerError {
    #[error("cannot start an already-running timer")]
    StartWhileRunning,

    #[error("cannot resume an already-running timer")]
    ResumeWhileRunning,

    #[error("cannot resume a stopped timer")]
    ResumeAfterStop,

    #[error("no running timer in scope {owner:?}")]
    NotRunning { owner: Option<String> },

    #[error("timer {id} not found")]
    NotFound { id: String },

    #[error("segment {id} is still open")]
    OpenSegment { id: String },

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
