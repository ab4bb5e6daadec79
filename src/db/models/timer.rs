use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a timer. Exactly one of the three flags below is true
/// at any point; `stopped` is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TimerStatus {
    Running,
    Paused,
    Stopped,
}

impl TimerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
            TimerStatus::Stopped => "stopped",
        }
    }
}

/// A timer accumulates elapsed time as an ordered sequence of segments.
/// `owner` scopes lookups; `None` is the shared anonymous scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timer {
    pub id: String,
    pub owner: Option<String>,
    pub status: TimerStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Timer {
    pub fn running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn paused(&self) -> bool {
        self.status == TimerStatus::Paused
    }

    pub fn stopped(&self) -> bool {
        self.status == TimerStatus::Stopped
    }
}
