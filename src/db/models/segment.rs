use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerError;

/// One contiguous interval of running time belonging to a timer. Open while
/// the timer runs; `stop_time` is set exactly once when the timer leaves the
/// running state and never changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub id: String,
    pub timer_id: String,
    pub start_time: DateTime<Utc>,
    pub stop_time: Option<DateTime<Utc>>,
}

impl Segment {
    pub fn is_open(&self) -> bool {
        self.stop_time.is_none()
    }

    /// Elapsed time of a closed segment. An open segment has no duration yet;
    /// callers wanting live elapsed time go through
    /// [`TimerController::duration`](crate::timer::TimerController::duration).
    pub fn duration(&self) -> Result<Duration, TimerError> {
        match self.stop_time {
            Some(stop) => Ok(stop - self.start_time),
            None => Err(TimerError::OpenSegment {
                id: self.id.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    use super::*;

    fn segment(stop_time: Option<DateTime<Utc>>) -> Segment {
        Segment {
            id: "seg-1".into(),
            timer_id: "timer-1".into(),
            start_time: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
            stop_time,
        }
    }

    #[test]
    fn closed_segment_reports_duration() {
        let stop = Utc.with_ymd_and_hms(2024, 5, 1, 9, 25, 30).unwrap();
        let segment = segment(Some(stop));
        assert!(!segment.is_open());
        assert_eq!(segment.duration().unwrap(), Duration::seconds(25 * 60 + 30));
    }

    #[test]
    fn open_segment_has_no_duration() {
        let segment = segment(None);
        assert!(segment.is_open());
        assert_matches!(segment.duration(), Err(TimerError::OpenSegment { .. }));
    }
}
