//! Presentational helpers for embedding a timer in a page. The fragment
//! carries a stable element id and a whole-second `value` attribute that the
//! frontend ticker script reads to keep counting client-side; the attribute
//! is left empty when the timer is not running so a frozen timer never ticks.

use chrono::Duration;

use crate::db::models::Timer;

/// Element id the frontend ticker script looks up.
pub const TIMER_ELEMENT_ID: &str = "stint-timer";

/// Formats a duration the way the widget displays it: `MM:SS`, with an
/// unpadded hour component once the timer passes an hour.
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.num_seconds().max(0);
    let seconds = total_secs % 60;
    let minutes = (total_secs / 60) % 60;
    let hours = total_secs / 3600;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Renders the widget fragment for a timer at the given accumulated duration.
pub fn render_timer(timer: &Timer, duration: Duration) -> String {
    let status = timer.status.as_str();
    let value = if timer.running() {
        duration.num_seconds().max(0).to_string()
    } else {
        String::new()
    };

    format!(
        r#"<span id="{TIMER_ELEMENT_ID}" class="stint-timer stint-timer-{status}" data-status="{status}" value="{value}">{}</span>"#,
        format_duration(duration),
    )
}
