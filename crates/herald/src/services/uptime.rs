//! Uptime Formatting
//!
//! Renders the elapsed time since the gateway connection became ready.

use chrono::{DateTime, Utc};

/// Human-readable uptime since `started_at`
///
/// `None` (connection never became ready) renders as "Not available".
/// A clock step backwards past the start instant is clamped to zero
/// rather than rendered as nonsense.
pub fn format_uptime(started_at: Option<DateTime<Utc>>) -> String {
    match started_at {
        None => "Not available".to_string(),
        Some(started) => {
            let elapsed = (Utc::now() - started).num_seconds().max(0) as u64;
            render_elapsed(elapsed)
        }
    }
}

/// Largest-unit-first truncation: the highest non-zero unit and every
/// unit below it.
fn render_elapsed(total_secs: u64) -> String {
    let seconds = total_secs % 60;
    let minutes = (total_secs / 60) % 60;
    let hours = (total_secs / 3600) % 24;
    let days = total_secs / 86_400;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m {seconds}s")
    } else if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}
