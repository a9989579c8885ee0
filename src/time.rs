//! Tick time base utilities
//!
//! All positions and segment boundaries share a single time base:
//! hundredths of a second, stored as integer ticks.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Playback time in hundredths of a second
pub type Ticks = u64;

/// Ticks per second of media time
pub const TICKS_PER_SECOND: Ticks = 100;

/// Get current UTC timestamp (used on every published event)
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Convert ticks to a wall-clock duration
pub fn ticks_to_duration(ticks: Ticks) -> Duration {
    Duration::from_millis(ticks * 10)
}

/// Convert whole seconds to ticks
pub fn seconds_to_ticks(seconds: u64) -> Ticks {
    seconds * TICKS_PER_SECOND
}

/// Format a tick position as an MM:SS track counter label
pub fn format_clock(ticks: Ticks) -> String {
    let total_seconds = ticks / TICKS_PER_SECOND;
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}
