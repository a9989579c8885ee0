//! Configuration for the diarist engine
//!
//! All tunables live in an explicit configuration struct passed at
//! construction time. Values can be loaded from a minimal TOML file;
//! missing keys fall back to built-in defaults defined in code.

use crate::error::{Error, Result};
use crate::time::Ticks;
use serde::Deserialize;
use std::path::Path;

/// Engine tunables
///
/// Every field has a built-in default matching the reference cadences:
/// position polled every 100 ms, recognition status every 2 s.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Interval between transport position polls (milliseconds)
    #[serde(default = "default_position_poll_interval_ms")]
    pub position_poll_interval_ms: u64,

    /// Interval between recognition status probes (milliseconds)
    #[serde(default = "default_status_poll_interval_ms")]
    pub status_poll_interval_ms: u64,

    /// Presentation throttle: a `PlaybackPosition` event is emitted only on
    /// ticks where `position % display_refresh_ticks == 0`. This re-renders
    /// the position at a coarser cadence than it is polled; it is not a
    /// correctness requirement.
    #[serde(default = "default_display_refresh_ticks")]
    pub display_refresh_ticks: Ticks,

    /// Event bus channel capacity (events buffered before slow subscribers
    /// start lagging)
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_position_poll_interval_ms() -> u64 {
    100
}

fn default_status_poll_interval_ms() -> u64 {
    2000
}

fn default_display_refresh_ticks() -> Ticks {
    10
}

fn default_event_capacity() -> usize {
    256
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            position_poll_interval_ms: default_position_poll_interval_ms(),
            status_poll_interval_ms: default_status_poll_interval_ms(),
            display_refresh_ticks: default_display_refresh_ticks(),
            event_capacity: default_event_capacity(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file, applying built-in defaults for
    /// missing keys
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the polling loops cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.position_poll_interval_ms == 0 {
            return Err(Error::Config(
                "position_poll_interval_ms must be non-zero".into(),
            ));
        }
        if self.status_poll_interval_ms == 0 {
            return Err(Error::Config(
                "status_poll_interval_ms must be non-zero".into(),
            ));
        }
        if self.display_refresh_ticks == 0 {
            return Err(Error::Config(
                "display_refresh_ticks must be non-zero".into(),
            ));
        }
        if self.event_capacity == 0 {
            return Err(Error::Config("event_capacity must be non-zero".into()));
        }
        Ok(())
    }
}
