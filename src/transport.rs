//! Media transport boundary
//!
//! The engine drives playback only through this narrow trait; the concrete
//! player (decoding, output device, window embedding) lives behind it.
//! Position and duration share the tick time base of the segment index.

use crate::error::Result;
use crate::time::Ticks;
use std::path::Path;
use tokio::sync::broadcast;

/// Seek request
///
/// Absolute seeks target a tick position; relative seeks offset from the
/// current position (negative offsets rewind).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seek {
    Absolute(Ticks),
    Relative(i64),
}

/// Events published by the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportEvent {
    /// Media loaded and playable; duration is now known
    MediaStarted { duration: Ticks },
    /// Playback ran off the end of the media
    MediaFinished,
    /// Underlying player process came up
    ProcessStarted,
    /// Underlying player process went away
    ProcessStopped,
}

/// Playback transport collaborator
///
/// Commands are issued from the interactive path only. `position` and
/// `duration` return [`crate::Error::PositionUnavailable`] while nothing is
/// loaded or a seek is in flight; pollers must treat that as a missed tick.
pub trait Transport: Send + Sync {
    /// Bind a media file for playback
    fn load(&self, path: &Path) -> Result<()>;

    /// Resume playback
    fn play(&self) -> Result<()>;

    /// Pause playback
    fn pause(&self) -> Result<()>;

    /// Reposition playback
    fn seek(&self, target: Seek) -> Result<()>;

    /// Current playback position in ticks
    fn position(&self) -> Result<Ticks>;

    /// Total media duration in ticks
    fn duration(&self) -> Result<Ticks>;

    /// Silence output without pausing (used while repositioning)
    fn mute(&self, enabled: bool) -> Result<()>;

    /// Subscribe to transport lifecycle events
    fn subscribe(&self) -> broadcast::Receiver<TransportEvent>;
}
