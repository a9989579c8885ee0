//! Train-mode boundary rule
//!
//! While train mode is On, every delivered position tick is checked against
//! the selected cluster's segment boundaries. Segments are non-contiguous,
//! so unconstrained playback would run into another speaker's audio; the
//! rule detects "fell off the end of a segment" and plans a seek to the next
//! segment of the same cluster, or a pause when the last segment is
//! exhausted.
//!
//! The scan walks the segments in reverse chronological order. For the
//! first segment whose end the position has passed, a reversed-scan index
//! `n > 0` means at least one later segment exists; its chronological index
//! is `len - n`. `n == 0` means the position ran past the very last segment
//! with nothing queued after it. A segment whose start the position has
//! reached (but not its end) stops the scan with no action: the position is
//! legitimately inside a segment. Only the first qualifying boundary per
//! tick is acted on.

use crate::cluster::Segment;
use crate::time::Ticks;

/// Transport correction planned for one position tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickAction {
    /// Position is inside a segment (or before the first); leave playback
    /// alone
    Stay,
    /// Playback ran past a segment end; resume at this tick position
    Seek(Ticks),
    /// Playback ran past the last segment; pause and leave train mode
    Pause,
}

/// Plan the correction for `position` against a cluster's chronologically
/// sorted segments
pub fn tick_action(segments: &[Segment], position: Ticks) -> TickAction {
    for (n, segment) in segments.iter().rev().enumerate() {
        if position >= segment.end {
            if n > 0 {
                let next = segments.len() - n;
                return TickAction::Seek(segments[next].start);
            }
            return TickAction::Pause;
        }
        if position >= segment.start {
            return TickAction::Stay;
        }
    }
    TickAction::Stay
}
