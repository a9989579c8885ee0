//! Segment index
//!
//! Ordered, non-overlapping time intervals belonging to one cluster, and the
//! containment/boundary queries the navigator and selection logic run
//! against them.
//!
//! Segment counts per cluster are small (bounded by one file's diarization
//! output), so a linear scan over the sorted vector is sufficient; keeping
//! the vector sorted means bisection could replace the scan without any
//! behavior change.

use crate::time::Ticks;
use serde::{Deserialize, Serialize};

/// Immutable speech interval in ticks, `start < end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Interval start (inclusive)
    pub start: Ticks,
    /// Interval end (exclusive)
    pub end: Ticks,
}

impl Segment {
    /// Create a segment; `start` must precede `end`
    pub fn new(start: Ticks, end: Ticks) -> Self {
        debug_assert!(start < end, "segment start must precede end");
        Self { start, end }
    }

    /// Containment test: `start <= t < end`
    pub fn contains(&self, t: Ticks) -> bool {
        t >= self.start && t < self.end
    }

    /// Interval length in ticks
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }
}

/// One cluster's segments, kept sorted ascending by start
#[derive(Debug, Clone, Default)]
pub struct SegmentTimeline {
    segments: Vec<Segment>,
}

impl SegmentTimeline {
    /// Create a timeline; segments are sorted by start on construction
    pub fn new(mut segments: Vec<Segment>) -> Self {
        segments.sort_by_key(|s| s.start);
        Self { segments }
    }

    /// The segment containing `t`, if any
    pub fn segment_at(&self, t: Ticks) -> Option<&Segment> {
        self.segments.iter().find(|s| s.contains(t))
    }

    /// The first segment starting strictly after `t` (skip-to-segment
    /// navigation)
    pub fn next_after(&self, t: Ticks) -> Option<&Segment> {
        self.segments.iter().find(|s| s.start > t)
    }

    /// Chronologically first segment
    pub fn first(&self) -> Option<&Segment> {
        self.segments.first()
    }

    /// Chronologically last segment
    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// All segments in chronological order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// (start, end) pairs for presentation-layer painting
    pub fn spans(&self) -> Vec<(Ticks, Ticks)> {
        self.segments.iter().map(|s| (s.start, s.end)).collect()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
