//! Cluster data model
//!
//! A cluster is the set of speech segments the recognition pipeline
//! attributes to one distinct speaker within a single source file. Clusters
//! are created in bulk when a recognition run completes and destroyed only
//! by the next run's full replacement.

pub mod segment;
pub mod store;

pub use segment::{Segment, SegmentTimeline};
pub use store::ClusterStore;

/// Sentinel speaker label for clusters nobody has named yet
pub const UNKNOWN_SPEAKER: &str = "unknown";

/// One detected speaker cluster
#[derive(Debug, Clone)]
pub struct Cluster {
    /// Stable name assigned by the recognizer, unique within a session
    name: String,

    /// Operator-assigned speaker label; defaults to [`UNKNOWN_SPEAKER`]
    speaker: String,

    /// Chronologically ordered speech segments
    timeline: SegmentTimeline,

    /// Score mean from the recognition job (read-only here)
    mean: f64,

    /// Score distance from the recognition job (read-only here)
    distance: f64,
}

impl Cluster {
    /// Create a cluster with the sentinel speaker label
    pub fn new(name: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            name: name.into(),
            speaker: UNKNOWN_SPEAKER.to_string(),
            timeline: SegmentTimeline::new(segments),
            mean: 0.0,
            distance: 0.0,
        }
    }

    /// Attach recognition score statistics
    pub fn with_stats(mut self, mean: f64, distance: f64) -> Self {
        self.mean = mean;
        self.distance = distance;
        self
    }

    /// Attach a known speaker label (recognizer matched a stored model)
    pub fn with_speaker(mut self, speaker: impl Into<String>) -> Self {
        self.speaker = speaker.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    pub(crate) fn set_speaker(&mut self, speaker: &str) {
        self.speaker = speaker.to_string();
    }

    pub fn timeline(&self) -> &SegmentTimeline {
        &self.timeline
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Display string shown in the speakers list: `"<name> (<speaker>)"`
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.speaker)
    }

    /// Whether the speaker label is still the sentinel
    pub fn is_unknown(&self) -> bool {
        self.speaker == UNKNOWN_SPEAKER
    }
}
