//! Speaker-recognition model boundary
//!
//! The diarization/recognition pipeline and its acoustic model database live
//! behind this trait. The engine only binds a source, launches the pipeline
//! on a blocking task, probes coarse progress, and reads the resulting
//! cluster set once the terminal stage is reached.

use crate::cluster::Cluster;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Version tag passed to [`SpeakerModel::update_store`] when persisting
/// edited speaker labels
pub const MODEL_STORE_VERSION: u32 = 1;

/// Recognition pipeline progress
///
/// A strictly ordered enumeration; [`RecognitionStage::Finished`] is the
/// terminal stage, at which the cluster set is fully populated and safe to
/// read. Observed ordinals over a run form a non-decreasing sequence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RecognitionStage {
    /// Job not started or just started
    Idle,
    /// Source media bound
    SourceLoaded,
    /// Audio extracted/converted for analysis
    AudioConverted,
    /// Speech segmented into per-speaker clusters
    Segmented,
    /// Clusters scored against the speaker model database
    SpeakersMatched,
    /// Pipeline complete; cluster set populated
    Finished,
}

impl RecognitionStage {
    /// Ordinal progress value (0 through 5)
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// Whether this is the terminal stage
    pub fn is_terminal(&self) -> bool {
        *self >= RecognitionStage::Finished
    }
}

impl std::fmt::Display for RecognitionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecognitionStage::Idle => write!(f, "idle"),
            RecognitionStage::SourceLoaded => write!(f, "source loaded"),
            RecognitionStage::AudioConverted => write!(f, "audio converted"),
            RecognitionStage::Segmented => write!(f, "segmented"),
            RecognitionStage::SpeakersMatched => write!(f, "speakers matched"),
            RecognitionStage::Finished => write!(f, "finished"),
        }
    }
}

/// Recognition/model collaborator
///
/// `extract_speakers` is a long-running blocking call; the engine runs it on
/// a blocking task off the interactive path and never calls it twice for one
/// run. Status probes may fail transiently while the pipeline is between
/// stages; callers log and continue.
pub trait SpeakerModel: Send + Sync {
    /// Bind a media source for recognition
    fn load_source(&self, path: &Path) -> Result<()>;

    /// Run the recognition pipeline to completion (blocking)
    fn extract_speakers(&self) -> Result<()>;

    /// Coarse-grained pipeline progress
    fn status(&self) -> Result<RecognitionStage>;

    /// Human-readable phase description for the current stage
    fn working_status(&self) -> Result<String>;

    /// The cluster set produced by the pipeline; only meaningful once
    /// [`RecognitionStage::Finished`] is observed
    fn clusters(&self) -> Result<Vec<Cluster>>;

    /// Persist edited speaker labels back to the model store
    fn update_store(&self, version: u32) -> Result<()>;
}
