//! # diarist
//!
//! Playback/segment synchronization engine for reviewing speaker-diarization
//! output.
//!
//! **Purpose:** keep a continuously advancing playback position in sync with
//! the detected speaker segments, navigate cluster boundaries automatically
//! during train mode, and coordinate the long-running background recognition
//! job without blocking the interactive session.
//!
//! **Architecture:** a [`ReviewEngine`] drives a narrow [`Transport`] trait
//! (the media player) and a [`SpeakerModel`] trait (the recognition
//! pipeline). Cluster data lives in a [`ClusterStore`] with atomic full-set
//! replacement; everything operator-visible travels over a broadcast
//! [`EventBus`].

pub mod cluster;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod model;
pub mod sim;
pub mod state;
pub mod time;
pub mod transport;

pub use cluster::{Cluster, ClusterStore, Segment, SegmentTimeline, UNKNOWN_SPEAKER};
pub use config::EngineConfig;
pub use engine::ReviewEngine;
pub use error::{Error, Result};
pub use events::{EventBus, ReviewEvent, TrainMode};
pub use model::{RecognitionStage, SpeakerModel};
pub use state::SharedState;
pub use time::Ticks;
pub use transport::{Seek, Transport, TransportEvent};
