//! Shared session state
//!
//! Thread-safe shared state for coordination between the operator-facing
//! operations and the background loops. Uses RwLock for concurrent read
//! access with rare writes; all operator-visible changes are announced via
//! the event bus rather than read directly by the presentation layer.

use crate::events::{EventBus, ReviewEvent, TrainMode};
use crate::time::Ticks;
use std::path::PathBuf;
use tokio::sync::{broadcast, RwLock};

/// Currently loaded media file
#[derive(Debug, Clone)]
pub struct MediaInfo {
    /// Source path handed to the transport and the recognizer
    pub path: PathBuf,
    /// Total duration in ticks, known once the transport reports media start
    pub duration: Option<Ticks>,
}

/// Shared state accessible by all components
pub struct SharedState {
    /// Train mode (On while reviewing a cluster)
    mode: RwLock<TrainMode>,

    /// Currently selected cluster name (None if nothing selected)
    selected: RwLock<Option<String>>,

    /// Currently loaded media (None before the first open)
    media: RwLock<Option<MediaInfo>>,

    /// Event broadcaster for presentation subscribers
    bus: EventBus,
}

impl SharedState {
    /// Create new shared state with default values
    pub fn new(event_capacity: usize) -> Self {
        Self {
            mode: RwLock::new(TrainMode::Off),
            selected: RwLock::new(None),
            media: RwLock::new(None),
            bus: EventBus::new(event_capacity),
        }
    }

    /// Broadcast an event to all subscribers (no receivers is OK)
    pub fn broadcast_event(&self, event: ReviewEvent) {
        self.bus.emit_lossy(event);
    }

    /// Subscribe to the event stream
    pub fn subscribe_events(&self) -> broadcast::Receiver<ReviewEvent> {
        self.bus.subscribe()
    }

    /// Get current train mode
    pub async fn mode(&self) -> TrainMode {
        *self.mode.read().await
    }

    /// Set train mode
    pub async fn set_mode(&self, mode: TrainMode) {
        *self.mode.write().await = mode;
    }

    /// Get currently selected cluster name
    pub async fn selected(&self) -> Option<String> {
        self.selected.read().await.clone()
    }

    /// Set selected cluster
    pub async fn set_selected(&self, name: Option<String>) {
        *self.selected.write().await = name;
    }

    /// Get currently loaded media
    pub async fn media(&self) -> Option<MediaInfo> {
        self.media.read().await.clone()
    }

    /// Set currently loaded media
    pub async fn set_media(&self, media: Option<MediaInfo>) {
        *self.media.write().await = media;
    }

    /// Record the media duration reported by the transport
    pub async fn set_duration(&self, duration: Ticks) {
        if let Some(media) = self.media.write().await.as_mut() {
            media.duration = Some(duration);
        }
    }
}
