//! Event system for the diarist engine
//!
//! # Architecture
//!
//! The engine uses hybrid communication:
//! - **EventBus** (tokio::broadcast): one-to-many notification of the
//!   presentation layer (status text, cluster list, playback position)
//! - **Shared state** (Arc<RwLock<T>>): read-heavy session state
//!
//! Background loops never touch presentation state directly; everything
//! operator-visible travels through the bus, so subscribers apply updates on
//! their own task. Per-subscriber delivery order is the send order.

use crate::time::Ticks;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Train mode state (On while reviewing a cluster's segments)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrainMode {
    On,
    Off,
}

impl std::fmt::Display for TrainMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrainMode::On => write!(f, "Train ON"),
            TrainMode::Off => write!(f, "Train OFF"),
        }
    }
}

/// Engine event types
///
/// Events are broadcast via [`EventBus`] and can be serialized for
/// transmission to any presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ReviewEvent {
    /// Human-readable status line changed (recognition phase, train mode,
    /// save progress)
    StatusChanged {
        message: String,
        timestamp: DateTime<Utc>,
    },

    /// The cluster set was fully replaced; consumers should re-read the
    /// store now. Never published mid-replacement.
    ClusterListChanged {
        message: String,
        timestamp: DateTime<Utc>,
    },

    /// Train mode toggled
    TrainModeChanged {
        mode: TrainMode,
        timestamp: DateTime<Utc>,
    },

    /// Throttled playback position update (slider / elapsed-time label)
    PlaybackPosition {
        position: Ticks,
        duration: Option<Ticks>,
        timestamp: DateTime<Utc>,
    },

    /// A cluster was selected for review; carries everything the
    /// presentation layer paints (info panel and segment spans)
    ClusterSelected {
        name: String,
        speaker: String,
        mean: f64,
        distance: f64,
        spans: Vec<(Ticks, Ticks)>,
        timestamp: DateTime<Utc>,
    },

    /// A cluster's speaker label was edited
    SpeakerRenamed {
        name: String,
        display: String,
        timestamp: DateTime<Utc>,
    },
}

impl ReviewEvent {
    /// Get event type as string for filtering
    pub fn event_type(&self) -> &'static str {
        match self {
            ReviewEvent::StatusChanged { .. } => "StatusChanged",
            ReviewEvent::ClusterListChanged { .. } => "ClusterListChanged",
            ReviewEvent::TrainModeChanged { .. } => "TrainModeChanged",
            ReviewEvent::PlaybackPosition { .. } => "PlaybackPosition",
            ReviewEvent::ClusterSelected { .. } => "ClusterSelected",
            ReviewEvent::SpeakerRenamed { .. } => "SpeakerRenamed",
        }
    }
}

/// One-to-many event broadcaster over tokio::sync::broadcast
///
/// Replaces a process-wide publish/subscribe registry with an explicit
/// channel: subscribers hold receivers, and delivery order per subscriber is
/// the send order.
pub struct EventBus {
    tx: broadcast::Sender<ReviewEvent>,
    capacity: usize,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<ReviewEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns the subscriber count, or an error when nobody is listening.
    pub fn emit(
        &self,
        event: ReviewEvent,
    ) -> std::result::Result<usize, broadcast::error::SendError<ReviewEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring the no-subscribers case
    ///
    /// Used for periodic events (position updates) where a missing listener
    /// is normal.
    pub fn emit_lossy(&self, event: ReviewEvent) {
        let _ = self.tx.send(event);
    }

    /// Number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time;

    #[test]
    fn test_eventbus_new() {
        let bus = EventBus::new(100);
        assert_eq!(bus.capacity(), 100);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_eventbus_emit_no_subscribers() {
        let bus = EventBus::new(100);
        let event = ReviewEvent::TrainModeChanged {
            mode: TrainMode::On,
            timestamp: time::now(),
        };
        assert!(bus.emit(event.clone()).is_err());
        bus.emit_lossy(event); // must not panic
    }

    #[tokio::test]
    async fn test_eventbus_emit_with_subscriber() {
        let bus = EventBus::new(100);
        let mut rx = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        bus.emit(ReviewEvent::StatusChanged {
            message: "Train ON ...".into(),
            timestamp: time::now(),
        })
        .unwrap();

        match rx.recv().await.unwrap() {
            ReviewEvent::StatusChanged { message, .. } => {
                assert_eq!(message, "Train ON ...");
            }
            other => panic!("wrong event type received: {}", other.event_type()),
        }
    }

    #[tokio::test]
    async fn test_eventbus_delivery_order() {
        let bus = EventBus::new(100);
        let mut rx = bus.subscribe();

        for position in [0u64, 10, 20] {
            bus.emit(ReviewEvent::PlaybackPosition {
                position,
                duration: Some(6000),
                timestamp: time::now(),
            })
            .unwrap();
        }

        for expected in [0u64, 10, 20] {
            match rx.recv().await.unwrap() {
                ReviewEvent::PlaybackPosition { position, .. } => {
                    assert_eq!(position, expected);
                }
                other => panic!("wrong event type received: {}", other.event_type()),
            }
        }
    }

    #[test]
    fn test_event_serialization_tag() {
        let event = ReviewEvent::ClusterListChanged {
            message: "Process finished".into(),
            timestamp: time::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"ClusterListChanged\""));

        let back: ReviewEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.event_type(), "ClusterListChanged");
    }

    #[test]
    fn test_train_mode_display() {
        assert_eq!(TrainMode::On.to_string(), "Train ON");
        assert_eq!(TrainMode::Off.to_string(), "Train OFF");
    }
}
