//! Playback position tracker
//!
//! Polls the transport on a fixed cadence, publishes throttled position
//! updates for the presentation layer, and hands each position to the
//! train-mode navigator while train mode is On. A failed position read is a
//! missed tick, never a blocking retry.

use super::navigator::{self, TickAction};
use super::ReviewEngine;
use crate::events::{ReviewEvent, TrainMode};
use crate::time::{self, Ticks};
use crate::transport::Seek;
use std::sync::atomic::Ordering;
use tokio::time::{interval, Duration};
use tracing::{debug, warn};

impl ReviewEngine {
    /// Start the position-tracking cadence if it is not already running
    pub(crate) fn start_tracker(&self) {
        if self.tracker_running.swap(true, Ordering::SeqCst) {
            return; // already running
        }
        let engine = self.clone_handles();
        tokio::spawn(async move {
            engine.position_loop().await;
        });
    }

    /// Stop the position-tracking cadence after its current tick
    pub(crate) fn stop_tracker(&self) {
        self.tracker_running.store(false, Ordering::SeqCst);
    }

    /// Fixed-cadence position polling loop
    async fn position_loop(self) {
        let mut tick = interval(Duration::from_millis(self.config.position_poll_interval_ms));
        let throttle = self.config.display_refresh_ticks.max(1);
        debug!("Position tracker started");

        loop {
            tick.tick().await;

            if !self.tracker_running.load(Ordering::SeqCst) {
                break;
            }

            // Nothing loaded or a seek in flight: skip this tick
            let position = match self.transport.position() {
                Ok(position) => position,
                Err(_) => continue,
            };

            // Presentation throttle: re-render coarser than the poll cadence
            if position % throttle == 0 {
                let duration = self.state.media().await.and_then(|m| m.duration);
                self.state.broadcast_event(ReviewEvent::PlaybackPosition {
                    position,
                    duration,
                    timestamp: time::now(),
                });
            }

            if self.state.mode().await == TrainMode::On {
                self.train_tick(position).await;
            }
        }

        debug!("Position tracker stopped");
    }

    /// Apply the navigator's boundary rule for one delivered position
    async fn train_tick(&self, position: Ticks) {
        let Some(name) = self.state.selected().await else {
            return;
        };

        let cluster = match self.store.get(&name).await {
            Ok(cluster) => cluster,
            Err(_) => {
                // Selection went stale after a cluster-set replacement;
                // the operator must re-derive it from the current store.
                warn!("Selected cluster {name} no longer present, leaving train mode");
                self.state.set_selected(None).await;
                if let Err(e) = self.exit_train().await {
                    warn!("Leaving train mode failed: {e}");
                }
                return;
            }
        };

        match navigator::tick_action(cluster.timeline().segments(), position) {
            TickAction::Seek(start) => {
                debug!(position, start, "Ran past segment end, seeking next segment");
                if let Err(e) = self.transport.seek(Seek::Absolute(start)) {
                    warn!("Train-mode seek failed: {e}");
                }
            }
            TickAction::Pause => {
                debug!(position, "Last segment exhausted, pausing");
                if let Err(e) = self.exit_train().await {
                    warn!("Leaving train mode failed: {e}");
                }
            }
            TickAction::Stay => {}
        }
    }
}
