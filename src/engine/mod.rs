//! Review engine orchestration
//!
//! Coordinates the transport, the cluster store, the train-mode navigator
//! and the background recognition job. All transport commands are issued
//! from the operator-facing operations or the engine's own loops; background
//! work reaches the presentation layer only through broadcast events.

pub mod navigator;
mod recognition;
mod tracker;

use crate::cluster::ClusterStore;
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::events::{ReviewEvent, TrainMode};
use crate::model::SpeakerModel;
use crate::state::{MediaInfo, SharedState};
use crate::time::{self, Ticks};
use crate::transport::{Seek, Transport, TransportEvent};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Review engine - coordinates all session components
pub struct ReviewEngine {
    /// Engine tunables
    config: EngineConfig,

    /// Shared session state (mode, selection, media)
    state: Arc<SharedState>,

    /// Cluster set owner
    store: Arc<ClusterStore>,

    /// Playback transport collaborator
    transport: Arc<dyn Transport>,

    /// Recognition/model collaborator
    model: Arc<dyn SpeakerModel>,

    /// Position-tracking cadence running flag
    tracker_running: Arc<AtomicBool>,

    /// Recognition observation running flag (also the cancellation latch)
    recognition_running: Arc<AtomicBool>,
}

impl ReviewEngine {
    /// Create a new review engine
    pub fn new(
        config: EngineConfig,
        transport: Arc<dyn Transport>,
        model: Arc<dyn SpeakerModel>,
    ) -> Self {
        let state = Arc::new(SharedState::new(config.event_capacity));
        Self {
            config,
            state,
            store: Arc::new(ClusterStore::new()),
            transport,
            model,
            tracker_running: Arc::new(AtomicBool::new(false)),
            recognition_running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start the engine's transport-event task
    pub fn start(&self) {
        // Subscribe before spawning so events emitted between `start()`
        // returning and the task's first poll are not lost.
        let rx = self.transport.subscribe();
        let engine = self.clone_handles();
        tokio::spawn(async move {
            engine.transport_event_loop(rx).await;
        });
    }

    /// Shared session state
    pub fn state(&self) -> Arc<SharedState> {
        Arc::clone(&self.state)
    }

    /// Cluster store
    pub fn store(&self) -> Arc<ClusterStore> {
        Arc::clone(&self.store)
    }

    /// Subscribe to the engine's event stream
    pub fn subscribe_events(&self) -> broadcast::Receiver<ReviewEvent> {
        self.state.subscribe_events()
    }

    /// Open a media file for review
    ///
    /// Loads the transport, resets the selection and clears any cluster set
    /// left over from the previous file.
    pub async fn open_media(&self, path: &Path) -> Result<()> {
        info!("Opening media: {}", path.display());
        self.transport.load(path)?;
        self.state
            .set_media(Some(MediaInfo {
                path: path.to_path_buf(),
                duration: None,
            }))
            .await;
        self.state.set_selected(None).await;
        self.store.clear().await;
        self.state.broadcast_event(ReviewEvent::ClusterListChanged {
            message: "Cluster list cleared".to_string(),
            timestamp: time::now(),
        });
        Ok(())
    }

    /// Select a cluster for review
    ///
    /// A selection made while training ends the training replay first.
    /// Repositions playback (muted, paused) to the cluster's first segment
    /// and announces the selection with everything the presentation layer
    /// paints: speaker label, score statistics and segment spans.
    pub async fn select_cluster(&self, name: &str) -> Result<()> {
        let cluster = self.store.get(name).await?;

        if self.state.mode().await == TrainMode::On {
            self.exit_train().await?;
        }
        let first = cluster
            .timeline()
            .first()
            .copied()
            .ok_or_else(|| Error::EmptyCluster(name.to_string()))?;

        // Muted so the repositioning itself stays silent
        self.transport.mute(true)?;
        self.transport.seek(Seek::Absolute(first.start))?;
        self.transport.pause()?;
        self.transport.mute(false)?;

        self.state.set_selected(Some(name.to_string())).await;
        debug!("Selected cluster {name} at {}", first.start);

        let duration = self.state.media().await.and_then(|m| m.duration);
        self.state.broadcast_event(ReviewEvent::PlaybackPosition {
            position: first.start,
            duration,
            timestamp: time::now(),
        });
        self.state.broadcast_event(ReviewEvent::ClusterSelected {
            name: cluster.name().to_string(),
            speaker: cluster.speaker().to_string(),
            mean: cluster.mean(),
            distance: cluster.distance(),
            spans: cluster.timeline().spans(),
            timestamp: time::now(),
        });
        Ok(())
    }

    /// Play/stop toggle for the selected cluster
    ///
    /// Off: seeks to the selected cluster's first segment and enters train
    /// mode. On: leaves train mode.
    pub async fn play_cluster(&self) -> Result<()> {
        match self.state.mode().await {
            TrainMode::Off => {
                let name = self.state.selected().await.ok_or(Error::NoSelection)?;
                let cluster = self.store.get(&name).await?;
                let first = cluster
                    .timeline()
                    .first()
                    .copied()
                    .ok_or_else(|| Error::EmptyCluster(name.clone()))?;
                self.transport.seek(Seek::Absolute(first.start))?;
                self.enter_train().await
            }
            TrainMode::On => self.exit_train().await,
        }
    }

    /// Explicitly leave train mode
    pub async fn stop_training(&self) -> Result<()> {
        match self.state.mode().await {
            TrainMode::On => self.exit_train().await,
            TrainMode::Off => Ok(()),
        }
    }

    /// Assign a speaker label to a cluster
    ///
    /// An empty label is silently ignored (`Ok(None)`). On success the new
    /// display string is returned, a `SpeakerRenamed` event published, and
    /// the selection re-dispatched through a direct [`Self::select_cluster`]
    /// call so dependent views refresh.
    pub async fn rename_speaker(&self, name: &str, label: &str) -> Result<Option<String>> {
        match self.store.rename_speaker(name, label).await? {
            Some(display) => {
                info!("Cluster {name} speaker set to {label}");
                self.state.broadcast_event(ReviewEvent::SpeakerRenamed {
                    name: name.to_string(),
                    display: display.clone(),
                    timestamp: time::now(),
                });
                self.select_cluster(name).await?;
                Ok(Some(display))
            }
            None => {
                debug!("Empty speaker label for {name} ignored");
                Ok(None)
            }
        }
    }

    /// `(unknown, known)` cluster counts for the info panel
    pub async fn cluster_summary(&self) -> (usize, usize) {
        self.store.aggregate_counts().await
    }

    /// Absolute seek (slider scrub)
    pub fn seek_to(&self, position: Ticks) -> Result<()> {
        self.transport.seek(Seek::Absolute(position))
    }

    /// Relative seek in ticks (forward/backward buttons)
    pub fn skip(&self, offset: i64) -> Result<()> {
        self.transport.seek(Seek::Relative(offset))
    }

    /// Enter train mode: resume playback, ensure the position cadence runs
    async fn enter_train(&self) -> Result<()> {
        self.state.set_mode(TrainMode::On).await;
        self.transport.play()?;
        self.start_tracker();
        info!("Train mode ON");
        self.state.broadcast_event(ReviewEvent::TrainModeChanged {
            mode: TrainMode::On,
            timestamp: time::now(),
        });
        self.state.broadcast_event(ReviewEvent::StatusChanged {
            message: "Train ON ...".to_string(),
            timestamp: time::now(),
        });
        Ok(())
    }

    /// Leave train mode: pause playback, stop the position cadence
    pub(crate) async fn exit_train(&self) -> Result<()> {
        self.state.set_mode(TrainMode::Off).await;
        self.transport.pause()?;
        self.stop_tracker();
        info!("Train mode OFF");
        self.state.broadcast_event(ReviewEvent::TrainModeChanged {
            mode: TrainMode::Off,
            timestamp: time::now(),
        });
        self.state.broadcast_event(ReviewEvent::StatusChanged {
            message: "Train OFF ...".to_string(),
            timestamp: time::now(),
        });
        Ok(())
    }

    /// React to transport lifecycle events
    async fn transport_event_loop(self, mut rx: broadcast::Receiver<TransportEvent>) {
        loop {
            match rx.recv().await {
                Ok(TransportEvent::MediaStarted { duration }) => {
                    info!("Media started, duration {duration} ticks");
                    self.state.set_duration(duration).await;
                    self.state.broadcast_event(ReviewEvent::PlaybackPosition {
                        position: 0,
                        duration: Some(duration),
                        timestamp: time::now(),
                    });
                    self.start_tracker();
                }
                Ok(TransportEvent::MediaFinished) => {
                    info!("Media finished");
                    if self.state.mode().await == TrainMode::On {
                        if let Err(e) = self.exit_train().await {
                            warn!("Leaving train mode at media end failed: {e}");
                        }
                    }
                }
                Ok(TransportEvent::ProcessStarted) => debug!("Player process started"),
                Ok(TransportEvent::ProcessStopped) => debug!("Player process stopped"),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Transport event stream lagged, skipped {skipped}");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        debug!("Transport event loop stopped");
    }

    /// Clone handles for spawned tasks
    fn clone_handles(&self) -> Self {
        Self {
            config: self.config.clone(),
            state: Arc::clone(&self.state),
            store: Arc::clone(&self.store),
            transport: Arc::clone(&self.transport),
            model: Arc::clone(&self.model),
            tracker_running: Arc::clone(&self.tracker_running),
            recognition_running: Arc::clone(&self.recognition_running),
        }
    }
}
