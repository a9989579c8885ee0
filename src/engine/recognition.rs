//! Background recognition job coordinator
//!
//! Runs the recognition pipeline on a blocking task off the interactive
//! path and observes its coarse-grained status from a fixed-interval poll
//! loop. Status observation failures are logged and swallowed; the loop's
//! job is to reach the terminal stage, not to react to every transient read
//! error. The cluster-list-changed notification is published only after the
//! store swap has fully completed, so any read it triggers sees a fully
//! populated set.

use super::ReviewEngine;
use crate::error::{Error, Result};
use crate::events::ReviewEvent;
use crate::model::{RecognitionStage, MODEL_STORE_VERSION};
use crate::time;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{debug, error, info, warn};

impl ReviewEngine {
    /// Run speaker recognition on the loaded media
    ///
    /// Binds the source, launches the pipeline on a blocking task and spawns
    /// the status poll loop. Fails if no media is loaded or a run is already
    /// in progress.
    pub async fn start_recognition(&self) -> Result<()> {
        let media = self.state.media().await.ok_or(Error::NoMediaLoaded)?;

        if self.recognition_running.swap(true, Ordering::SeqCst) {
            return Err(Error::InvalidState("recognition already running".into()));
        }

        info!("Starting recognition for {}", media.path.display());
        if let Err(e) = self.model.load_source(&media.path) {
            self.recognition_running.store(false, Ordering::SeqCst);
            return Err(e);
        }

        let model = Arc::clone(&self.model);
        tokio::task::spawn_blocking(move || {
            if let Err(e) = model.extract_speakers() {
                error!("Recognition pipeline failed: {e}");
            }
        });

        match self.model.working_status() {
            Ok(text) => self.state.broadcast_event(ReviewEvent::StatusChanged {
                message: format!("{text} ..."),
                timestamp: time::now(),
            }),
            Err(e) => warn!("Working status unavailable: {e}"),
        }

        let engine = self.clone_handles();
        tokio::spawn(async move {
            engine.status_poll_loop().await;
        });

        Ok(())
    }

    /// Cancel the observation of a running recognition job
    ///
    /// Stops the status poll loop, so the result set is never published and
    /// the store keeps its previous contents. The blocking pipeline itself
    /// is not interruptible; it runs to completion unobserved.
    pub fn cancel_recognition(&self) {
        if self.recognition_running.swap(false, Ordering::SeqCst) {
            info!("Recognition cancelled by operator");
            self.state.broadcast_event(ReviewEvent::StatusChanged {
                message: "Recognition cancelled".to_string(),
                timestamp: time::now(),
            });
        }
    }

    /// Fixed-interval status observation loop
    async fn status_poll_loop(self) {
        let mut tick = interval(Duration::from_millis(self.config.status_poll_interval_ms));
        let mut last_stage: Option<RecognitionStage> = None;

        loop {
            tick.tick().await;

            if !self.recognition_running.load(Ordering::SeqCst) {
                debug!("Status poll loop stopping before terminal stage");
                return;
            }

            let stage = match self.model.status() {
                Ok(stage) => stage,
                Err(e) => {
                    warn!("Status probe failed: {e}");
                    continue;
                }
            };

            if last_stage != Some(stage) {
                last_stage = Some(stage);
                match self.model.working_status() {
                    Ok(text) => {
                        info!("Recognition stage: {stage}");
                        self.state.broadcast_event(ReviewEvent::StatusChanged {
                            message: format!("{text} ..."),
                            timestamp: time::now(),
                        });
                    }
                    Err(e) => warn!("Working status unavailable: {e}"),
                }
            }

            if stage.is_terminal() {
                break;
            }
        }

        self.finish_recognition().await;
        self.recognition_running.store(false, Ordering::SeqCst);
    }

    /// Publish the final status, swap the cluster set, then announce it
    async fn finish_recognition(&self) {
        // Final status without the trailing ellipsis: the run is complete
        match self.model.working_status() {
            Ok(text) => self.state.broadcast_event(ReviewEvent::StatusChanged {
                message: text,
                timestamp: time::now(),
            }),
            Err(e) => warn!("Working status unavailable: {e}"),
        }

        match self.model.clusters() {
            Ok(clusters) => {
                let count = clusters.len();
                self.store.replace_all(clusters).await;
                let (unknown, known) = self.store.aggregate_counts().await;
                info!("Recognition finished: {count} clusters ({unknown} unknown, {known} known)");
                // Published strictly after replace_all completes
                self.state.broadcast_event(ReviewEvent::ClusterListChanged {
                    message: format!("Process finished: {unknown} unknown, {known} known"),
                    timestamp: time::now(),
                });
            }
            Err(e) => {
                error!("Reading cluster set failed: {e}");
                self.state.broadcast_event(ReviewEvent::StatusChanged {
                    message: format!("Recognition failed: {e}"),
                    timestamp: time::now(),
                });
            }
        }
    }

    /// Persist edited speaker labels off the interactive path
    ///
    /// Progress is reported through status events only; the call returns
    /// immediately.
    pub fn save_changes(&self) {
        self.state.broadcast_event(ReviewEvent::StatusChanged {
            message: "Saving changes ...".to_string(),
            timestamp: time::now(),
        });

        let engine = self.clone_handles();
        tokio::spawn(async move {
            let model = Arc::clone(&engine.model);
            let result =
                tokio::task::spawn_blocking(move || model.update_store(MODEL_STORE_VERSION)).await;
            match result {
                Ok(Ok(())) => {
                    info!("Speaker labels saved");
                    engine.state.broadcast_event(ReviewEvent::StatusChanged {
                        message: "Changes saved".to_string(),
                        timestamp: time::now(),
                    });
                }
                Ok(Err(e)) => {
                    error!("Saving speaker labels failed: {e}");
                    engine.state.broadcast_event(ReviewEvent::StatusChanged {
                        message: format!("Save failed: {e}"),
                        timestamp: time::now(),
                    });
                }
                Err(e) => error!("Save task failed: {e}"),
            }
        });
    }
}
