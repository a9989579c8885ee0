//! Simulated collaborators
//!
//! Wall-clock implementations of [`Transport`] and [`SpeakerModel`] backing
//! the demo binary: the transport advances a clock instead of decoding
//! audio, and the model walks through the recognition stages on a timer and
//! produces a canned cluster set. Useful for exercising a complete review
//! session without a player or a model database.

use crate::cluster::{Cluster, Segment};
use crate::error::{Error, Result};
use crate::model::{RecognitionStage, SpeakerModel};
use crate::time::Ticks;
use crate::transport::{Seek, Transport, TransportEvent};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tokio::sync::broadcast;
use tracing::debug;

struct SimTransportState {
    loaded: bool,
    playing: bool,
    muted: bool,
    /// Position at the last play/pause/seek
    base: Ticks,
    /// Set while playing; position = base + elapsed
    started: Option<Instant>,
}

/// Clock-driven transport: positions advance in real time while playing
pub struct SimTransport {
    state: Mutex<SimTransportState>,
    duration: Ticks,
    events: broadcast::Sender<TransportEvent>,
}

impl SimTransport {
    /// Create a transport whose media will report the given duration
    pub fn new(duration: Ticks) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            state: Mutex::new(SimTransportState {
                loaded: false,
                playing: false,
                muted: false,
                base: 0,
                started: None,
            }),
            duration,
            events,
        }
    }

    fn lock(&self) -> MutexGuard<'_, SimTransportState> {
        self.state.lock().expect("sim transport state poisoned")
    }

    fn current(&self, state: &SimTransportState) -> Ticks {
        let mut position = state.base;
        if let Some(started) = state.started {
            position += (started.elapsed().as_millis() / 10) as Ticks;
        }
        position.min(self.duration)
    }
}

impl Transport for SimTransport {
    fn load(&self, path: &Path) -> Result<()> {
        let mut state = self.lock();
        state.loaded = true;
        state.playing = false;
        state.base = 0;
        state.started = None;
        debug!("Sim transport loaded {}", path.display());
        let _ = self.events.send(TransportEvent::ProcessStarted);
        let _ = self.events.send(TransportEvent::MediaStarted {
            duration: self.duration,
        });
        Ok(())
    }

    fn play(&self) -> Result<()> {
        let mut state = self.lock();
        if !state.loaded {
            return Err(Error::Transport("nothing loaded".into()));
        }
        if !state.playing {
            state.playing = true;
            state.started = Some(Instant::now());
        }
        Ok(())
    }

    fn pause(&self) -> Result<()> {
        let mut state = self.lock();
        if state.playing {
            state.base = self.current(&state);
            state.playing = false;
            state.started = None;
        }
        Ok(())
    }

    fn seek(&self, target: Seek) -> Result<()> {
        let mut state = self.lock();
        if !state.loaded {
            return Err(Error::Transport("nothing loaded".into()));
        }
        let current = self.current(&state);
        state.base = match target {
            Seek::Absolute(position) => position.min(self.duration),
            Seek::Relative(offset) => {
                (current as i64 + offset).clamp(0, self.duration as i64) as Ticks
            }
        };
        if state.playing {
            state.started = Some(Instant::now());
        }
        Ok(())
    }

    fn position(&self) -> Result<Ticks> {
        let mut state = self.lock();
        if !state.loaded {
            return Err(Error::PositionUnavailable);
        }
        let position = self.current(&state);
        if state.playing && position >= self.duration {
            state.playing = false;
            state.started = None;
            state.base = self.duration;
            let _ = self.events.send(TransportEvent::MediaFinished);
        }
        Ok(position)
    }

    fn duration(&self) -> Result<Ticks> {
        if !self.lock().loaded {
            return Err(Error::PositionUnavailable);
        }
        Ok(self.duration)
    }

    fn mute(&self, enabled: bool) -> Result<()> {
        self.lock().muted = enabled;
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<TransportEvent> {
        self.events.subscribe()
    }
}

/// Timer-driven recognition model walking the stage sequence and producing a
/// canned cluster set
pub struct SimModel {
    stage: Mutex<RecognitionStage>,
    source: Mutex<Option<PathBuf>>,
    /// Wall-clock time spent per pipeline stage
    step: Duration,
}

impl SimModel {
    pub fn new(step: Duration) -> Self {
        Self {
            stage: Mutex::new(RecognitionStage::Idle),
            source: Mutex::new(None),
            step,
        }
    }

    fn set_stage(&self, stage: RecognitionStage) {
        *self.stage.lock().expect("sim model stage poisoned") = stage;
    }

    fn canned_clusters() -> Vec<Cluster> {
        vec![
            Cluster::new(
                "S0",
                vec![
                    Segment::new(0, 500),
                    Segment::new(1200, 2000),
                    Segment::new(3000, 3600),
                ],
            )
            .with_stats(0.81, 0.12),
            Cluster::new("S1", vec![Segment::new(500, 1200), Segment::new(2000, 3000)])
                .with_stats(0.74, 0.21),
            Cluster::new("S2", vec![Segment::new(3600, 4500)]).with_stats(0.66, 0.29),
        ]
    }
}

impl SpeakerModel for SimModel {
    fn load_source(&self, path: &Path) -> Result<()> {
        *self.source.lock().expect("sim model source poisoned") = Some(path.to_path_buf());
        self.set_stage(RecognitionStage::SourceLoaded);
        Ok(())
    }

    fn extract_speakers(&self) -> Result<()> {
        if self.source.lock().expect("sim model source poisoned").is_none() {
            return Err(Error::Recognition("no source bound".into()));
        }
        for stage in [
            RecognitionStage::AudioConverted,
            RecognitionStage::Segmented,
            RecognitionStage::SpeakersMatched,
            RecognitionStage::Finished,
        ] {
            std::thread::sleep(self.step);
            self.set_stage(stage);
        }
        Ok(())
    }

    fn status(&self) -> Result<RecognitionStage> {
        Ok(*self.stage.lock().expect("sim model stage poisoned"))
    }

    fn working_status(&self) -> Result<String> {
        let text = match self.status()? {
            RecognitionStage::Idle => "Waiting to start",
            RecognitionStage::SourceLoaded => "Loading source audio",
            RecognitionStage::AudioConverted => "Converting audio",
            RecognitionStage::Segmented => "Segmenting speech",
            RecognitionStage::SpeakersMatched => "Matching speaker models",
            RecognitionStage::Finished => "Recognition complete",
        };
        Ok(text.to_string())
    }

    fn clusters(&self) -> Result<Vec<Cluster>> {
        if self.status()?.is_terminal() {
            Ok(Self::canned_clusters())
        } else {
            Err(Error::Recognition("pipeline still running".into()))
        }
    }

    fn update_store(&self, version: u32) -> Result<()> {
        if self.source.lock().expect("sim model source poisoned").is_none() {
            return Err(Error::Recognition("no source bound".into()));
        }
        debug!("Sim model store updated (version {version})");
        std::thread::sleep(self.step);
        Ok(())
    }
}
