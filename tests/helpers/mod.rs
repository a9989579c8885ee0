//! Scripted collaborators for engine integration tests
//!
//! The mock transport records every command it receives and reports whatever
//! position the test scripts into it; the mock model walks stages only when
//! the test says so. Both let the tests drive the engine's loops
//! deterministically.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tokio::sync::broadcast;

use diarist::{
    Cluster, Error, RecognitionStage, Result, Seek, SpeakerModel, Ticks, Transport,
    TransportEvent,
};

/// Transport command observed by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load(PathBuf),
    Play,
    Pause,
    Seek(Seek),
    Mute(bool),
}

/// Test transport: scripted position, recorded commands
pub struct MockTransport {
    commands: Mutex<Vec<Command>>,
    position: Mutex<Option<Ticks>>,
    duration: Ticks,
    events: broadcast::Sender<TransportEvent>,
}

impl MockTransport {
    pub fn new(duration: Ticks) -> Self {
        let (events, _) = broadcast::channel(32);
        Self {
            commands: Mutex::new(Vec::new()),
            position: Mutex::new(None),
            duration,
            events,
        }
    }

    /// Script the position the next polls will observe (None: unavailable)
    pub fn set_position(&self, position: Option<Ticks>) {
        *self.position.lock().unwrap() = position;
    }

    /// Everything the engine has asked of this transport, in order
    pub fn commands(&self) -> Vec<Command> {
        self.commands.lock().unwrap().clone()
    }

    /// Only the seek requests, in order
    pub fn seeks(&self) -> Vec<Seek> {
        self.commands()
            .into_iter()
            .filter_map(|c| match c {
                Command::Seek(seek) => Some(seek),
                _ => None,
            })
            .collect()
    }

    pub fn emit(&self, event: TransportEvent) {
        let _ = self.events.send(event);
    }

    fn record(&self, command: Command) {
        self.commands.lock().unwrap().push(command);
    }
}

impl Transport for MockTransport {
    fn load(&self, path: &Path) -> Result<()> {
        self.record(Command::Load(path.to_path_buf()));
        Ok(())
    }

    fn play(&self) -> Result<()> {
        self.record(Command::Play);
        Ok(())
    }

    fn pause(&self) -> Result<()> {
        self.record(Command::Pause);
        Ok(())
    }

    fn seek(&self, target: Seek) -> Result<()> {
        self.record(Command::Seek(target));
        // Keep the scripted position consistent with the request, the way a
        // real player would report after completing the seek.
        let mut position = self.position.lock().unwrap();
        *position = match target {
            Seek::Absolute(p) => Some(p),
            Seek::Relative(offset) => {
                position.map(|p| (p as i64 + offset).max(0) as Ticks)
            }
        };
        Ok(())
    }

    fn position(&self) -> Result<Ticks> {
        self.position
            .lock()
            .unwrap()
            .ok_or(Error::PositionUnavailable)
    }

    fn duration(&self) -> Result<Ticks> {
        Ok(self.duration)
    }

    fn mute(&self, enabled: bool) -> Result<()> {
        self.record(Command::Mute(enabled));
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<TransportEvent> {
        self.events.subscribe()
    }
}

/// Test model: stage advances only when the test scripts it
pub struct MockModel {
    stage: Mutex<RecognitionStage>,
    clusters: Mutex<Vec<Cluster>>,
    extract_started: AtomicBool,
    update_calls: Mutex<Vec<u32>>,
    fail_working_status: AtomicBool,
}

impl MockModel {
    pub fn new() -> Self {
        Self {
            stage: Mutex::new(RecognitionStage::Idle),
            clusters: Mutex::new(Vec::new()),
            extract_started: AtomicBool::new(false),
            update_calls: Mutex::new(Vec::new()),
            fail_working_status: AtomicBool::new(false),
        }
    }

    pub fn set_stage(&self, stage: RecognitionStage) {
        *self.stage.lock().unwrap() = stage;
    }

    pub fn set_clusters(&self, clusters: Vec<Cluster>) {
        *self.clusters.lock().unwrap() = clusters;
    }

    pub fn extract_started(&self) -> bool {
        self.extract_started.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> Vec<u32> {
        self.update_calls.lock().unwrap().clone()
    }

    /// Make working_status probes fail until called with false again
    pub fn fail_working_status(&self, fail: bool) {
        self.fail_working_status.store(fail, Ordering::SeqCst);
    }
}

impl SpeakerModel for MockModel {
    fn load_source(&self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn extract_speakers(&self) -> Result<()> {
        self.extract_started.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn status(&self) -> Result<RecognitionStage> {
        Ok(*self.stage.lock().unwrap())
    }

    fn working_status(&self) -> Result<String> {
        if self.fail_working_status.load(Ordering::SeqCst) {
            return Err(Error::Recognition("status not meaningful yet".into()));
        }
        Ok(format!("stage {}", self.status()?))
    }

    fn clusters(&self) -> Result<Vec<Cluster>> {
        Ok(self.clusters.lock().unwrap().clone())
    }

    fn update_store(&self, version: u32) -> Result<()> {
        self.update_calls.lock().unwrap().push(version);
        Ok(())
    }
}
