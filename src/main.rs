//! diarist - headless review session demo
//!
//! Wires the review engine to the simulated transport and recognition model
//! and walks a complete session: open media, run recognition, inspect the
//! cluster set, name a speaker, replay one cluster in train mode and save.
//! Events are logged as any presentation layer would render them.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use diarist::sim::{SimModel, SimTransport};
use diarist::{time, EngineConfig, ReviewEngine, ReviewEvent, TrainMode};

/// Command-line arguments for diarist
#[derive(Parser, Debug)]
#[command(name = "diarist")]
#[command(about = "Speaker-diarization review session (simulated collaborators)")]
#[command(version)]
struct Args {
    /// Media file to review (the simulated transport only tracks its clock)
    media: PathBuf,

    /// Optional TOML config for engine tunables
    #[arg(short, long, env = "DIARIST_CONFIG")]
    config: Option<PathBuf>,

    /// Simulated media duration in seconds
    #[arg(long, default_value = "60")]
    duration_secs: u64,

    /// Simulated time per recognition stage in milliseconds
    #[arg(long, default_value = "500")]
    stage_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "diarist=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    let transport = Arc::new(SimTransport::new(time::seconds_to_ticks(
        args.duration_secs,
    )));
    let model = Arc::new(SimModel::new(Duration::from_millis(args.stage_ms)));
    let engine = ReviewEngine::new(config, transport, model);
    engine.start();

    let mut events = engine.subscribe_events();

    engine
        .open_media(&args.media)
        .await
        .context("Failed to open media")?;
    engine
        .start_recognition()
        .await
        .context("Failed to start recognition")?;

    tokio::select! {
        result = run_session(&engine, &mut events) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, cancelling recognition");
            engine.cancel_recognition();
            engine.stop_training().await.ok();
        }
    }

    Ok(())
}

/// Drive one complete review session, narrating events as they arrive
async fn run_session(
    engine: &ReviewEngine,
    events: &mut broadcast::Receiver<ReviewEvent>,
) -> Result<()> {
    // Wait for the recognition run to publish its cluster set
    loop {
        match events.recv().await {
            Ok(ReviewEvent::StatusChanged { message, .. }) => info!("status: {message}"),
            Ok(ReviewEvent::ClusterListChanged { message, .. }) => {
                info!("list: {message}");
                if !engine.store().is_empty().await {
                    break;
                }
            }
            Ok(_) => {}
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!("Event stream lagged, skipped {skipped}");
            }
            Err(broadcast::error::RecvError::Closed) => return Ok(()),
        }
    }

    let names: Vec<String> = engine.store().snapshot().await.keys().cloned().collect();
    let (unknown, known) = engine.cluster_summary().await;
    info!("Speakers: {unknown} unknown, {known} known ({})", names.join(", "));

    let Some(first) = names.first() else {
        return Ok(());
    };

    // Name the first speaker and replay their segments in train mode
    engine.select_cluster(first).await?;
    if let Some(label) = engine.rename_speaker(first, "Alice").await? {
        info!("renamed: {label}");
    }
    engine.play_cluster().await?;

    loop {
        match events.recv().await {
            Ok(ReviewEvent::PlaybackPosition { position, .. }) => {
                debug!("position: {}", time::format_clock(position));
            }
            Ok(ReviewEvent::TrainModeChanged { mode: TrainMode::Off, .. }) => {
                info!("cluster review finished");
                break;
            }
            Ok(ReviewEvent::StatusChanged { message, .. }) => info!("status: {message}"),
            Ok(_) => {}
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!("Event stream lagged, skipped {skipped}");
            }
            Err(broadcast::error::RecvError::Closed) => return Ok(()),
        }
    }

    // Persist the edited label and wait for the save to report back
    engine.save_changes();
    loop {
        match events.recv().await {
            Ok(ReviewEvent::StatusChanged { message, .. }) => {
                info!("status: {message}");
                if message.starts_with("Changes saved") || message.starts_with("Save failed") {
                    break;
                }
            }
            Ok(_) => {}
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }

    let (unknown, known) = engine.cluster_summary().await;
    info!("Session done: {unknown} unknown, {known} known");
    Ok(())
}
