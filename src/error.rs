//! Error types for the diarist engine
//!
//! Defines engine-specific error types using thiserror for clear error
//! propagation. Nothing in this crate is fatal to the process: failures are
//! either swallowed-and-logged by the background loops or surfaced as a typed
//! result to the immediate caller.

use thiserror::Error;

/// Main error type for the diarist engine
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file loading or validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A cluster name no longer present in the store (stale selection
    /// after a full replacement)
    #[error("Cluster not found: {0}")]
    ClusterNotFound(String),

    /// Cluster exists but carries no segments to play
    #[error("Cluster has no segments: {0}")]
    EmptyCluster(String),

    /// Operation requires a loaded media file
    #[error("No media loaded")]
    NoMediaLoaded,

    /// Operation requires a selected cluster
    #[error("No cluster selected")]
    NoSelection,

    /// Invalid state for operation
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Transport command failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// Transient transport condition: position/duration unavailable because
    /// nothing is loaded or a seek is in flight. Pollers treat this as a
    /// missed tick, never as a user-visible error.
    #[error("Playback position unavailable")]
    PositionUnavailable,

    /// Recognition model collaborator failure
    #[error("Recognition error: {0}")]
    Recognition(String),
}

/// Convenience Result type using the diarist Error
pub type Result<T> = std::result::Result<T, Error>;
