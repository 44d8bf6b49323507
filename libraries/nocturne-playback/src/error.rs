//! Error types for the playback simulation

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Seek target is not a finite number of seconds
    #[error("Invalid seek position: {0}")]
    InvalidSeekPosition(f64),

    /// Volume is not a finite number
    #[error("Invalid volume: {0}")]
    InvalidVolume(f32),

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The player task is no longer running
    #[error("Player stopped")]
    PlayerStopped,

    /// The player task panicked or was aborted
    #[error("Player task failed: {0}")]
    TaskFailed(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
