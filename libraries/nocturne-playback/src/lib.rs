//! Nocturne - Playback Simulation
//!
//! Simulated "now playing" state for the Nocturne player. Nothing is decoded
//! or streamed: a timer advances the position once per tick while playing.
//!
//! This crate provides:
//! - Playback state (playing flag, position, duration, volume, mute)
//! - Control handlers (play/pause, seek, volume, mute)
//! - A tick-driven player task with cancellable timer
//! - Playback events and snapshots for keeping a view in sync
//! - `m:ss` time formatting
//!
//! # Example: Driving the state by hand
//!
//! ```rust
//! use nocturne_playback::PlaybackState;
//!
//! let mut state = PlaybackState::default();
//! state.play();
//!
//! for _ in 0..180 {
//!     state.tick();
//! }
//! assert_eq!(state.current_time(), 180.0);
//!
//! // End of track: stop and rewind
//! assert!(state.reconcile());
//! assert!(!state.is_playing());
//! assert_eq!(state.current_time(), 0.0);
//! ```
//!
//! # Example: Player task
//!
//! ```rust,no_run
//! use nocturne_playback::{PlaybackConfig, Player, PlaybackEvent};
//!
//! # async fn run() -> nocturne_playback::Result<()> {
//! let player = Player::spawn(PlaybackConfig::default())?;
//! let mut events = player.subscribe();
//!
//! player.set_volume(0.5).await?;
//! player.play().await?;
//!
//! while let Ok(event) = events.recv().await {
//!     if event == PlaybackEvent::TrackFinished {
//!         break;
//!     }
//! }
//!
//! let final_state = player.shutdown().await?;
//! assert!(!final_state.is_playing());
//! # Ok(())
//! # }
//! ```

mod error;
mod events;
mod format;
mod player;
mod state;
pub mod types;
mod volume;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use format::format_time;
pub use player::{Player, PlayerCommand};
pub use state::{PlaybackSnapshot, PlaybackState};
pub use types::{PlaybackConfig, TrackInfo};
pub use volume::Volume;
