//! Playback state and the transitions that mutate it
//!
//! `PlaybackState` is a plain single-owner value. Every mutation is a
//! synchronous method call; the timing that drives `tick` lives in
//! [`crate::player`].

use crate::{
    error::{PlaybackError, Result},
    types::PlaybackConfig,
    volume::Volume,
};
use serde::{Deserialize, Serialize};

/// Simulated playback state
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    is_playing: bool,

    /// Position in seconds, always within `0..=duration`
    current_time: f64,

    /// Track length in seconds
    duration: f64,

    volume: Volume,
}

/// The inputs the tick timer depends on
///
/// The timer must be re-armed whenever any of these change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TimerKey {
    is_playing: bool,
    current_time: f64,
    duration: f64,
}

impl PlaybackState {
    /// Create the mount-time state from a configuration
    pub fn new(config: &PlaybackConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            is_playing: false,
            current_time: 0.0,
            duration: config.duration_secs,
            volume: Volume::new(config.volume),
        })
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Applied output level: 0 if muted, otherwise the stored volume
    pub fn effective_volume(&self) -> f32 {
        self.volume.gain()
    }

    /// Position as a fraction of the track (0.0-1.0)
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Seconds left until the end of the track
    pub fn remaining(&self) -> f64 {
        (self.duration - self.current_time).max(0.0)
    }

    /// Flip between playing and paused
    pub fn toggle_play_pause(&mut self) {
        self.is_playing = !self.is_playing;
    }

    pub fn play(&mut self) {
        self.is_playing = true;
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    /// Move the position, clamped to `0..=duration`
    ///
    /// Does not change `is_playing`. Seeking to the very end leaves the state
    /// due for a reset on the next [`reconcile`](Self::reconcile).
    pub fn seek(&mut self, position: f64) -> Result<()> {
        if !position.is_finite() {
            return Err(PlaybackError::InvalidSeekPosition(position));
        }

        self.current_time = position.clamp(0.0, self.duration);
        Ok(())
    }

    /// Set the stored volume; exactly 0 mutes, anything else unmutes
    pub fn set_volume(&mut self, level: f32) -> Result<()> {
        self.volume.set_level(level)
    }

    /// Flip the mute flag without touching the stored volume
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
    }

    /// Whether the tick timer should be running
    pub fn should_tick(&self) -> bool {
        self.is_playing && self.current_time < self.duration
    }

    /// Advance the position by one tick step
    ///
    /// Returns `false` without changing anything when ticking is not allowed.
    /// The position never overshoots `duration`.
    pub fn tick(&mut self) -> bool {
        if !self.should_tick() {
            return false;
        }

        self.current_time =
            (self.current_time + PlaybackConfig::TICK_STEP_SECS).min(self.duration);
        true
    }

    /// Stop and rewind once the end of the track has been reached
    ///
    /// Returns `true` if the state changed.
    pub fn reconcile(&mut self) -> bool {
        if self.current_time < self.duration {
            return false;
        }

        let changed = self.is_playing || self.current_time != 0.0;
        self.is_playing = false;
        self.current_time = 0.0;
        changed
    }

    /// Immutable copy for observers
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            is_playing: self.is_playing,
            current_time: self.current_time,
            duration: self.duration,
            volume: self.volume.level(),
            is_muted: self.volume.is_muted(),
        }
    }

    pub(crate) fn timer_key(&self) -> TimerKey {
        TimerKey {
            is_playing: self.is_playing,
            current_time: self.current_time,
            duration: self.duration,
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        let config = PlaybackConfig::default();
        Self {
            is_playing: false,
            current_time: 0.0,
            duration: config.duration_secs,
            volume: Volume::new(config.volume),
        }
    }
}

/// Point-in-time copy of [`PlaybackState`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub is_playing: bool,
    pub current_time: f64,
    pub duration: f64,
    pub volume: f32,
    pub is_muted: bool,
}

impl PlaybackSnapshot {
    pub fn effective_volume(&self) -> f32 {
        if self.is_muted {
            0.0
        } else {
            self.volume
        }
    }

    /// Position as a fraction of the track (0.0-1.0)
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Same rule as [`Volume::shows_muted`]
    pub fn shows_muted(&self) -> bool {
        self.is_muted || self.volume == 0.0
    }
}

impl Default for PlaybackSnapshot {
    fn default() -> Self {
        PlaybackState::default().snapshot()
    }
}
