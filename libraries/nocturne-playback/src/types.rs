//! Core types for the playback simulation

use crate::error::{PlaybackError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Track information shown next to the transport controls
///
/// Static data only. Nothing here is fetched or decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackInfo {
    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name
    pub album: String,

    /// Cover art location (displayed, never downloaded)
    pub cover_url: String,
}

impl TrackInfo {
    /// The built-in sample track
    pub fn sample() -> Self {
        Self {
            title: "Midnight City".to_string(),
            artist: "M83".to_string(),
            album: "Hurry Up, We're Dreaming".to_string(),
            cover_url:
                "https://images.unsplash.com/photo-1493225457124-a3eb161ffa5f?w=400&h=400&fit=crop"
                    .to_string(),
        }
    }
}

impl Default for TrackInfo {
    fn default() -> Self {
        Self::sample()
    }
}

/// Configuration for the playback simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Track length in seconds (default: 180)
    pub duration_secs: f64,

    /// Initial volume (0.0-1.0, default: 0.7)
    pub volume: f32,

    /// Wall-clock time between ticks in milliseconds (default: 1000)
    pub tick_interval_ms: u64,

    /// Capacity of the event broadcast channel (default: 64)
    pub event_capacity: usize,
}

impl PlaybackConfig {
    /// Seconds added to the position on every tick
    pub const TICK_STEP_SECS: f64 = 1.0;

    /// Check that the configuration describes a playable track
    pub fn validate(&self) -> Result<()> {
        if !self.duration_secs.is_finite() || self.duration_secs < 0.0 {
            return Err(PlaybackError::InvalidConfig(format!(
                "duration must be a non-negative number of seconds, got {}",
                self.duration_secs
            )));
        }

        if !self.volume.is_finite() || !(0.0..=1.0).contains(&self.volume) {
            return Err(PlaybackError::InvalidConfig(format!(
                "volume must be between 0 and 1, got {}",
                self.volume
            )));
        }

        if self.tick_interval_ms == 0 {
            return Err(PlaybackError::InvalidConfig(
                "tick interval must be at least 1ms".to_string(),
            ));
        }

        if self.event_capacity == 0 {
            return Err(PlaybackError::InvalidConfig(
                "event capacity must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Tick period as a `Duration`
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            duration_secs: 180.0,
            volume: 0.7,
            tick_interval_ms: 1000,
            event_capacity: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.duration_secs, 180.0);
        assert_eq!(config.volume, 0.7);
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_duration() {
        for duration_secs in [-1.0, f64::NAN, f64::INFINITY] {
            let config = PlaybackConfig {
                duration_secs,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(PlaybackError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn zero_duration_is_allowed() {
        let config = PlaybackConfig {
            duration_secs: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_volume_and_zero_interval() {
        let config = PlaybackConfig {
            volume: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PlaybackConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_config_uses_defaults() {
        let config: PlaybackConfig = serde_json::from_str(r#"{"duration_secs": 30}"#).unwrap();
        assert_eq!(config.duration_secs, 30.0);
        assert_eq!(config.volume, 0.7);
        assert_eq!(config.tick_interval_ms, 1000);
    }

    #[test]
    fn sample_track() {
        let track = TrackInfo::sample();
        assert_eq!(track.title, "Midnight City");
        assert_eq!(track.artist, "M83");
        assert_eq!(track.album, "Hurry Up, We're Dreaming");
    }
}
