//! Playback Events
//!
//! Event-based communication for keeping a view in sync with the player.
//! Events are emitted at key points:
//! - State changes (play/pause, including the stop at end of track)
//! - Position updates (every tick and after a seek)
//! - Volume and mute changes
//! - End of track

use crate::state::PlaybackSnapshot;
use serde::{Deserialize, Serialize};

/// Events emitted by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaybackEvent {
    /// Playing flag changed
    StateChanged {
        is_playing: bool,
    },

    /// Position moved, by a tick or a seek
    PositionUpdate {
        position_secs: f64,
        duration_secs: f64,
    },

    /// Volume level or mute flag changed
    VolumeChanged {
        /// Stored level (0.0-1.0)
        volume: f32,
        is_muted: bool,
    },

    /// The end of the track was reached and the state rewound to 0
    TrackFinished,
}

impl PlaybackEvent {
    /// Events describing the difference between two snapshots
    ///
    /// `finished` marks a transition caused by reaching the end of the track.
    pub fn diff(before: &PlaybackSnapshot, after: &PlaybackSnapshot, finished: bool) -> Vec<Self> {
        let mut events = Vec::new();

        if before.current_time != after.current_time || before.duration != after.duration {
            events.push(Self::PositionUpdate {
                position_secs: after.current_time,
                duration_secs: after.duration,
            });
        }

        if finished {
            events.push(Self::TrackFinished);
        }

        if before.is_playing != after.is_playing {
            events.push(Self::StateChanged {
                is_playing: after.is_playing,
            });
        }

        if before.volume != after.volume || before.is_muted != after.is_muted {
            events.push(Self::VolumeChanged {
                volume: after.volume,
                is_muted: after.is_muted,
            });
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_change_no_events() {
        let snapshot = PlaybackSnapshot::default();
        assert!(PlaybackEvent::diff(&snapshot, &snapshot, false).is_empty());
    }

    #[test]
    fn end_of_track_ordering() {
        let before = PlaybackSnapshot {
            is_playing: true,
            current_time: 180.0,
            ..Default::default()
        };
        let after = PlaybackSnapshot::default();

        let events = PlaybackEvent::diff(&before, &after, true);
        assert_eq!(
            events,
            vec![
                PlaybackEvent::PositionUpdate {
                    position_secs: 0.0,
                    duration_secs: 180.0,
                },
                PlaybackEvent::TrackFinished,
                PlaybackEvent::StateChanged { is_playing: false },
            ]
        );
    }

    #[test]
    fn mute_emits_volume_changed() {
        let before = PlaybackSnapshot::default();
        let after = PlaybackSnapshot {
            is_muted: true,
            ..before
        };

        assert_eq!(
            PlaybackEvent::diff(&before, &after, false),
            vec![PlaybackEvent::VolumeChanged {
                volume: 0.7,
                is_muted: true,
            }]
        );
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_string(&PlaybackEvent::StateChanged { is_playing: true }).unwrap();
        assert_eq!(json, r#"{"type":"state_changed","is_playing":true}"#);
    }
}
