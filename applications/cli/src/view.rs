//! Text view of the player
//!
//! Maps a snapshot to what the controls would show. The muted icon and the
//! volume slider follow separate rules: the icon shows muted when the flag is
//! set or the stored volume is 0, while the slider drops to 0 only when muted.

use nocturne_playback::{format_time, PlaybackSnapshot, TrackInfo};
use std::fmt;

const PROGRESS_BAR_WIDTH: usize = 24;

/// Glyph on the play/pause button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportButton {
    Play,
    Pause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeIcon {
    Sound,
    Muted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NowPlayingView {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub elapsed: String,
    pub total: String,
    /// Progress slider position in seconds
    pub position: f64,
    pub progress: f64,
    pub button: TransportButton,
    pub volume_icon: VolumeIcon,
    /// Volume slider position (0.0-1.0)
    pub volume_slider: f32,
    /// Album art rotates while playing
    pub spinning: bool,
}

impl NowPlayingView {
    pub fn new(track: &TrackInfo, snapshot: &PlaybackSnapshot) -> Self {
        Self {
            title: track.title.clone(),
            artist: track.artist.clone(),
            album: track.album.clone(),
            elapsed: format_time(snapshot.current_time),
            total: format_time(snapshot.duration),
            position: snapshot.current_time,
            progress: snapshot.progress(),
            // The button offers the opposite action
            button: if snapshot.is_playing {
                TransportButton::Pause
            } else {
                TransportButton::Play
            },
            volume_icon: if snapshot.shows_muted() {
                VolumeIcon::Muted
            } else {
                VolumeIcon::Sound
            },
            volume_slider: snapshot.effective_volume(),
            spinning: snapshot.is_playing,
        }
    }

    fn progress_bar(&self) -> String {
        let filled = (self.progress * PROGRESS_BAR_WIDTH as f64).round() as usize;
        let filled = filled.min(PROGRESS_BAR_WIDTH);
        format!(
            "{}{}",
            "=".repeat(filled),
            "-".repeat(PROGRESS_BAR_WIDTH - filled)
        )
    }
}

impl fmt::Display for NowPlayingView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let button = match self.button {
            TransportButton::Play => "[>]",
            TransportButton::Pause => "[||]",
        };
        let volume = match self.volume_icon {
            VolumeIcon::Sound => "vol",
            VolumeIcon::Muted => "muted",
        };

        write!(
            f,
            "{} {} - {} ({}) {} [{}] {} {} {:.0}%",
            button,
            self.title,
            self.artist,
            self.album,
            self.elapsed,
            self.progress_bar(),
            self.total,
            volume,
            self.volume_slider * 100.0
        )
    }
}
