//! Volume control with an independent mute flag
//!
//! The stored level and the mute flag are not unified: toggling
//! mute never touches the level, while setting the level re-derives the flag
//! (exactly 0 mutes, anything else unmutes).

use crate::error::{PlaybackError, Result};
use serde::{Deserialize, Serialize};

/// Volume controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    /// Volume level (0.0-1.0)
    level: f32,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial volume (0.0-1.0, clamped)
    pub fn new(level: f32) -> Self {
        let level = if level.is_finite() {
            level.clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            level,
            muted: false,
        }
    }

    /// Set volume level as a slider would
    ///
    /// Clamps to 0.0-1.0. A level of exactly 0 mutes, any other level unmutes.
    pub fn set_level(&mut self, level: f32) -> Result<()> {
        if !level.is_finite() {
            return Err(PlaybackError::InvalidVolume(level));
        }

        self.level = level.clamp(0.0, 1.0);
        self.muted = self.level == 0.0;
        Ok(())
    }

    /// Get stored volume level (0.0-1.0)
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Toggle mute state, leaving the level untouched
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Effective output level: 0.0 if muted, otherwise the stored level
    pub fn gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }

    /// Position of the volume slider (drops to 0 while muted)
    pub fn slider_value(&self) -> f32 {
        self.gain()
    }

    /// Whether the muted speaker icon should be shown
    ///
    /// True when muted or when the stored level is 0. The two conditions
    /// overlap without being the same state.
    pub fn shows_muted(&self) -> bool {
        self.muted || self.level == 0.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(0.7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_volume() {
        let vol = Volume::new(0.7);
        assert_eq!(vol.level(), 0.7);
        assert!(!vol.is_muted());

        assert_eq!(Volume::new(3.0).level(), 1.0);
        assert_eq!(Volume::new(f32::NAN).level(), 0.0);
    }

    #[test]
    fn set_volume_level() {
        let mut vol = Volume::new(0.5);
        vol.set_level(0.25).unwrap();
        assert_eq!(vol.level(), 0.25);

        // Clamp to 1.0
        vol.set_level(1.5).unwrap();
        assert_eq!(vol.level(), 1.0);

        vol.set_level(-0.5).unwrap();
        assert_eq!(vol.level(), 0.0);
        assert!(vol.is_muted());
    }

    #[test]
    fn zero_level_mutes_nonzero_unmutes() {
        let mut vol = Volume::new(0.7);

        vol.set_level(0.0).unwrap();
        assert!(vol.is_muted());

        vol.set_level(0.01).unwrap();
        assert!(!vol.is_muted());
    }

    #[test]
    fn rejects_non_finite_level() {
        let mut vol = Volume::new(0.7);
        assert!(matches!(
            vol.set_level(f32::NAN),
            Err(PlaybackError::InvalidVolume(_))
        ));
        assert_eq!(vol.level(), 0.7);
    }

    #[test]
    fn toggle_mute_preserves_level() {
        let mut vol = Volume::new(0.7);

        vol.toggle_mute();
        assert!(vol.is_muted());
        assert_eq!(vol.level(), 0.7);

        vol.toggle_mute();
        assert!(!vol.is_muted());
        assert_eq!(vol.level(), 0.7);
    }

    #[test]
    fn muted_gain_is_zero() {
        let mut vol = Volume::new(0.7);
        assert_eq!(vol.gain(), 0.7);

        vol.toggle_mute();
        assert_eq!(vol.gain(), 0.0);
        assert_eq!(vol.slider_value(), 0.0);
    }

    #[test]
    fn unmuting_a_zero_level_still_shows_muted_icon() {
        let mut vol = Volume::new(0.7);
        vol.set_level(0.0).unwrap();
        vol.toggle_mute();

        assert!(!vol.is_muted());
        assert!(vol.shows_muted());
        assert_eq!(vol.gain(), 0.0);
    }
}
