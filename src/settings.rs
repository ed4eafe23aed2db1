//! Player preferences
//!
//! Kept apart from `GameConfig`: these change how the game sounds and
//! looks, never how it plays.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Visuals ===
    /// Draw the drag line while aiming
    pub aim_guide: bool,
    /// Decorative background ellipses and floor marbles
    pub background_decor: bool,
    /// Opacity of the pause/help overlay (0.0 - 1.0)
    pub overlay_opacity: f32,

    // === Accessibility ===
    /// Skip decorative background drawing
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            aim_guide: true,
            background_decor: true,
            overlay_opacity: 180.0 / 255.0,

            reduced_motion: false,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Effective background decor (respects reduced_motion)
    pub fn effective_background_decor(&self) -> bool {
        self.background_decor && !self.reduced_motion
    }
}
