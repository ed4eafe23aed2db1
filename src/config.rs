//! Game configuration
//!
//! Every tuning value the simulation uses lives here and is handed to
//! `GameState::new`. All sections are `#[serde(default)]`, so a config file
//! only needs the values it overrides.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// 8-bit RGB color
pub type Rgb = [u8; 3];

/// Playfield size in pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

/// Order of the two Euler updates inside one physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationOrder {
    /// Move by the current velocity, then apply gravity
    #[default]
    PositionFirst,
    /// Apply gravity, then move by the updated velocity
    VelocityFirst,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Added to vertical velocity every step
    pub gravity: f32,
    /// Velocity multiplier on wall/floor bounce
    pub restitution: f32,
    /// Floor bounces slower than this settle the marble
    pub rest_speed: f32,
    pub order: IntegrationOrder,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            restitution: RESTITUTION,
            rest_speed: REST_SPEED,
            order: IntegrationOrder::PositionFirst,
        }
    }
}

/// Drag-to-launch tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    pub power_cap: f32,
    /// Drag distance is divided by this to get launch power
    pub power_scale: f32,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            power_cap: POWER_CAP,
            power_scale: POWER_SCALE,
        }
    }
}

/// Level progression and layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub max_level: u32,
    pub base_shots: u32,
    pub shots_step: u32,
    pub base_targets: u32,
    pub targets_step: u32,
    pub hit_score: u64,

    pub marble_radius: f32,
    /// Horizontal distance between marbles in the launch row
    pub marble_gap: f32,
    /// Launch row sits this far above the floor
    pub marble_row_offset: f32,

    pub target_radius: f32,
    /// Left edge of the horizontal band targets are spread across
    pub target_band_start: f32,
    pub target_band_width: f32,
    /// Wave pattern: y = base_y + amplitude * sin(level + index)
    pub target_base_y: f32,
    pub target_amplitude: f32,

    /// Wait for every marble to come to rest before declaring a loss
    pub settle_before_loss: bool,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            max_level: MAX_LEVEL,
            base_shots: BASE_SHOTS,
            shots_step: SHOTS_STEP,
            base_targets: BASE_TARGETS,
            targets_step: TARGETS_STEP,
            hit_score: HIT_SCORE,
            marble_radius: MARBLE_RADIUS,
            marble_gap: 50.0,
            marble_row_offset: 40.0,
            target_radius: TARGET_RADIUS,
            target_band_start: 100.0,
            target_band_width: 600.0,
            target_base_y: 120.0,
            target_amplitude: 60.0,
            settle_before_loss: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub marbles: Vec<Rgb>,
    pub targets: Vec<Rgb>,
    pub background: Rgb,
    pub floor: Rgb,
    pub hit_marker: Rgb,
    pub aim_line: Rgb,
    pub hud_icon: Rgb,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            marbles: vec![
                [255, 0, 100],
                [0, 200, 255],
                [255, 255, 0],
                [0, 255, 100],
                [255, 120, 0],
                [180, 0, 255],
            ],
            targets: vec![[255, 255, 255], [255, 200, 0], [0, 255, 200], [255, 0, 200]],
            background: [30, 40, 60],
            floor: [60, 80, 120],
            hit_marker: [255, 0, 0],
            aim_line: [255, 255, 255],
            hud_icon: [255, 255, 255],
        }
    }
}

/// Clickable HUD controls in field coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub help_center: Vec2,
    pub help_radius: f32,
    /// Pause button hit box (exclusive bounds)
    pub pause_min: Vec2,
    pub pause_max: Vec2,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            help_center: Vec2::new(FIELD_WIDTH - 40.0, 40.0),
            help_radius: 20.0,
            pause_min: Vec2::new(FIELD_WIDTH - 80.0, 30.0),
            pause_max: Vec2::new(FIELD_WIDTH - 57.0, 50.0),
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field: FieldConfig,
    pub physics: PhysicsConfig,
    pub launch: LaunchConfig,
    pub levels: LevelConfig,
    pub palette: PaletteConfig,
    pub controls: ControlsConfig,
    /// Ticks the win/lose banner stays up before the level is rebuilt
    pub result_pause_ticks: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            physics: PhysicsConfig::default(),
            launch: LaunchConfig::default(),
            levels: LevelConfig::default(),
            palette: PaletteConfig::default(),
            controls: ControlsConfig::default(),
            result_pause_ticks: RESULT_PAUSE_TICKS,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        let problems = config.validate();
        if !problems.is_empty() {
            return Err(ConfigError::Invalid(problems));
        }
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Load a config file, falling back to defaults (with a warning) on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load_from_file(path.as_ref()) {
            Ok(config) => {
                for warning in config.warnings() {
                    log::warn!("config: {warning}");
                }
                log::info!("Loaded config from {}", path.as_ref().display());
                config
            }
            Err(err) => {
                log::warn!("{err}; using default config");
                Self::default()
            }
        }
    }

    /// Values the simulation cannot run with
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.field.width <= 0.0 || self.field.height <= 0.0 {
            problems.push(format!(
                "field dimensions must be > 0 (got {}x{})",
                self.field.width, self.field.height
            ));
        }
        if self.levels.marble_radius <= 0.0 || self.levels.target_radius <= 0.0 {
            problems.push("marble and target radii must be > 0".into());
        }
        if self.levels.marble_radius * 2.0 > self.field.width {
            problems.push("marble does not fit between the walls".into());
        }
        if self.levels.max_level == 0 {
            problems.push("levels.max_level must be at least 1".into());
        }
        if self.levels.shots_step == 0 || self.levels.targets_step == 0 {
            problems.push("levels.shots_step and levels.targets_step must be > 0".into());
        }
        if self.palette.marbles.is_empty() || self.palette.targets.is_empty() {
            problems.push("marble and target palettes must not be empty".into());
        }
        if self.launch.power_scale <= 0.0 {
            problems.push(format!(
                "launch.power_scale must be > 0 (got {})",
                self.launch.power_scale
            ));
        }
        problems
    }

    /// Values that run but probably do not play well
    pub fn warnings(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.physics.gravity <= 0.0 {
            w.push(format!(
                "physics.gravity is {}; marbles will never fall back to the floor",
                self.physics.gravity
            ));
        }
        if self.physics.restitution >= 1.0 {
            w.push(format!(
                "physics.restitution {} >= 1; bounces gain energy and marbles may never settle",
                self.physics.restitution
            ));
        }
        if self.physics.rest_speed <= 0.0 {
            w.push("physics.rest_speed <= 0; marbles can never settle".into());
        }
        if self.levels.base_targets == 0 {
            w.push("levels.base_targets is 0; early levels are won without a shot".into());
        }
        if self.levels.base_shots == 0 {
            w.push("levels.base_shots is 0; early levels are lost immediately".into());
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_empty());
        assert!(config.warnings().is_empty());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            GameConfig::from_json_str(r#"{ "physics": { "gravity": 0.5 }, "result_pause_ticks": 0 }"#)
                .unwrap();
        assert_eq!(config.physics.gravity, 0.5);
        assert_eq!(config.physics.restitution, RESTITUTION);
        assert_eq!(config.result_pause_ticks, 0);
        assert_eq!(config.levels.max_level, MAX_LEVEL);
    }

    #[test]
    fn test_integration_order_parses() {
        let config =
            GameConfig::from_json_str(r#"{ "physics": { "order": "velocity_first" } }"#).unwrap();
        assert_eq!(config.physics.order, IntegrationOrder::VelocityFirst);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = GameConfig::from_json_str(r#"{ "field": { "width": 0 }, "palette": { "marbles": [] } }"#)
            .unwrap_err();
        match err {
            ConfigError::Invalid(problems) => assert_eq!(problems.len(), 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_step_rejected() {
        let mut config = GameConfig::default();
        config.levels.shots_step = 0;
        assert_eq!(config.validate().len(), 1);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = GameConfig::load_or_default("/nonexistent/marble-master.json");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_bouncy_config_warns() {
        let mut config = GameConfig::default();
        config.physics.restitution = 1.2;
        assert_eq!(config.warnings().len(), 1);
    }
}
