//! Marble Master - a single-screen marble launching arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, levels, game state)
//! - `config`: Tuning values passed into the simulation at construction
//! - `renderer`: Host-agnostic draw list generation
//! - `audio`: Sound cue routing to a pluggable backend
//! - `runner`: Fixed-rate frame driver tying input, simulation and audio together

pub mod audio;
pub mod config;
pub mod error;
pub mod renderer;
pub mod runner;
pub mod settings;
pub mod sim;

pub use config::GameConfig;
pub use error::{AudioError, ConfigError};
pub use settings::Settings;

use glam::Vec2;

/// Default configuration constants
pub mod consts {
    /// Fixed simulation rate (one physics step per frame)
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (pixels, y grows downward)
    pub const FIELD_WIDTH: f32 = 900.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    pub const MARBLE_RADIUS: f32 = 18.0;
    pub const TARGET_RADIUS: f32 = 22.0;

    /// Gravity added to vertical velocity every step (pixels/frame²)
    pub const GRAVITY: f32 = 0.2;
    /// Fraction of velocity kept (and reversed) on a bounce
    pub const RESTITUTION: f32 = 0.7;
    /// Vertical speed below which a floor bounce settles the marble
    pub const REST_SPEED: f32 = 1.0;

    /// Launch power cap and drag-distance divisor
    pub const POWER_CAP: f32 = 20.0;
    pub const POWER_SCALE: f32 = 5.0;

    pub const MAX_LEVEL: u32 = 100;
    pub const BASE_SHOTS: u32 = 6;
    /// One extra shot every this many levels
    pub const SHOTS_STEP: u32 = 7;
    pub const BASE_TARGETS: u32 = 2;
    /// One extra target every this many levels
    pub const TARGETS_STEP: u32 = 5;
    pub const HIT_SCORE: u64 = 100;

    /// Result banner duration before the level is regenerated (1.2 s)
    pub const RESULT_PAUSE_TICKS: u32 = 72;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Angle (radians) of the vector pointing from `to` back toward `from`.
///
/// Screen coordinates: y grows downward, so angle 0 points right and
/// positive angles rotate toward the floor.
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    (from.y - to.y).atan2(from.x - to.x)
}

/// Unit vector for an angle
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
