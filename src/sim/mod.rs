//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - No randomness; levels are functions of their index
//! - Stable iteration order (by index)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod level;
pub mod physics;
pub mod state;
pub mod tick;

pub use autopilot::plan_shot;
pub use collision::{circles_overlap, point_in_circle, point_in_rect};
pub use level::{LevelLayout, generate, shot_budget, target_count};
pub use physics::step_marble;
pub use state::{
    Aim, Banner, GameEvent, GameState, Hud, LevelSession, Marble, Mode, Outcome, Target,
};
pub use tick::{InputEvent, TickInput, decide_outcome, tick};
