//! Game state and core simulation types
//!
//! `GameState` owns the current `LevelSession` outright; changing level
//! replaces the whole session rather than mutating it piecemeal.

use glam::Vec2;

use super::level::{LevelLayout, generate};
use crate::config::{GameConfig, LaunchConfig, Rgb};
use crate::{angle_between, direction, distance};

/// A player-launched marble
#[derive(Debug, Clone, PartialEq)]
pub struct Marble {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Rgb,
    /// True from launch until the marble settles on the floor
    pub active: bool,
}

impl Marble {
    pub fn new(pos: Vec2, radius: f32, color: Rgb) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            color,
            active: false,
        }
    }

    /// Launch along `angle` (radians, y down) with the given speed
    pub fn launch(&mut self, angle: f32, power: f32) {
        self.vel = direction(angle) * power;
        self.active = true;
    }

    /// Whether a pointer at `point` grabs this marble
    pub fn can_grab(&self, point: Vec2) -> bool {
        !self.active && super::collision::point_in_circle(point, self.pos, self.radius)
    }
}

/// A stationary target
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Rgb,
    /// Set on first overlap, only cleared by a level reload
    pub hit: bool,
}

impl Target {
    pub fn new(pos: Vec2, radius: f32, color: Rgb) -> Self {
        Self {
            pos,
            radius,
            color,
            hit: false,
        }
    }
}

/// An in-progress drag on one marble
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aim {
    /// Index into `LevelSession::marbles`
    pub marble: usize,
    /// Marble position when grabbed
    pub anchor: Vec2,
    /// Current pointer position
    pub end: Vec2,
}

impl Aim {
    /// Launch angle: away from the pointer, through the anchor
    pub fn angle(&self) -> f32 {
        angle_between(self.anchor, self.end)
    }

    pub fn power(&self, launch: &LaunchConfig) -> f32 {
        (distance(self.anchor, self.end) / launch.power_scale).min(launch.power_cap)
    }
}

/// Interaction mode - decides which inputs are accepted and what is drawn
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// Dragging a marble to set direction and power
    Aiming(Aim),
    /// Gameplay suspended behind an overlay
    Paused,
    /// Instructions shown; gameplay suspended
    Help,
}

impl Mode {
    /// Whether the simulation advances in this mode
    pub fn is_gameplay(&self) -> bool {
        matches!(self, Mode::Normal | Mode::Aiming(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Normal => "normal",
            Mode::Aiming(_) => "aiming",
            Mode::Paused => "paused",
            Mode::Help => "help",
        }
    }
}

/// Result of a level attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

/// Win/lose message shown before the level is rebuilt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Banner {
    pub outcome: Outcome,
    pub ticks_left: u32,
}

/// Notifications for the presentation layer, drained once per frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Launched { marble: usize, angle: f32, power: f32 },
    TargetHit { target: usize, score: u64 },
    LevelWon { level: u32 },
    LevelLost { level: u32 },
    LevelLoaded { level: u32 },
    ModeChanged(Mode),
    Quit,
}

/// Everything belonging to one attempt at one level
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSession {
    /// 1-based level index
    pub level: u32,
    pub shot_budget: u32,
    pub shots_fired: u32,
    pub marbles: Vec<Marble>,
    pub targets: Vec<Target>,
}

impl LevelSession {
    pub fn new(level: u32, config: &GameConfig) -> Self {
        let LevelLayout {
            shot_budget,
            marbles,
            targets,
        } = generate(level, config);
        Self {
            level,
            shot_budget,
            shots_fired: 0,
            marbles,
            targets,
        }
    }

    pub fn all_targets_hit(&self) -> bool {
        self.targets.iter().all(|t| t.hit)
    }

    pub fn shots_remaining(&self) -> u32 {
        self.shot_budget.saturating_sub(self.shots_fired)
    }

    pub fn out_of_shots(&self) -> bool {
        self.shots_fired >= self.shot_budget
    }

    /// Any marble still moving
    pub fn any_in_flight(&self) -> bool {
        self.marbles.iter().any(|m| m.active)
    }
}

/// Scalar state for HUD rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub level: u32,
    pub max_level: u32,
    pub shots_remaining: u32,
    pub score: u64,
    pub mode: Mode,
    pub banner: Option<Outcome>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub session: LevelSession,
    pub mode: Mode,
    /// Mode to return to when help is closed
    pub resume_mode: Mode,
    /// Mode to return to when unpaused; keeps a drag alive across a pause
    pub unpause_mode: Mode,
    pub score: u64,
    /// Pending level transition, if a result is on screen
    pub banner: Option<Banner>,
    /// Cleared by a quit command; the frame loop stops when false
    pub running: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Start a new game at level 1
    pub fn new(config: GameConfig) -> Self {
        Self::with_level(config, 1)
    }

    /// Start a new game at an arbitrary level (clamped into range)
    pub fn with_level(config: GameConfig, level: u32) -> Self {
        for problem in config.validate() {
            log::warn!("config: {problem}");
        }
        let level = level.clamp(1, config.levels.max_level.max(1));
        let session = LevelSession::new(level, &config);
        log::info!(
            "Level {level}: {} shots, {} targets",
            session.shot_budget,
            session.targets.len()
        );
        Self {
            config,
            session,
            mode: Mode::Normal,
            resume_mode: Mode::Normal,
            unpause_mode: Mode::Normal,
            score: 0,
            banner: None,
            running: true,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    pub fn level(&self) -> u32 {
        self.session.level
    }

    /// Replace the session with a freshly generated one
    pub fn load_level(&mut self, level: u32) {
        self.session = LevelSession::new(level, &self.config);
        self.banner = None;
        // Saved drags point at marbles of the old session
        self.resume_mode = Mode::Normal;
        self.unpause_mode = Mode::Normal;
        log::info!(
            "Level {level}: {} shots, {} targets",
            self.session.shot_budget,
            self.session.targets.len()
        );
        self.events.push(GameEvent::LevelLoaded { level });
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            log::debug!("mode {} -> {}", self.mode.name(), mode.name());
            self.mode = mode;
            self.events.push(GameEvent::ModeChanged(mode));
        }
    }

    /// Events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn hud(&self) -> Hud {
        Hud {
            level: self.session.level,
            max_level: self.config.levels.max_level,
            shots_remaining: self.session.shots_remaining(),
            score: self.score,
            mode: self.mode,
            banner: self.banner.map(|b| b.outcome),
        }
    }

    /// Anchor and endpoint of the current drag, for drawing the aim line
    pub fn aim_line(&self) -> Option<(Vec2, Vec2)> {
        match self.mode {
            Mode::Aiming(aim) => Some((aim.anchor, aim.end)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_new_game_starts_at_level_one() {
        let state = GameState::new(GameConfig::default());
        assert_eq!(state.level(), 1);
        assert_eq!(state.mode, Mode::Normal);
        assert_eq!(state.session.shot_budget, 6);
        assert_eq!(state.session.marbles.len(), 6);
        assert_eq!(state.session.targets.len(), 2);
        assert!(state.running);
    }

    #[test]
    fn test_with_level_clamps() {
        let state = GameState::with_level(GameConfig::default(), 0);
        assert_eq!(state.level(), 1);
        let state = GameState::with_level(GameConfig::default(), 500);
        assert_eq!(state.level(), MAX_LEVEL);
    }

    #[test]
    fn test_launch_sets_velocity() {
        let mut marble = Marble::new(Vec2::new(450.0, 560.0), MARBLE_RADIUS, [0, 0, 0]);
        marble.launch(0.0, 10.0);
        assert!(marble.active);
        assert!((marble.vel - Vec2::new(10.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_aim_power_is_capped() {
        let launch = LaunchConfig::default();
        let aim = Aim {
            marble: 0,
            anchor: Vec2::new(450.0, 560.0),
            end: Vec2::new(400.0, 560.0),
        };
        assert!((aim.power(&launch) - 10.0).abs() < 1e-5);
        assert!(aim.angle().abs() < 1e-6);

        let far = Aim {
            end: Vec2::new(0.0, 560.0),
            ..aim
        };
        assert_eq!(far.power(&launch), POWER_CAP);
    }

    #[test]
    fn test_active_marble_cannot_be_grabbed() {
        let mut marble = Marble::new(Vec2::new(100.0, 100.0), MARBLE_RADIUS, [0, 0, 0]);
        assert!(marble.can_grab(Vec2::new(105.0, 100.0)));
        assert!(!marble.can_grab(Vec2::new(118.0, 100.0)));
        marble.active = true;
        assert!(!marble.can_grab(Vec2::new(105.0, 100.0)));
    }

    #[test]
    fn test_load_level_resets_session() {
        let mut state = GameState::new(GameConfig::default());
        state.session.shots_fired = 3;
        state.session.targets[0].hit = true;
        state.load_level(1);
        assert_eq!(state.session.shots_fired, 0);
        assert!(state.session.targets.iter().all(|t| !t.hit));
        assert_eq!(state.drain_events(), vec![GameEvent::LevelLoaded { level: 1 }]);
    }

    #[test]
    fn test_hud_reports_remaining_shots() {
        let mut state = GameState::new(GameConfig::default());
        state.session.shots_fired = 2;
        let hud = state.hud();
        assert_eq!(hud.shots_remaining, 4);
        assert_eq!(hud.max_level, MAX_LEVEL);
        assert_eq!(hud.banner, None);
    }
}
