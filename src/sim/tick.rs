//! Fixed timestep simulation tick
//!
//! One call to [`tick`] is one frame: apply queued input, advance the
//! marbles, resolve hits, then make a single win/lose decision.

use glam::Vec2;

use super::collision::{collide_marbles_with_targets, point_in_circle, point_in_rect};
use super::physics::step_marble;
use super::state::{Aim, Banner, GameEvent, GameState, LevelSession, Mode, Outcome};
use crate::config::LevelConfig;

/// Input from the presentation layer, in field coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown(Vec2),
    PointerMove(Vec2),
    PointerUp(Vec2),
    Quit,
    TogglePause,
    ToggleHelp,
    /// Only honored while paused
    Restart,
}

/// Input commands for a single tick, applied in order
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl From<Vec<InputEvent>> for TickInput {
    fn from(events: Vec<InputEvent>) -> Self {
        Self { events }
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    for event in &input.events {
        if !state.running {
            break;
        }
        handle_input(state, *event);
    }
    if !state.running {
        return;
    }

    state.time_ticks += 1;

    // Result on screen: everything waits until the level is rebuilt
    if let Some(banner) = state.banner.as_mut() {
        banner.ticks_left = banner.ticks_left.saturating_sub(1);
        if banner.ticks_left == 0 {
            let outcome = banner.outcome;
            resolve_outcome(state, outcome);
        }
        return;
    }

    if !state.mode.is_gameplay() {
        return;
    }

    let config = &state.config;
    for marble in &mut state.session.marbles {
        step_marble(marble, &config.physics, &config.field);
    }

    let hits = collide_marbles_with_targets(&state.session.marbles, &mut state.session.targets);
    for target in hits {
        state.score += state.config.levels.hit_score;
        log::debug!("target {target} hit, score {}", state.score);
        state.events.push(GameEvent::TargetHit {
            target,
            score: state.score,
        });
    }

    if let Some(outcome) = decide_outcome(&state.session, &state.config.levels) {
        let level = state.session.level;
        match outcome {
            Outcome::Won => {
                log::info!("Level {level} complete! score {}", state.score);
                state.events.push(GameEvent::LevelWon { level });
            }
            Outcome::Lost => {
                log::info!("Level {level}: out of shots");
                state.events.push(GameEvent::LevelLost { level });
            }
        }
        if state.config.result_pause_ticks == 0 {
            resolve_outcome(state, outcome);
        } else {
            state.banner = Some(Banner {
                outcome,
                ticks_left: state.config.result_pause_ticks,
            });
        }
    }
}

/// Single win/lose decision for the current frame
pub fn decide_outcome(session: &LevelSession, levels: &LevelConfig) -> Option<Outcome> {
    if session.all_targets_hit() {
        Some(Outcome::Won)
    } else if session.out_of_shots() && !(levels.settle_before_loss && session.any_in_flight()) {
        Some(Outcome::Lost)
    } else {
        None
    }
}

/// Rebuild the level after a result: next level on a win, same level on a loss
fn resolve_outcome(state: &mut GameState, outcome: Outcome) {
    let next = match outcome {
        Outcome::Won => {
            let next = state.session.level + 1;
            if next > state.config.levels.max_level {
                log::info!("All {} levels cleared, starting over", state.config.levels.max_level);
                state.score = 0;
                1
            } else {
                next
            }
        }
        Outcome::Lost => state.session.level,
    };
    state.load_level(next);
    state.set_mode(Mode::Normal);
}

/// Apply one input event.
///
/// Pause and help both suspend an in-progress drag and restore it on exit.
/// While help is shown every pointer event is ignored, including the release
/// of a suspended drag, so the game returns to aiming after help closes.
fn handle_input(state: &mut GameState, event: InputEvent) {
    if event == InputEvent::Quit {
        log::info!("Quit requested");
        state.running = false;
        state.events.push(GameEvent::Quit);
        return;
    }

    // Result on screen: nothing else is accepted
    if state.banner.is_some() {
        return;
    }

    match (state.mode, event) {
        // --- Help overlay ---
        (Mode::Help, InputEvent::ToggleHelp) => close_help(state),
        (Mode::Help, InputEvent::PointerDown(p)) if on_help_control(state, p) => close_help(state),
        (Mode::Help, _) => {}
        (_, InputEvent::ToggleHelp) => open_help(state),

        // --- Paused ---
        (Mode::Paused, InputEvent::TogglePause) => unpause(state),
        (Mode::Paused, InputEvent::Restart) => {
            log::info!("Restarting level {}", state.session.level);
            state.load_level(state.session.level);
            state.set_mode(Mode::Normal);
        }
        (Mode::Paused, InputEvent::PointerDown(p)) => {
            if on_help_control(state, p) {
                open_help(state);
            } else if on_pause_control(state, p) {
                unpause(state);
            }
        }
        (Mode::Paused, _) => {}

        // --- Normal ---
        (Mode::Normal, InputEvent::TogglePause) => pause(state),
        (Mode::Normal, InputEvent::PointerDown(p)) => {
            if on_help_control(state, p) {
                open_help(state);
            } else if on_pause_control(state, p) {
                pause(state);
            } else if let Some(aim) = grab_marble(&state.session, p) {
                state.set_mode(Mode::Aiming(aim));
            }
        }
        (Mode::Normal, _) => {}

        // --- Aiming ---
        (Mode::Aiming(aim), InputEvent::PointerMove(p)) => {
            // Drag updates are not worth a ModeChanged event
            state.mode = Mode::Aiming(Aim { end: p, ..aim });
        }
        (Mode::Aiming(aim), InputEvent::PointerUp(p)) => {
            fire(state, Aim { end: p, ..aim });
            state.set_mode(Mode::Normal);
        }
        (Mode::Aiming(_), InputEvent::TogglePause) => pause(state),
        (Mode::Aiming(_), _) => {}
    }
}

fn pause(state: &mut GameState) {
    state.unpause_mode = state.mode;
    state.set_mode(Mode::Paused);
}

fn unpause(state: &mut GameState) {
    let resume = state.unpause_mode;
    state.unpause_mode = Mode::Normal;
    state.set_mode(resume);
}

fn open_help(state: &mut GameState) {
    state.resume_mode = state.mode;
    state.set_mode(Mode::Help);
}

fn close_help(state: &mut GameState) {
    let resume = state.resume_mode;
    state.resume_mode = Mode::Normal;
    state.set_mode(resume);
}

fn on_help_control(state: &GameState, p: Vec2) -> bool {
    let controls = &state.config.controls;
    point_in_circle(p, controls.help_center, controls.help_radius)
}

fn on_pause_control(state: &GameState, p: Vec2) -> bool {
    let controls = &state.config.controls;
    point_in_rect(p, controls.pause_min, controls.pause_max)
}

/// First resting marble under the pointer, if any shots remain
fn grab_marble(session: &LevelSession, p: Vec2) -> Option<Aim> {
    if session.out_of_shots() {
        return None;
    }
    session
        .marbles
        .iter()
        .position(|m| m.can_grab(p))
        .map(|marble| Aim {
            marble,
            anchor: session.marbles[marble].pos,
            end: p,
        })
}

fn fire(state: &mut GameState, aim: Aim) {
    let angle = aim.angle();
    let power = aim.power(&state.config.launch);
    let Some(marble) = state.session.marbles.get_mut(aim.marble) else {
        log::warn!("aim refers to missing marble {}", aim.marble);
        return;
    };
    marble.launch(angle, power);
    state.session.shots_fired += 1;
    log::debug!(
        "marble {} launched: angle={angle:.3} power={power:.2} ({}/{})",
        aim.marble,
        state.session.shots_fired,
        state.session.shot_budget
    );
    state.events.push(GameEvent::Launched {
        marble: aim.marble,
        angle,
        power,
    });
}
