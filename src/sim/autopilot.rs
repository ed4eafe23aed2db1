//! Demo player
//!
//! Plans a full drag gesture toward the first unhit target. It compensates
//! for gravity with a single time-of-flight estimate, which is good enough
//! to clear early levels and to exercise the whole loop headless.

use glam::Vec2;

use super::state::{GameState, Mode};
use super::tick::InputEvent;

/// Pointer events for the next shot, or None if the autopilot should wait
pub fn plan_shot(state: &GameState) -> Option<[InputEvent; 3]> {
    if state.mode != Mode::Normal || state.banner.is_some() {
        return None;
    }
    let session = &state.session;
    if session.out_of_shots() || session.any_in_flight() {
        return None;
    }

    let marble = session.marbles.iter().find(|m| !m.active)?;
    let target = session.targets.iter().find(|t| !t.hit)?;

    let launch = &state.config.launch;
    let speed = launch.power_cap;
    if speed <= 0.0 {
        return None;
    }

    // Aim above the target by the drop accumulated over the flight
    let flight_ticks = marble.pos.distance(target.pos) / speed;
    let drop = 0.5 * state.config.physics.gravity * flight_ticks * flight_ticks;
    let aim_point = target.pos - Vec2::new(0.0, drop);
    let dir = (aim_point - marble.pos).normalize_or_zero();
    if dir == Vec2::ZERO {
        return None;
    }

    // Launch goes from the pointer through the anchor, so pull the opposite way
    let end = marble.pos - dir * speed * launch.power_scale;
    Some([
        InputEvent::PointerDown(marble.pos),
        InputEvent::PointerMove(end),
        InputEvent::PointerUp(end),
    ])
}
