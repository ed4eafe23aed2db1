//! Collision and hit testing
//!
//! Everything in the game is a circle except the pause button, so this is
//! all the geometry the simulation needs.

use glam::Vec2;

use super::state::{Marble, Target};

/// True iff two circles overlap (touching does not count)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// True iff `point` lies strictly inside the circle
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance(center) < radius
}

/// True iff `point` lies strictly inside the axis-aligned box
#[inline]
pub fn point_in_rect(point: Vec2, min: Vec2, max: Vec2) -> bool {
    min.x < point.x && point.x < max.x && min.y < point.y && point.y < max.y
}

pub fn marble_hits_target(marble: &Marble, target: &Target) -> bool {
    circles_overlap(marble.pos, marble.radius, target.pos, target.radius)
}

/// Mark every unhit target touched by an active marble.
///
/// Returns the indices of targets hit this call, in target order.
pub fn collide_marbles_with_targets(marbles: &[Marble], targets: &mut [Target]) -> Vec<usize> {
    let mut hits = Vec::new();
    for marble in marbles.iter().filter(|m| m.active) {
        for (i, target) in targets.iter_mut().enumerate() {
            if !target.hit && marble_hits_target(marble, target) {
                target.hit = true;
                hits.push(i);
            }
        }
    }
    hits.sort_unstable();
    hits
}
