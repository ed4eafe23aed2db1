//! Marble integrator
//!
//! Unit-step Euler integration with gravity, wall reflection and a floor
//! bounce that eventually settles the marble.

use crate::config::{FieldConfig, IntegrationOrder, PhysicsConfig};

use super::state::Marble;

/// Advance an active marble by one step.
///
/// Returns true on the step where the marble comes to rest. Inactive
/// marbles are left untouched.
pub fn step_marble(marble: &mut Marble, physics: &PhysicsConfig, field: &FieldConfig) -> bool {
    if !marble.active {
        return false;
    }

    match physics.order {
        IntegrationOrder::PositionFirst => {
            marble.pos += marble.vel;
            marble.vel.y += physics.gravity;
        }
        IntegrationOrder::VelocityFirst => {
            marble.vel.y += physics.gravity;
            marble.pos += marble.vel;
        }
    }

    let r = marble.radius;

    // Side walls
    if marble.pos.x < r || marble.pos.x > field.width - r {
        marble.vel.x *= -physics.restitution;
        // Not `clamp`: a field narrower than the marble must not panic
        marble.pos.x = marble.pos.x.max(r).min(field.width - r);
    }

    // Floor
    let floor = field.height - r;
    if marble.pos.y > floor {
        marble.vel.y *= -physics.restitution;
        marble.pos.y = floor;
        if marble.vel.y.abs() < physics.rest_speed {
            marble.active = false;
            return true;
        }
    }

    false
}
