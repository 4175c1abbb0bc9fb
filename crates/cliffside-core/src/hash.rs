//! State hashing for determinism verification.
//!
//! Two controllers fed the same inputs and frame times against the same
//! geometry must produce identical hashes. Floats are hashed by bit pattern,
//! so the comparison is exact.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use glam::Vec2;

use crate::controller::Controller;
use crate::machine::MovementState;

/// Compute a deterministic hash of a controller's simulation state.
///
/// Covers the body position, every field of the movement state, the active
/// state (including dash data) and the tick count. Observers and queued
/// events are not part of the hash.
#[must_use]
pub fn hash_controller(controller: &Controller) -> u64 {
    let mut hasher = DefaultHasher::new();

    controller.ticks().hash(&mut hasher);
    hash_vec2(controller.position(), &mut hasher);

    let state = controller.state();
    state.is_grounded.hash(&mut hasher);
    state.is_jumping.hash(&mut hasher);
    state.is_wall_sliding.hash(&mut hasher);
    state.is_dashing.hash(&mut hasher);
    state.is_moving.hash(&mut hasher);
    state.is_under_coyote_time.hash(&mut hasher);
    state.jump_timestamp.to_bits().hash(&mut hasher);
    state.coyote_timestamp.to_bits().hash(&mut hasher);
    state.wall_jump_direction.hash(&mut hasher);
    state.remaining_jumps.hash(&mut hasher);
    state.remaining_dashes.hash(&mut hasher);
    state.is_dash_on_cooldown.hash(&mut hasher);
    state.dash_cooldown_timer.to_bits().hash(&mut hasher);
    state.collision_flags.bits().hash(&mut hasher);
    state.facing.hash(&mut hasher);
    state.gravity.to_bits().hash(&mut hasher);
    hash_vec2(state.impulse, &mut hasher);

    let active = controller.movement_state();
    active.kind().hash(&mut hasher);
    if let MovementState::Dash(dash) = active {
        dash.start_time.to_bits().hash(&mut hasher);
        hash_vec2(dash.direction, &mut hasher);
        dash.completed.hash(&mut hasher);
        dash.saved_gravity.to_bits().hash(&mut hasher);
    }

    controller.health().current().hash(&mut hasher);

    hasher.finish()
}

fn hash_vec2<H: Hasher>(v: Vec2, hasher: &mut H) {
    v.x.to_bits().hash(hasher);
    v.y.to_bits().hash(hasher);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{FrameTime, InputFrame};
    use outcrop::CollisionWorld;
    use std::sync::Arc;

    fn controller() -> Controller {
        Controller::builder()
            .world(Arc::new(CollisionWorld::new()))
            .build()
            .unwrap()
    }

    #[test]
    fn fresh_controllers_hash_equal() {
        assert_eq!(hash_controller(&controller()), hash_controller(&controller()));
    }

    #[test]
    fn movement_changes_hash() {
        let a = controller();
        let mut b = controller();
        b.tick(&InputFrame::idle(), FrameTime::new(0.1, 0.1));
        assert_ne!(hash_controller(&a), hash_controller(&b));
    }

    #[test]
    fn draining_events_does_not_change_hash() {
        let mut c = controller();
        c.tick(&InputFrame::moving(1.0), FrameTime::new(0.1, 0.1));
        let before = hash_controller(&c);
        c.drain_events();
        assert_eq!(before, hash_controller(&c));
    }
}
