//! Mutable per-character movement state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::body::CollisionFlags;
use crate::profile::MovementProfile;

/// Horizontal facing of the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    /// Facing -x
    Left,
    /// Facing +x
    #[default]
    Right,
}

impl Facing {
    /// `-1.0` for left, `+1.0` for right.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Flags, timers and charges owned by the controller and mutated by states.
///
/// Timestamps are in seconds on the controller's clock (see
/// [`FrameTime::now`](crate::input::FrameTime::now)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerState {
    /// Last downward move was blocked
    pub is_grounded: bool,
    /// Vertical motion follows the jump curve
    pub is_jumping: bool,
    /// Sliding down a wall at the capped speed
    pub is_wall_sliding: bool,
    /// A dash is in progress
    pub is_dashing: bool,
    /// Walking with non-zero horizontal input
    pub is_moving: bool,
    /// Inside the grace window after leaving the ground
    pub is_under_coyote_time: bool,
    /// When the current jump started
    pub jump_timestamp: f32,
    /// When the body left the ground without jumping
    pub coyote_timestamp: f32,
    /// Side of the last wall slide: -1 left, +1 right, 0 none since landing
    pub wall_jump_direction: i8,
    /// Jump charges left
    pub remaining_jumps: u32,
    /// Dash charges left
    pub remaining_dashes: u32,
    /// A dash charge is recharging
    pub is_dash_on_cooldown: bool,
    /// Seconds until the next dash charge
    pub dash_cooldown_timer: f32,
    /// Result of the latest axis moves
    pub collision_flags: CollisionFlags,
    /// Horizontal facing
    pub facing: Facing,
    /// Effective gravity (the profile value, zero while dashing)
    pub gravity: f32,
    /// Residual wall-jump velocity
    pub impulse: Vec2,
}

impl ControllerState {
    /// Spawn state for `profile`: full charges, airborne, facing right.
    #[must_use]
    pub fn spawn(profile: &MovementProfile) -> Self {
        Self {
            is_grounded: false,
            is_jumping: false,
            is_wall_sliding: false,
            is_dashing: false,
            is_moving: false,
            is_under_coyote_time: false,
            jump_timestamp: 0.0,
            coyote_timestamp: 0.0,
            wall_jump_direction: 0,
            remaining_jumps: profile.max_allowed_jumps,
            remaining_dashes: profile.max_allowed_dashes,
            is_dash_on_cooldown: false,
            dash_cooldown_timer: 0.0,
            collision_flags: CollisionFlags::empty(),
            facing: Facing::Right,
            gravity: profile.gravity,
            impulse: Vec2::ZERO,
        }
    }

    /// Start a fresh dash cooldown.
    pub fn start_dash_cooldown(&mut self, profile: &MovementProfile) {
        self.is_dash_on_cooldown = true;
        self.dash_cooldown_timer = profile.dashing_cooldown;
    }
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::spawn(&MovementProfile::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_has_full_charges() {
        let profile = MovementProfile {
            max_allowed_jumps: 2,
            max_allowed_dashes: 3,
            ..Default::default()
        };
        let state = ControllerState::spawn(&profile);
        assert_eq!(state.remaining_jumps, 2);
        assert_eq!(state.remaining_dashes, 3);
        assert_eq!(state.gravity, profile.gravity);
        assert!(!state.is_grounded);
        assert_eq!(state.facing, Facing::Right);
    }

    #[test]
    fn facing_sign() {
        assert_eq!(Facing::Left.sign(), -1.0);
        assert_eq!(Facing::Right.sign(), 1.0);
    }

    #[test]
    fn start_cooldown_sets_timer() {
        let profile = MovementProfile::default();
        let mut state = ControllerState::spawn(&profile);
        state.start_dash_cooldown(&profile);
        assert!(state.is_dash_on_cooldown);
        assert_eq!(state.dash_cooldown_timer, profile.dashing_cooldown);
    }
}
