//! Eight-direction dash.
//!
//! Entering consumes a charge, suspends gravity and fixes the direction for
//! the whole dash. While active, the dash moves the body along that direction
//! with speed shaped by the profile's acceleration curve. Once the dash time
//! has elapsed the dash hands over exactly once to a ground or air state.

use glam::Vec2;
use tracing::debug;

use super::{StateKind, StateMachine};
use crate::events::MovementEvent;
use crate::input::InputFrame;
use crate::motor::Motor;
use crate::state::Facing;

/// Input magnitude under which the dash goes where the character faces.
const DEAD_ZONE: f32 = 0.1;

/// Candidate directions, in tie-break order.
const EIGHT_DIRECTIONS: [Vec2; 8] = [
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(-1.0, 1.0),
    Vec2::new(-1.0, 0.0),
    Vec2::new(-1.0, -1.0),
    Vec2::new(0.0, -1.0),
    Vec2::new(1.0, -1.0),
];

/// Data of one dash, reset on every enter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashState {
    /// When the dash started
    pub start_time: f32,
    /// Unit direction
    pub direction: Vec2,
    /// The hand-over has already happened
    pub completed: bool,
    /// Effective gravity before the dash
    pub saved_gravity: f32,
}

/// Unit dash direction for a movement input.
///
/// Inputs shorter than the dead zone dash along `facing`. Otherwise the first
/// of the eight compass directions (east, then counter-clockwise) closest in
/// angle to the input wins.
///
/// # Example
///
/// ```
/// use cliffside_core::machine::snap_direction;
/// use cliffside_core::Facing;
/// use glam::Vec2;
///
/// assert_eq!(snap_direction(Vec2::new(0.9, 0.2), Facing::Left), Vec2::X);
/// assert_eq!(snap_direction(Vec2::ZERO, Facing::Left), Vec2::NEG_X);
/// ```
#[must_use]
pub fn snap_direction(input: Vec2, facing: Facing) -> Vec2 {
    if input.length() < DEAD_ZONE {
        return Vec2::new(facing.sign(), 0.0);
    }

    let wanted = input.normalize();
    let mut best = EIGHT_DIRECTIONS[0];
    let mut best_dot = f32::NEG_INFINITY;
    for candidate in EIGHT_DIRECTIONS {
        let dot = wanted.dot(candidate.normalize());
        if dot > best_dot {
            best_dot = dot;
            best = candidate;
        }
    }
    best.normalize()
}

pub(super) fn enter(motor: &mut Motor<'_>, input: &InputFrame) -> DashState {
    let profile = motor.profile;
    let state = &mut *motor.state;

    state.is_dashing = true;
    state.remaining_dashes = state.remaining_dashes.saturating_sub(1);
    if state.remaining_dashes < profile.max_allowed_dashes && !state.is_dash_on_cooldown {
        state.start_dash_cooldown(profile);
    }

    let direction = snap_direction(input.move_axis, state.facing);
    let saved_gravity = state.gravity;
    state.gravity = 0.0;

    motor.events.push(MovementEvent::Dashed { direction });
    debug!(?direction, remaining = motor.state.remaining_dashes, "dash");

    DashState {
        start_time: motor.time.now,
        direction,
        completed: false,
        saved_gravity,
    }
}

pub(super) fn update(
    machine: &mut StateMachine,
    mut dash: DashState,
    motor: &mut Motor<'_>,
    input: &InputFrame,
) {
    let profile = motor.profile;
    let elapsed = motor.time.now - dash.start_time;

    if elapsed >= profile.dashing_time {
        if !dash.completed {
            dash.completed = true;
            machine.store_dash(dash);
            finalize(machine, motor, input);
        }
        return;
    }

    let progress = elapsed / profile.dashing_time;
    let speed = profile.dashing_power * profile.dash_acceleration_curve.evaluate(progress);
    let delta = dash.direction * speed * motor.time.dt;
    motor.move_by(delta);
}

pub(super) fn exit(dash: DashState, motor: &mut Motor<'_>) {
    motor.state.is_dashing = false;
    motor.state.gravity = dash.saved_gravity;
    motor.events.push(MovementEvent::DashEnded);
}

fn finalize(machine: &mut StateMachine, motor: &mut Motor<'_>, input: &InputFrame) {
    if motor.state.is_grounded {
        let target = if input.move_axis.x.abs() > DEAD_ZONE {
            StateKind::Walk
        } else {
            StateKind::Idle
        };
        motor.events.push(MovementEvent::DashLanded);
        machine.switch_to(target, motor, input);
    } else if motor.state.is_wall_sliding && !motor.state.is_jumping {
        machine.switch_to(StateKind::WallSlide, motor, input);
    } else {
        machine.switch_to(StateKind::Jump, motor, input);
    }
}
