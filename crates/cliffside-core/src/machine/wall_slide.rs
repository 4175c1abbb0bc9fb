//! Sliding down a wall at a capped speed.

use glam::Vec2;
use tracing::debug;

use super::{StateKind, StateMachine};
use crate::events::MovementEvent;
use crate::input::InputFrame;
use crate::motor::Motor;
use crate::probe::ProbeDirection;

pub(super) fn enter(motor: &mut Motor<'_>) {
    motor.state.is_wall_sliding = true;
    motor.state.is_jumping = false;
}

pub(super) fn update(machine: &mut StateMachine, motor: &mut Motor<'_>, input: &InputFrame) {
    if motor.state.is_grounded {
        motor.state.wall_jump_direction = 0;
        machine.switch_to(StateKind::Idle, motor, input);
        return;
    }

    let left = motor.is_wall_adjacent(ProbeDirection::Left);
    let right = motor.is_wall_adjacent(ProbeDirection::Right);
    if !left && !right {
        machine.switch_to(StateKind::Jump, motor, input);
        return;
    }

    motor.state.wall_jump_direction = if left { -1 } else { 1 };

    if input.jump_pressed && motor.profile.can_wall_jump {
        wall_jump(motor);
        machine.switch_to(StateKind::Jump, motor, input);
    }
}

pub(super) fn exit(motor: &mut Motor<'_>) {
    motor.state.is_wall_sliding = false;
}

/// Jump off the wall. The extra charge is granted first so the jump never
/// fails, leaving the charge count unchanged. The movement step leaves the
/// press alone while sliding, so this is the only jump of the tick.
fn wall_jump(motor: &mut Motor<'_>) {
    motor.state.is_wall_sliding = false;
    motor.state.remaining_jumps = motor.state.remaining_jumps.saturating_add(1);
    motor.try_jump();

    let force = motor.profile.wall_jump_force;
    let impulse = Vec2::new(f32::from(motor.state.wall_jump_direction) * force, force);
    motor.state.impulse = impulse;
    motor.events.push(MovementEvent::WallJumped { impulse });
    debug!(?impulse, "wall jump");
}
