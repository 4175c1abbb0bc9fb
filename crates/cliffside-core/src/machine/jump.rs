//! Airborne: rising along the jump curve or falling.

use super::{StateKind, StateMachine};
use crate::input::InputFrame;
use crate::motor::Motor;
use crate::probe::ProbeDirection;

pub(super) fn update(machine: &mut StateMachine, motor: &mut Motor<'_>, input: &InputFrame) {
    if motor.state.is_grounded {
        motor.state.wall_jump_direction = 0;
        let target = if input.move_axis.x == 0.0 {
            StateKind::Idle
        } else {
            StateKind::Walk
        };
        machine.switch_to(target, motor, input);
        return;
    }

    // A wall can only be slid on again after touching the opposite one or landing
    let last_wall = motor.state.wall_jump_direction;
    if motor.is_wall_adjacent(ProbeDirection::Left) && matches!(last_wall, 0 | 1) {
        machine.switch_to(StateKind::WallSlide, motor, input);
    } else if motor.is_wall_adjacent(ProbeDirection::Right) && matches!(last_wall, 0 | -1) {
        machine.switch_to(StateKind::WallSlide, motor, input);
    }
}
