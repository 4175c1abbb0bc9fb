//! Standing still on the ground.

use super::{StateKind, StateMachine};
use crate::input::InputFrame;
use crate::motor::Motor;

pub(super) fn update(machine: &mut StateMachine, motor: &mut Motor<'_>, input: &InputFrame) {
    if input.move_axis.x != 0.0 {
        machine.switch_to(StateKind::Walk, motor, input);
    }

    if input.jump_pressed {
        machine.switch_to(StateKind::Jump, motor, input);
    }

    if input.dash_pressed && motor.state.remaining_dashes > 0 {
        machine.switch_to(StateKind::Dash, motor, input);
    }
}
