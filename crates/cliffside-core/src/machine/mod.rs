//! Movement state machine.
//!
//! Exactly one [`MovementState`] is active at a time. Each state has enter,
//! update and exit hooks in its own module; the [`StateMachine`] dispatches to
//! them and performs switches.
//!
//! # Transitions
//!
//! | From | To | When |
//! |------|----|------|
//! | Idle | Walk | horizontal input |
//! | Idle, Walk | Jump | jump pressed |
//! | Idle, Walk | Dash | dash pressed with a charge left |
//! | Walk | Idle | no horizontal input |
//! | Jump | Walk, Idle | landed |
//! | Jump | WallSlide | wall adjacent on a side not just slid on |
//! | WallSlide | Idle | landed |
//! | WallSlide | Jump | wall lost, or wall jump |
//! | Dash | Walk, Idle, Jump, WallSlide | dash time elapsed |
//!
//! Checks inside one update run in order, so a single update may switch more
//! than once (for example Idle to Walk to Jump). Every switch runs the old
//! state's exit hook and then the new state's enter hook before returning.

mod dash;
mod idle;
mod jump;
mod wall_slide;
mod walk;

pub use dash::{snap_direction, DashState};

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::events::MovementEvent;
use crate::input::InputFrame;
use crate::motor::Motor;

/// Discriminant of a [`MovementState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateKind {
    /// Standing still on the ground
    Idle,
    /// Walking on the ground
    Walk,
    /// Airborne, rising or falling
    Jump,
    /// Sliding down a wall
    WallSlide,
    /// Dashing
    Dash,
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Walk => write!(f, "Walk"),
            Self::Jump => write!(f, "Jump"),
            Self::WallSlide => write!(f, "WallSlide"),
            Self::Dash => write!(f, "Dash"),
        }
    }
}

/// The active state with its per-activation data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovementState {
    /// Standing still
    Idle,
    /// Walking
    Walk,
    /// Airborne
    Jump,
    /// Sliding down a wall
    WallSlide,
    /// Dashing, with the data of the current dash
    Dash(DashState),
}

impl MovementState {
    /// Discriminant of this state.
    #[must_use]
    pub const fn kind(&self) -> StateKind {
        match self {
            Self::Idle => StateKind::Idle,
            Self::Walk => StateKind::Walk,
            Self::Jump => StateKind::Jump,
            Self::WallSlide => StateKind::WallSlide,
            Self::Dash(_) => StateKind::Dash,
        }
    }
}

/// Owns the active state and performs switches.
#[derive(Debug, Clone)]
pub struct StateMachine {
    active: MovementState,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    /// Machine starting in [`MovementState::Idle`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            active: MovementState::Idle,
        }
    }

    /// The active state.
    #[must_use]
    pub fn active(&self) -> &MovementState {
        &self.active
    }

    /// Discriminant of the active state.
    #[must_use]
    pub fn kind(&self) -> StateKind {
        self.active.kind()
    }

    /// Run the active state's update hook.
    pub fn update(&mut self, motor: &mut Motor<'_>, input: &InputFrame) {
        match self.active {
            MovementState::Idle => idle::update(self, motor, input),
            MovementState::Walk => walk::update(self, motor, input),
            MovementState::Jump => jump::update(self, motor, input),
            MovementState::WallSlide => wall_slide::update(self, motor, input),
            MovementState::Dash(dash) => dash::update(self, dash, motor, input),
        }
    }

    /// Switch to `target`, running exit then enter hooks.
    ///
    /// Does nothing if `target` is already active. Returns `true` if a switch
    /// happened.
    pub fn switch_to(&mut self, target: StateKind, motor: &mut Motor<'_>, input: &InputFrame) -> bool {
        let from = self.active.kind();
        if from == target {
            return false;
        }

        match self.active {
            MovementState::Idle | MovementState::Jump => {}
            MovementState::Walk => walk::exit(motor),
            MovementState::WallSlide => wall_slide::exit(motor),
            MovementState::Dash(dash) => dash::exit(dash, motor),
        }

        self.active = match target {
            StateKind::Idle => MovementState::Idle,
            StateKind::Walk => {
                walk::enter(motor);
                MovementState::Walk
            }
            StateKind::Jump => MovementState::Jump,
            StateKind::WallSlide => {
                wall_slide::enter(motor);
                MovementState::WallSlide
            }
            StateKind::Dash => MovementState::Dash(dash::enter(motor, input)),
        };

        motor.events.push(MovementEvent::StateChanged { from, to: target });
        debug!(%from, to = %target, now = motor.time.now, "state switch");
        true
    }

    /// Replace the stored dash data while a dash is active.
    fn store_dash(&mut self, dash: DashState) {
        if let MovementState::Dash(active) = &mut self.active {
            *active = dash;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let machine = StateMachine::new();
        assert_eq!(machine.kind(), StateKind::Idle);
        assert_eq!(*machine.active(), MovementState::Idle);
    }

    #[test]
    fn kind_display() {
        assert_eq!(StateKind::WallSlide.to_string(), "WallSlide");
        assert_eq!(MovementState::Jump.kind(), StateKind::Jump);
    }
}
