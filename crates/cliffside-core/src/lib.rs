//! # Cliffside Core
//!
//! Deterministic movement and collision core for a 2D platformer character.
//!
//! The character is an axis-aligned box moved by a per-tick kinematic
//! integrator, not by a physics solver. Collisions are found by fanning short
//! rays out of the box edge in the direction of travel; a blocked axis simply
//! does not move. A five-state machine (Idle, Walk, Jump, `WallSlide`, Dash)
//! decides which rules drive the body.
//!
//! ## Architecture
//!
//! - **Probe** ([`CollisionProbe`]): ray fans against an [`outcrop::WorldQuery`]
//! - **Profile** ([`MovementProfile`]): immutable tuning with sampled curves
//! - **Body** ([`KinematicBody`]) and **Motor** ([`Motor`]): axis movement and
//!   flag bookkeeping
//! - **Machine** ([`StateMachine`]): enter/update/exit hooks per state
//! - **Controller** ([`Controller`]): the tick loop, dash cooldown and events
//!
//! Feel details encoded here: coyote time after walking off a ledge, jump arcs
//! that follow an authored displacement curve exactly at any frame rate, wall
//! slides with a direction lock, wall jumps, and an eight-direction dash that
//! still collides.
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use cliffside_core::{Controller, FrameClock, InputFrame, MovementEvent};
//! use glam::Vec2;
//! use outcrop::WorldConfig;
//!
//! let layout = WorldConfig::from_json(
//!     r#"{ "solids": [ { "min": [-20.0, -1.0], "max": [20.0, 0.0] } ] }"#,
//! )
//! .unwrap();
//! let (world, _triggers) = layout.build().unwrap();
//!
//! let mut controller = Controller::builder()
//!     .world(Arc::new(world))
//!     .position(Vec2::new(0.0, 1.5))
//!     .build()
//!     .unwrap();
//!
//! let mut clock = FrameClock::new(1.0 / 64.0);
//! let mut landed = false;
//! for _ in 0..8 {
//!     let events = controller.tick(&InputFrame::idle(), clock.advance());
//!     landed |= events.contains(&MovementEvent::Grounded);
//! }
//! assert!(landed);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod body;
pub mod controller;
pub mod curve;
pub mod events;
pub mod hash;
pub mod health;
pub mod input;
pub mod machine;
pub mod motor;
pub mod probe;
pub mod profile;
pub mod state;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use body::{CollisionFlags, KinematicBody};
pub use controller::{Controller, ControllerBuilder, ControllerError};
pub use curve::{CurveError, SampledCurve};
pub use events::{EventQueue, MovementEvent, MovementObserver};
pub use hash::hash_controller;
pub use health::{DamageOutcome, Health};
pub use input::{FrameClock, FrameTime, InputFrame};
pub use machine::{DashState, MovementState, StateKind, StateMachine};
pub use motor::Motor;
pub use probe::{CollisionProbe, ProbeConfig, ProbeDirection, ProbeError};
pub use profile::{MovementProfile, ProfileError};
pub use state::{ControllerState, Facing};
