//! The character controller.
//!
//! [`Controller`] owns the body, the movement state and the state machine and
//! advances them once per tick:
//!
//! 1. **Movement**: horizontal input, jump press, jump curve or gravity, coyote
//!    expiry and wall-jump impulse are combined into one displacement and moved
//!    axis by axis (skipped while dashing)
//! 2. **State update**: the active movement state checks its transitions
//! 3. **Dash cooldown**: the recharge timer runs down and refills charges
//! 4. **Notify**: the tick's events go to every observer
//!
//! The order is load-bearing: a dash entered during step 2 has already zeroed
//! gravity before the next movement step runs.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use cliffside_core::{Controller, FrameClock, InputFrame, StateKind};
//! use glam::Vec2;
//! use outcrop::{Aabb, CollisionWorld};
//!
//! let mut world = CollisionWorld::new();
//! world
//!     .add_solid(Aabb::from_min_max(Vec2::new(-50.0, -1.0), Vec2::new(50.0, 0.0)))
//!     .unwrap();
//!
//! let mut controller = Controller::builder()
//!     .world(Arc::new(world))
//!     .position(Vec2::new(0.0, 1.5))
//!     .build()
//!     .unwrap();
//!
//! let mut clock = FrameClock::new(1.0 / 64.0);
//! for _ in 0..10 {
//!     controller.tick(&InputFrame::idle(), clock.advance());
//! }
//! assert!(controller.state().is_grounded);
//!
//! controller.tick(&InputFrame::moving(1.0), clock.advance());
//! assert_eq!(controller.state_kind(), StateKind::Walk);
//! ```

use std::fmt;
use std::sync::Arc;

use glam::Vec2;
use outcrop::WorldQuery;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::body::{CollisionFlags, KinematicBody};
use crate::events::{EventQueue, MovementEvent, MovementObserver};
use crate::health::{DamageOutcome, Health};
use crate::input::{FrameTime, InputFrame};
use crate::machine::{MovementState, StateKind, StateMachine};
use crate::motor::Motor;
use crate::probe::{CollisionProbe, ProbeConfig, ProbeError};
use crate::profile::{MovementProfile, ProfileError};
use crate::state::{ControllerState, Facing};

/// Impulse speed under which the wall-jump impulse is dropped.
const IMPULSE_EPSILON: f32 = 0.01;

/// Errors raised while building a controller.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The movement profile failed validation.
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// The probe configuration is out of range.
    #[error(transparent)]
    Probe(#[from] ProbeError),

    /// No collision world was supplied to the builder.
    #[error("controller builder has no collision world")]
    MissingWorld,

    /// The body size is not strictly positive and finite.
    #[error("invalid body size {0}")]
    InvalidSize(Vec2),
}

// =============================================================================
// Controller
// =============================================================================

/// One controlled character.
pub struct Controller {
    profile: Arc<MovementProfile>,
    body: KinematicBody,
    state: ControllerState,
    machine: StateMachine,
    events: EventQueue,
    observers: Vec<Box<dyn MovementObserver>>,
    health: Health,
    ticks: u64,
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("body", &self.body)
            .field("state", &self.state)
            .field("machine", &self.machine)
            .field("events", &self.events)
            .field("observers", &format!("[{} observers]", self.observers.len()))
            .field("health", &self.health)
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

impl Controller {
    /// Create a controller for `body`, starting in `Idle` with full charges.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Profile`] if `profile` fails validation.
    pub fn new(profile: Arc<MovementProfile>, body: KinematicBody) -> Result<Self, ControllerError> {
        profile.validate()?;
        let state = ControllerState::spawn(&profile);
        debug!(
            position = ?body.position(),
            size = ?body.size(),
            jumps = profile.max_allowed_jumps,
            dashes = profile.max_allowed_dashes,
            "controller spawned"
        );
        Ok(Self {
            profile,
            body,
            state,
            machine: StateMachine::new(),
            events: EventQueue::new(),
            observers: Vec::new(),
            health: Health::default(),
            ticks: 0,
        })
    }

    /// Start building a controller.
    #[must_use]
    pub fn builder() -> ControllerBuilder {
        ControllerBuilder::default()
    }

    // -------------------------------------------------------------------------
    // Tick
    // -------------------------------------------------------------------------

    /// Advance the simulation by one tick and return the events it produced.
    ///
    /// The returned events stay available through [`Controller::events`] until
    /// the next tick or [`Controller::drain_events`].
    pub fn tick(&mut self, input: &InputFrame, time: FrameTime) -> &[MovementEvent] {
        self.events.clear();
        self.ticks += 1;

        {
            let mut motor = Motor::new(
                &mut self.body,
                &mut self.state,
                &self.profile,
                &mut self.events,
                time,
            );
            movement_step(&mut motor, input);
            self.machine.update(&mut motor, input);
        }

        self.update_dash_cooldown(time.dt);
        self.notify_observers();

        trace!(
            tick = self.ticks,
            state = %self.machine.kind(),
            position = ?self.body.position(),
            events = self.events.len(),
            "tick"
        );
        self.events.as_slice()
    }

    fn update_dash_cooldown(&mut self, dt: f32) {
        if !self.state.is_dash_on_cooldown {
            return;
        }

        self.state.dash_cooldown_timer -= dt;
        if self.state.dash_cooldown_timer <= 0.0 {
            self.state.is_dash_on_cooldown = false;
            self.state.remaining_dashes =
                (self.state.remaining_dashes + 1).min(self.profile.max_allowed_dashes);
            self.events.push(MovementEvent::DashRecharged {
                remaining: self.state.remaining_dashes,
            });
            debug!(remaining = self.state.remaining_dashes, "dash recharged");

            if self.state.remaining_dashes < self.profile.max_allowed_dashes {
                self.state.start_dash_cooldown(&self.profile);
            }
        }
    }

    fn notify_observers(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        for event in self.events.iter() {
            for observer in &mut self.observers {
                observer.on_event(event);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Register an observer. Observers are notified in registration order.
    pub fn add_observer(&mut self, observer: impl MovementObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Events of the latest tick.
    #[must_use]
    pub fn events(&self) -> &[MovementEvent] {
        self.events.as_slice()
    }

    /// Take the events of the latest tick.
    pub fn drain_events(&mut self) -> Vec<MovementEvent> {
        self.events.drain()
    }

    // -------------------------------------------------------------------------
    // Damage
    // -------------------------------------------------------------------------

    /// Apply damage and notify observers with a `Hurt` event.
    pub fn hurt(&mut self, amount: u32) -> DamageOutcome {
        let outcome = self.health.take_damage(amount);
        let event = MovementEvent::Hurt;
        self.events.push(event);
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
        debug!(amount, ?outcome, "hurt");
        outcome
    }

    /// Hit points.
    #[must_use]
    pub fn health(&self) -> &Health {
        &self.health
    }

    /// Replace the hit points.
    pub fn set_health(&mut self, health: Health) {
        self.health = health;
    }

    // -------------------------------------------------------------------------
    // Snapshot
    // -------------------------------------------------------------------------

    /// Dash charges left.
    #[must_use]
    pub fn remaining_dashes(&self) -> u32 {
        self.state.remaining_dashes
    }

    /// Dash charges when full.
    #[must_use]
    pub fn max_allowed_dashes(&self) -> u32 {
        self.profile.max_allowed_dashes
    }

    /// Seconds until the next dash charge.
    #[must_use]
    pub fn dash_cooldown_timer(&self) -> f32 {
        self.state.dash_cooldown_timer
    }

    /// Seconds to recharge one dash.
    #[must_use]
    pub fn dashing_cooldown(&self) -> f32 {
        self.profile.dashing_cooldown
    }

    /// Remaining share of the current recharge in `[0, 1]`, 0 when not cooling.
    #[must_use]
    pub fn dash_cooldown_fraction(&self) -> f32 {
        if !self.state.is_dash_on_cooldown || self.profile.dashing_cooldown <= 0.0 {
            return 0.0;
        }
        (self.state.dash_cooldown_timer / self.profile.dashing_cooldown).clamp(0.0, 1.0)
    }

    /// Collision flags of the latest axis moves.
    #[must_use]
    pub fn collision_flags(&self) -> CollisionFlags {
        self.state.collision_flags
    }

    /// Whether the latest horizontal move was blocked.
    #[must_use]
    pub fn is_against_wall(&self) -> bool {
        self.state.collision_flags.is_against_wall()
    }

    /// Discriminant of the active movement state.
    #[must_use]
    pub fn state_kind(&self) -> StateKind {
        self.machine.kind()
    }

    /// The active movement state.
    #[must_use]
    pub fn movement_state(&self) -> &MovementState {
        self.machine.active()
    }

    /// Center of the body.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.body.position()
    }

    /// Teleport the body without collision checks.
    pub fn set_position(&mut self, position: Vec2) {
        self.body.set_position(position);
    }

    /// The character body.
    #[must_use]
    pub fn body(&self) -> &KinematicBody {
        &self.body
    }

    /// Flags, timers and charges.
    #[must_use]
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Movement tuning.
    #[must_use]
    pub fn profile(&self) -> &MovementProfile {
        &self.profile
    }

    /// Ticks advanced so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Deterministic hash of the simulation state.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        crate::hash::hash_controller(self)
    }
}

/// One tick of regular movement. Skipped while dashing, the dash moves the
/// body itself.
fn movement_step(motor: &mut Motor<'_>, input: &InputFrame) {
    if motor.state.is_dashing {
        return;
    }

    let profile = motor.profile;
    let FrameTime { now, dt } = motor.time;

    let mut delta = Vec2::new(input.move_axis.x * profile.move_speed * dt, 0.0);

    if !motor.state.is_wall_sliding {
        if delta.x < 0.0 {
            motor.state.facing = Facing::Left;
        } else if delta.x > 0.0 {
            motor.state.facing = Facing::Right;
        }
    }

    // Against a wall the press belongs to the wall jump
    let wall_jump_ready = motor.state.is_wall_sliding && profile.can_wall_jump;
    if input.jump_pressed && !wall_jump_ready {
        motor.try_jump();
    }

    if motor.state.is_jumping {
        let curve = &profile.jump_displacement_curve;
        let since_jump = now - motor.state.jump_timestamp;
        delta.y = curve.evaluate(since_jump) - curve.evaluate(since_jump - dt);
        if since_jump > curve.x_max() {
            motor.state.is_jumping = false;
        }
    } else if motor.state.is_wall_sliding {
        delta.y = -profile.wall_sliding_speed * dt;
    } else {
        delta.y = -motor.state.gravity * dt;
    }

    if motor.state.is_under_coyote_time && now - motor.state.coyote_timestamp > profile.max_coyote_time
    {
        motor.state.remaining_jumps = motor.state.remaining_jumps.saturating_sub(1);
        motor.state.is_under_coyote_time = false;
        debug!(remaining = motor.state.remaining_jumps, "coyote time expired");
    }

    if motor.state.impulse != Vec2::ZERO {
        delta += motor.state.impulse * dt;
        motor.state.impulse *= (-profile.wall_jump_impulse_decay * dt).exp();
        if motor.state.impulse.length() < IMPULSE_EPSILON {
            motor.state.impulse = Vec2::ZERO;
        }
    }

    motor.move_by(delta);
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`Controller`].
///
/// Only the world is required; everything else has a default (stock profile,
/// 1x2 body at the origin, default probe settings, 3 hit points).
#[derive(Default)]
pub struct ControllerBuilder {
    profile: Option<Arc<MovementProfile>>,
    world: Option<Arc<dyn WorldQuery>>,
    position: Vec2,
    size: Option<Vec2>,
    probe: ProbeConfig,
    health: Option<Health>,
}

impl fmt::Debug for ControllerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerBuilder")
            .field("profile", &self.profile)
            .field("has_world", &self.world.is_some())
            .field("position", &self.position)
            .field("size", &self.size)
            .field("probe", &self.probe)
            .field("health", &self.health)
            .finish()
    }
}

impl ControllerBuilder {
    /// Movement tuning.
    #[must_use]
    pub fn profile(mut self, profile: impl Into<Arc<MovementProfile>>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Collision geometry the body moves against.
    #[must_use]
    pub fn world(mut self, world: Arc<dyn WorldQuery>) -> Self {
        self.world = Some(world);
        self
    }

    /// Spawn point (center of the body).
    #[must_use]
    pub fn position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Full size of the body box.
    #[must_use]
    pub fn size(mut self, size: Vec2) -> Self {
        self.size = Some(size);
        self
    }

    /// Ray fan settings.
    #[must_use]
    pub fn probe(mut self, probe: ProbeConfig) -> Self {
        self.probe = probe;
        self
    }

    /// Hit points.
    #[must_use]
    pub fn health(mut self, health: Health) -> Self {
        self.health = Some(health);
        self
    }

    /// Build the controller.
    ///
    /// # Errors
    ///
    /// - [`ControllerError::MissingWorld`] if no world was set
    /// - [`ControllerError::InvalidSize`] if the size is not positive
    /// - [`ControllerError::Probe`] or [`ControllerError::Profile`] on invalid settings
    pub fn build(self) -> Result<Controller, ControllerError> {
        let world = self.world.ok_or(ControllerError::MissingWorld)?;
        let size = self.size.unwrap_or(Vec2::new(1.0, 2.0));
        if !size.is_finite() || size.x <= 0.0 || size.y <= 0.0 {
            return Err(ControllerError::InvalidSize(size));
        }

        let probe = CollisionProbe::new(world, self.probe)?;
        let body = KinematicBody::new(self.position, size, probe);
        let profile = self.profile.unwrap_or_else(|| {
            warn!("no movement profile supplied, using stock tuning");
            Arc::default()
        });

        let mut controller = Controller::new(profile, body)?;
        if let Some(health) = self.health {
            controller.health = health;
        }
        Ok(controller)
    }
}
