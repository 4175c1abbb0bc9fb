//! Axis-limited movement with flag bookkeeping.
//!
//! A [`Motor`] borrows the body, the controller state and the event queue for
//! the duration of one tick. Every movement of the body goes through it, so
//! collision flags, grounding, coyote time and jump charges stay consistent
//! with what the probe saw.
//!
//! Axes are resolved independently (horizontal first), and a blocked axis does
//! not move at all. A diagonal move can therefore clip a corner that neither
//! axis probe sees.

use glam::Vec2;
use tracing::{debug, trace};

use crate::body::{CollisionFlags, KinematicBody};
use crate::events::{EventQueue, MovementEvent};
use crate::input::FrameTime;
use crate::probe::ProbeDirection;
use crate::profile::MovementProfile;
use crate::state::ControllerState;

/// Per-tick mutable view over everything a movement state may touch.
#[derive(Debug)]
pub struct Motor<'a> {
    /// The character body
    pub body: &'a mut KinematicBody,
    /// Flags, timers and charges
    pub state: &'a mut ControllerState,
    /// Tuning
    pub profile: &'a MovementProfile,
    /// Events recorded this tick
    pub events: &'a mut EventQueue,
    /// Current frame time
    pub time: FrameTime,
}

impl<'a> Motor<'a> {
    /// Bundle the borrows for one tick.
    pub fn new(
        body: &'a mut KinematicBody,
        state: &'a mut ControllerState,
        profile: &'a MovementProfile,
        events: &'a mut EventQueue,
        time: FrameTime,
    ) -> Self {
        Self {
            body,
            state,
            profile,
            events,
            time,
        }
    }

    /// Move along x unless the probe reports an obstacle within `|dx|`.
    ///
    /// Returns `true` if the move was blocked.
    pub fn move_horizontal(&mut self, dx: f32) -> bool {
        let direction = if dx > 0.0 {
            ProbeDirection::Right
        } else {
            ProbeDirection::Left
        };
        let flag = CollisionFlags::for_direction(direction);

        if self.body.probe(direction, dx.abs()) {
            self.state.collision_flags.insert(flag);
            return true;
        }

        self.state.collision_flags.remove(flag);
        self.body.translate(Vec2::new(dx, 0.0));
        false
    }

    /// Move along y unless the probe reports an obstacle within `|dy|`.
    ///
    /// A zero move probes downward. A blocked downward move lands the body:
    /// it becomes grounded, jump charges refill and the wall-jump impulse is
    /// dropped. An unblocked downward move from the ground opens the coyote
    /// window.
    ///
    /// Returns `true` if the move was blocked.
    pub fn move_vertical(&mut self, dy: f32) -> bool {
        let direction = if dy > 0.0 {
            ProbeDirection::Above
        } else {
            ProbeDirection::Below
        };

        if self.body.probe(direction, dy.abs()) {
            if dy > 0.0 {
                self.state.collision_flags.insert(CollisionFlags::ABOVE);
            } else {
                self.land();
            }
            return true;
        }

        if dy < 0.0 {
            if self.state.is_grounded {
                self.state.is_under_coyote_time = true;
                self.state.coyote_timestamp = self.time.now;
                self.events.push(MovementEvent::Fell);
                debug!(now = self.time.now, "left ground, coyote window open");
            }
            self.state.is_grounded = false;
            self.state.collision_flags.remove(CollisionFlags::BELOW);
        }
        self.state.collision_flags.remove(CollisionFlags::ABOVE);
        self.body.translate(Vec2::new(0.0, dy));
        false
    }

    /// Horizontal then vertical move. Records one `Collision` event if either
    /// axis was blocked.
    ///
    /// Returns `true` if either axis was blocked.
    pub fn move_by(&mut self, delta: Vec2) -> bool {
        let blocked_x = self.move_horizontal(delta.x);
        let blocked_y = self.move_vertical(delta.y);
        let blocked = blocked_x || blocked_y;
        if blocked {
            self.events.push(MovementEvent::Collision {
                flags: self.state.collision_flags,
            });
        }
        blocked
    }

    /// Start a jump if a charge is left. Silently does nothing otherwise.
    ///
    /// Returns `true` if the jump started.
    pub fn try_jump(&mut self) -> bool {
        if self.state.remaining_jumps < 1 {
            trace!("jump rejected, no charges");
            return false;
        }

        self.state.is_under_coyote_time = false;
        self.state.is_grounded = false;
        self.state.is_jumping = true;
        self.state.jump_timestamp = self.time.now;
        self.state.remaining_jumps -= 1;

        let index = self
            .profile
            .max_allowed_jumps
            .saturating_sub(self.state.remaining_jumps + 1);
        self.events.push(MovementEvent::Jumped { index });
        debug!(index, remaining = self.state.remaining_jumps, "jump");
        true
    }

    /// Whether a wall is right next to the body on `side`.
    #[must_use]
    pub fn is_wall_adjacent(&self, side: ProbeDirection) -> bool {
        self.body.is_adjacent_to_wall(side)
    }

    fn land(&mut self) {
        self.state.collision_flags.insert(CollisionFlags::BELOW);
        let was_grounded = self.state.is_grounded;
        self.state.is_grounded = true;
        self.state.is_under_coyote_time = false;
        self.state.remaining_jumps = self.profile.max_allowed_jumps;
        self.state.impulse = Vec2::ZERO;
        self.events.push(MovementEvent::Grounded);
        if was_grounded {
            trace!("grounded");
        } else {
            debug!(now = self.time.now, "landed");
        }
    }
}
