//! The kinematic body: authoritative position and box of the character.
//!
//! The body itself only knows where it is and how big it is. Axis movement
//! with flag bookkeeping lives in [`Motor`](crate::motor::Motor), which borrows
//! the body together with the controller state.

use bitflags::bitflags;
use glam::Vec2;
use outcrop::Aabb;
use serde::{Deserialize, Serialize};

use crate::probe::{CollisionProbe, ProbeConfig, ProbeDirection};

bitflags! {
    /// Sides on which the latest movement attempt was blocked.
    ///
    /// Each axis move clears and sets only its own bits, so the flags describe
    /// the last attempt on each axis rather than persistent contact.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct CollisionFlags: u8 {
        /// Blocked moving right
        const RIGHT = 1 << 0;
        /// Blocked moving up
        const ABOVE = 1 << 1;
        /// Blocked moving left
        const LEFT = 1 << 2;
        /// Blocked moving down (landed)
        const BELOW = 1 << 3;
    }
}

impl CollisionFlags {
    /// Flag bit for a probe direction.
    #[must_use]
    pub const fn for_direction(direction: ProbeDirection) -> Self {
        match direction {
            ProbeDirection::Right => Self::RIGHT,
            ProbeDirection::Above => Self::ABOVE,
            ProbeDirection::Left => Self::LEFT,
            ProbeDirection::Below => Self::BELOW,
        }
    }

    /// Whether the last horizontal move was blocked on either side.
    #[must_use]
    pub const fn is_against_wall(self) -> bool {
        self.intersects(Self::LEFT.union(Self::RIGHT))
    }
}

/// Axis-aligned character body.
#[derive(Debug, Clone)]
pub struct KinematicBody {
    /// Center of the box
    position: Vec2,
    /// Full size of the box
    size: Vec2,
    probe: CollisionProbe,
}

impl KinematicBody {
    /// Create a body centered at `position`.
    #[must_use]
    pub fn new(position: Vec2, size: Vec2, probe: CollisionProbe) -> Self {
        Self {
            position,
            size,
            probe,
        }
    }

    /// Center of the box.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Place the body without any collision check.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Full size of the box.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Current world-space box.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.position, self.size)
    }

    /// Probe settings.
    #[must_use]
    pub fn probe_config(&self) -> &ProbeConfig {
        self.probe.config()
    }

    /// Cast the probe fan from the current box.
    #[must_use]
    pub fn probe(&self, direction: ProbeDirection, distance: f32) -> bool {
        self.probe.probe(&self.bounds(), direction, distance)
    }

    /// Whether a wall is within the wall-check distance on `side`.
    #[must_use]
    pub fn is_adjacent_to_wall(&self, side: ProbeDirection) -> bool {
        self.probe(side, self.probe_config().wall_check_distance())
    }

    /// Move by `offset` unconditionally.
    pub fn translate(&mut self, offset: Vec2) {
        self.position += offset;
    }
}
