//! Ray queries against axis-aligned boxes.
//!
//! Rays are finite: they start at `origin`, travel along a unit `direction`
//! and stop after `max_distance`. A box hit exactly at `max_distance` counts.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::world::ColliderId;
use crate::Aabb;

/// A finite ray.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    /// Start point
    pub origin: Vec2,
    /// Unit direction
    pub direction: Vec2,
    /// Length of the ray
    pub max_distance: f32,
}

impl Ray {
    /// Create a new ray. `direction` is normalized; a zero direction stays zero.
    #[must_use]
    pub fn new(origin: Vec2, direction: Vec2, max_distance: f32) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
            max_distance: max_distance.max(0.0),
        }
    }

    /// Point reached after travelling `distance` along the ray.
    #[must_use]
    pub fn point_at(&self, distance: f32) -> Vec2 {
        self.origin + self.direction * distance
    }

    /// Whether this ray travels straight down.
    #[must_use]
    pub fn is_downward(&self) -> bool {
        self.direction.y < 0.0 && self.direction.x.abs() <= f32::EPSILON
    }

    /// Distance along the ray at which it enters `aabb`, if within range.
    ///
    /// A ray starting inside the box hits at distance `0.0`.
    #[must_use]
    pub fn intersect_aabb(&self, aabb: &Aabb) -> Option<f32> {
        let mut t_enter = 0.0_f32;
        let mut t_exit = self.max_distance;

        for axis in 0..2 {
            let origin = self.origin[axis];
            let dir = self.direction[axis];
            let (lo, hi) = (aabb.min[axis], aabb.max[axis]);

            if dir.abs() <= f32::EPSILON {
                // Parallel to this slab: must already be between the planes
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let mut t0 = (lo - origin) * inv;
            let mut t1 = (hi - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_enter = t_enter.max(t0);
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return None;
            }
        }

        Some(t_enter)
    }

    /// Distance at which this ray lands on the top face of a one-way box.
    ///
    /// Only downward rays starting at or above the top face can hit; the ray
    /// must be horizontally within the box.
    #[must_use]
    pub fn hits_one_way(&self, aabb: &Aabb) -> Option<f32> {
        if !self.is_downward() {
            return None;
        }
        let top = aabb.max.y;
        if self.origin.y < top || self.origin.x < aabb.min.x || self.origin.x > aabb.max.x {
            return None;
        }
        let distance = self.origin.y - top;
        (distance <= self.max_distance).then_some(distance)
    }
}

/// Result of a successful ray query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    /// Distance from the ray origin to the hit point
    pub distance: f32,
    /// Collider that was hit
    pub collider: ColliderId,
}
