//! # Outcrop
//!
//! Static 2D collision geometry for kinematic character controllers.
//!
//! Outcrop stores the level as a flat set of axis-aligned boxes tagged with a
//! [`CollisionLayer`] and answers ray queries against them. It deliberately knows
//! nothing about the character being moved: a controller asks "is there an
//! obstacle along this ray within this distance" and gets back the closest hit.
//!
//! - **Solid geometry** blocks rays from every direction
//! - **One-way geometry** blocks only downward rays that start above its top face
//! - **Trigger zones** never block; they report enter/exit edges for a moving box
//!
//! ## Quick Start
//!
//! ```
//! use glam::Vec2;
//! use outcrop::{Aabb, CollisionLayer, CollisionWorld, Ray, WorldQuery};
//!
//! let mut world = CollisionWorld::new();
//! world
//!     .add_solid(Aabb::from_min_max(Vec2::new(-10.0, -1.0), Vec2::new(10.0, 0.0)))
//!     .unwrap();
//!
//! let ray = Ray::new(Vec2::new(0.0, 2.0), Vec2::NEG_Y, 5.0);
//! let hit = world.cast_ray(&ray, CollisionLayer::SOLID).unwrap();
//! assert!((hit.distance - 2.0).abs() < 1e-6);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod hash;
pub mod layer;
pub mod ray;
pub mod trigger;
pub mod world;

// Re-exports for convenience
pub use hash::hash_world;
pub use layer::CollisionLayer;
pub use ray::{Ray, RayHit};
pub use trigger::{TriggerEvent, TriggerSet, TriggerZone};
pub use world::{Collider, ColliderId, CollisionWorld, WorldConfig, WorldError, WorldQuery};

use glam::Vec2;

/// Axis-aligned bounding box in world units (y up).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Aabb {
    /// Minimum corner (left, bottom)
    pub min: Vec2,
    /// Maximum corner (right, top)
    pub max: Vec2,
}

impl Aabb {
    /// Create a box from its center and full size.
    #[must_use]
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Create a box from min/max corners.
    #[must_use]
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Get the center of the box.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Get the full size of the box.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Get half of the box size.
    #[must_use]
    pub fn half_extents(&self) -> Vec2 {
        self.size() * 0.5
    }

    /// Returns a copy of this box moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Check if a point is inside the box (edges included).
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check if two boxes overlap with non-zero area.
    ///
    /// Boxes that only share an edge do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// A box is well-formed when every coordinate is finite and `min <= max`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min.x <= self.max.x
            && self.min.y <= self.max.y
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::from_center_size(Vec2::ZERO, Vec2::ONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_center_size() {
        let aabb = Aabb::from_center_size(Vec2::new(1.0, 2.0), Vec2::new(2.0, 4.0));
        assert_eq!(aabb.min, Vec2::new(0.0, 0.0));
        assert_eq!(aabb.max, Vec2::new(2.0, 4.0));
        assert_eq!(aabb.center(), Vec2::new(1.0, 2.0));
        assert_eq!(aabb.half_extents(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_aabb_contains() {
        let aabb = Aabb::from_center_size(Vec2::ZERO, Vec2::splat(2.0));
        assert!(aabb.contains(Vec2::ZERO));
        assert!(aabb.contains(Vec2::new(1.0, 1.0)));
        assert!(!aabb.contains(Vec2::new(1.5, 0.0)));
    }

    #[test]
    fn test_aabb_overlap_excludes_shared_edge() {
        let a = Aabb::from_min_max(Vec2::ZERO, Vec2::ONE);
        let b = Aabb::from_min_max(Vec2::new(1.0, 0.0), Vec2::new(2.0, 1.0));
        let c = Aabb::from_min_max(Vec2::new(0.5, 0.5), Vec2::new(2.0, 2.0));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn test_aabb_translated() {
        let aabb = Aabb::default().translated(Vec2::new(3.0, -1.0));
        assert_eq!(aabb.center(), Vec2::new(3.0, -1.0));
        assert_eq!(aabb.size(), Vec2::ONE);
    }

    #[test]
    fn test_aabb_validity() {
        assert!(Aabb::default().is_valid());
        assert!(!Aabb::from_min_max(Vec2::ONE, Vec2::ZERO).is_valid());
        assert!(!Aabb::from_min_max(Vec2::new(f32::NAN, 0.0), Vec2::ONE).is_valid());
    }
}
