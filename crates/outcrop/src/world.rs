//! Collision world: top-level collider store and query API.
//!
//! Colliders live in a `BTreeMap` keyed by [`ColliderId`] so iteration order,
//! and therefore tie-breaking between equally distant hits, is deterministic.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::layer::CollisionLayer;
use crate::ray::{Ray, RayHit};
use crate::trigger::{TriggerSet, TriggerZone};
use crate::Aabb;

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while building or editing a collision world.
#[derive(Debug, Error)]
pub enum WorldError {
    /// A box had non-finite coordinates or `min > max`.
    #[error("invalid collider box: min {min:?}, max {max:?}")]
    InvalidBox {
        /// Minimum corner as given
        min: glam::Vec2,
        /// Maximum corner as given
        max: glam::Vec2,
    },

    /// No collider exists with this id.
    #[error("unknown collider {0}")]
    UnknownCollider(ColliderId),

    /// World layout JSON could not be parsed.
    #[error("world config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

// =============================================================================
// Colliders
// =============================================================================

/// Unique identifier for a collider within one world.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ColliderId(u64);

impl ColliderId {
    /// Creates a collider id from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value of this id.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ColliderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ColliderId({})", self.0)
    }
}

impl fmt::Display for ColliderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A static box of collision geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    /// Identifier assigned by the world
    pub id: ColliderId,
    /// World-space bounds
    pub bounds: Aabb,
    /// Layer membership (exactly one of `SOLID` / `ONE_WAY`)
    pub layer: CollisionLayer,
}

// =============================================================================
// Query seam
// =============================================================================

/// Hit-test interface consumed by character controllers.
///
/// Implementors answer "is there an obstacle along this ray within its
/// length" for the layers in `mask`, returning the closest hit.
pub trait WorldQuery: Send + Sync {
    /// Cast a ray against every collider whose layer intersects `mask`.
    fn cast_ray(&self, ray: &Ray, mask: CollisionLayer) -> Option<RayHit>;
}

// =============================================================================
// CollisionWorld
// =============================================================================

/// Static collision geometry for one level.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollisionWorld {
    colliders: BTreeMap<ColliderId, Collider>,
    next_id: u64,
}

impl CollisionWorld {
    /// Create an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a solid box.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidBox`] if `bounds` is not well-formed.
    pub fn add_solid(&mut self, bounds: Aabb) -> Result<ColliderId, WorldError> {
        self.insert(bounds, CollisionLayer::SOLID)
    }

    /// Add a platform that only blocks when approached from above.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidBox`] if `bounds` is not well-formed.
    pub fn add_one_way(&mut self, bounds: Aabb) -> Result<ColliderId, WorldError> {
        self.insert(bounds, CollisionLayer::ONE_WAY)
    }

    fn insert(&mut self, bounds: Aabb, layer: CollisionLayer) -> Result<ColliderId, WorldError> {
        if !bounds.is_valid() {
            return Err(WorldError::InvalidBox {
                min: bounds.min,
                max: bounds.max,
            });
        }
        let id = ColliderId::new(self.next_id);
        self.next_id += 1;
        self.colliders.insert(id, Collider { id, bounds, layer });
        debug!(collider = %id, ?layer, "collider added");
        Ok(id)
    }

    /// Remove a collider.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownCollider`] if no collider has this id.
    pub fn remove(&mut self, id: ColliderId) -> Result<Collider, WorldError> {
        let removed = self
            .colliders
            .remove(&id)
            .ok_or(WorldError::UnknownCollider(id))?;
        debug!(collider = %id, "collider removed");
        Ok(removed)
    }

    /// Get a collider by id.
    #[must_use]
    pub fn get(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders.get(&id)
    }

    /// Iterate colliders in id order.
    pub fn colliders(&self) -> impl Iterator<Item = &Collider> {
        self.colliders.values()
    }

    /// Number of colliders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Whether the world has no colliders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Compute a deterministic hash of the geometry.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        crate::hash::hash_world(self)
    }
}

impl WorldQuery for CollisionWorld {
    fn cast_ray(&self, ray: &Ray, mask: CollisionLayer) -> Option<RayHit> {
        let mut best: Option<RayHit> = None;

        for collider in self.colliders.values() {
            if !mask.intersects(collider.layer) {
                continue;
            }
            let distance = if collider.layer.contains(CollisionLayer::ONE_WAY) {
                ray.hits_one_way(&collider.bounds)
            } else {
                ray.intersect_aabb(&collider.bounds)
            };
            // Strict comparison keeps the lowest id on ties
            if let Some(distance) = distance {
                if best.map_or(true, |b| distance < b.distance) {
                    best = Some(RayHit {
                        distance,
                        collider: collider.id,
                    });
                }
            }
        }

        best
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Serializable level layout.
///
/// # Example
///
/// ```
/// use outcrop::WorldConfig;
///
/// let json = r#"{
///     "solids": [{ "min": [-10.0, -1.0], "max": [10.0, 0.0] }],
///     "one_way": [{ "min": [2.0, 2.0], "max": [4.0, 2.25] }],
///     "triggers": []
/// }"#;
/// let config = WorldConfig::from_json(json).unwrap();
/// let (world, triggers) = config.build().unwrap();
/// assert_eq!(world.len(), 2);
/// assert!(triggers.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Solid boxes
    #[serde(default)]
    pub solids: Vec<Aabb>,
    /// Jump-through platforms
    #[serde(default)]
    pub one_way: Vec<Aabb>,
    /// Trigger zones
    #[serde(default)]
    pub triggers: Vec<TriggerZone>,
}

impl WorldConfig {
    /// Parse a layout from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Parse`] if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, WorldError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the collision world and trigger set described by this layout.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidBox`] for the first malformed box.
    pub fn build(&self) -> Result<(CollisionWorld, TriggerSet), WorldError> {
        let mut world = CollisionWorld::new();
        for bounds in &self.solids {
            world.add_solid(*bounds)?;
        }
        for bounds in &self.one_way {
            world.add_one_way(*bounds)?;
        }

        let mut triggers = TriggerSet::new();
        for zone in &self.triggers {
            if !zone.bounds.is_valid() {
                return Err(WorldError::InvalidBox {
                    min: zone.bounds.min,
                    max: zone.bounds.max,
                });
            }
            triggers.add(zone.clone());
        }

        Ok((world, triggers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn floor() -> Aabb {
        Aabb::from_min_max(Vec2::new(-10.0, -1.0), Vec2::new(10.0, 0.0))
    }

    mod editing_tests {
        use super::*;

        #[test]
        fn ids_are_sequential() {
            let mut world = CollisionWorld::new();
            let a = world.add_solid(floor()).unwrap();
            let b = world.add_one_way(floor()).unwrap();
            assert_eq!(a.as_u64(), 0);
            assert_eq!(b.as_u64(), 1);
            assert_eq!(world.len(), 2);
        }

        #[test]
        fn invalid_box_is_rejected() {
            let mut world = CollisionWorld::new();
            let result = world.add_solid(Aabb::from_min_max(Vec2::ONE, Vec2::ZERO));
            assert!(matches!(result, Err(WorldError::InvalidBox { .. })));
            assert!(world.is_empty());
        }

        #[test]
        fn remove_unknown_fails() {
            let mut world = CollisionWorld::new();
            let result = world.remove(ColliderId::new(7));
            assert!(matches!(result, Err(WorldError::UnknownCollider(_))));
        }

        #[test]
        fn removed_collider_no_longer_hit() {
            let mut world = CollisionWorld::new();
            let id = world.add_solid(floor()).unwrap();
            world.remove(id).unwrap();
            let ray = Ray::new(Vec2::new(0.0, 1.0), Vec2::NEG_Y, 5.0);
            assert!(world.cast_ray(&ray, CollisionLayer::SOLID).is_none());
        }
    }

    mod query_tests {
        use super::*;

        #[test]
        fn closest_hit_wins() {
            let mut world = CollisionWorld::new();
            world.add_solid(floor()).unwrap();
            let near = world
                .add_solid(Aabb::from_min_max(Vec2::new(-1.0, 1.0), Vec2::new(1.0, 2.0)))
                .unwrap();
            let ray = Ray::new(Vec2::new(0.0, 5.0), Vec2::NEG_Y, 10.0);
            let hit = world.cast_ray(&ray, CollisionLayer::SOLID).unwrap();
            assert_eq!(hit.collider, near);
            assert!((hit.distance - 3.0).abs() < 1e-6);
        }

        #[test]
        fn ties_resolve_to_lowest_id() {
            let mut world = CollisionWorld::new();
            let first = world.add_solid(floor()).unwrap();
            world.add_solid(floor()).unwrap();
            let ray = Ray::new(Vec2::new(0.0, 1.0), Vec2::NEG_Y, 5.0);
            assert_eq!(world.cast_ray(&ray, CollisionLayer::SOLID).unwrap().collider, first);
        }

        #[test]
        fn one_way_ignored_without_mask() {
            let mut world = CollisionWorld::new();
            world.add_one_way(floor()).unwrap();
            let ray = Ray::new(Vec2::new(0.0, 1.0), Vec2::NEG_Y, 5.0);
            assert!(world.cast_ray(&ray, CollisionLayer::BLOCKING).is_none());
            assert!(world.cast_ray(&ray, CollisionLayer::FLOOR).is_some());
        }

        #[test]
        fn one_way_does_not_block_upward() {
            let mut world = CollisionWorld::new();
            world.add_one_way(floor()).unwrap();
            let ray = Ray::new(Vec2::new(0.0, -3.0), Vec2::Y, 5.0);
            assert!(world.cast_ray(&ray, CollisionLayer::FLOOR).is_none());
        }
    }

    mod config_tests {
        use super::*;

        #[test]
        fn build_rejects_bad_trigger() {
            let config = WorldConfig {
                triggers: vec![TriggerZone::new(
                    "bad",
                    Aabb::from_min_max(Vec2::ONE, Vec2::ZERO),
                )],
                ..Default::default()
            };
            assert!(matches!(config.build(), Err(WorldError::InvalidBox { .. })));
        }

        #[test]
        fn malformed_json_is_parse_error() {
            assert!(matches!(
                WorldConfig::from_json("{ not json"),
                Err(WorldError::Parse(_))
            ));
        }

        #[test]
        fn config_roundtrips() {
            let config = WorldConfig {
                solids: vec![floor()],
                one_way: vec![],
                triggers: vec![TriggerZone::new("goal", floor()).one_shot()],
            };
            let json = serde_json::to_string(&config).unwrap();
            assert_eq!(WorldConfig::from_json(&json).unwrap(), config);
        }
    }
}
