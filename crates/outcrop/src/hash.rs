//! State hashing for determinism verification.
//!
//! Two worlds built from the same operations must produce identical hashes.
//! Floats are hashed by bit pattern.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::world::CollisionWorld;
use crate::Aabb;

/// Compute a deterministic hash of the world's geometry.
///
/// Covers every collider's id, layer and bounds, in id order.
#[must_use]
pub fn hash_world(world: &CollisionWorld) -> u64 {
    let mut hasher = DefaultHasher::new();

    world.len().hash(&mut hasher);
    for collider in world.colliders() {
        collider.id.hash(&mut hasher);
        collider.layer.bits().hash(&mut hasher);
        hash_aabb(&collider.bounds, &mut hasher);
    }

    hasher.finish()
}

/// Hash a box as raw float bits.
pub fn hash_aabb<H: Hasher>(aabb: &Aabb, hasher: &mut H) {
    aabb.min.x.to_bits().hash(hasher);
    aabb.min.y.to_bits().hash(hasher);
    aabb.max.x.to_bits().hash(hasher);
    aabb.max.y.to_bits().hash(hasher);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn build(offset: f32) -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world
            .add_solid(Aabb::from_min_max(Vec2::new(-5.0, -1.0), Vec2::new(5.0 + offset, 0.0)))
            .unwrap();
        world
            .add_one_way(Aabb::from_min_max(Vec2::new(0.0, 2.0), Vec2::new(2.0, 2.2)))
            .unwrap();
        world
    }

    #[test]
    fn identical_worlds_hash_equal() {
        assert_eq!(hash_world(&build(0.0)), hash_world(&build(0.0)));
    }

    #[test]
    fn different_geometry_hashes_differ() {
        assert_ne!(hash_world(&build(0.0)), hash_world(&build(0.5)));
    }

    #[test]
    fn empty_world_hash_is_stable() {
        assert_eq!(
            hash_world(&CollisionWorld::new()),
            hash_world(&CollisionWorld::new())
        );
    }
}
