//! Collision layers for filtering ray queries.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Layer membership of a collider, also used as a query mask.
    ///
    /// A ray query with mask `SOLID | ONE_WAY` considers both kinds of
    /// geometry; one-way colliders still only block downward rays (see
    /// [`Ray::hits_one_way`](crate::Ray::hits_one_way)).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CollisionLayer: u8 {
        /// Blocks movement from every direction (floors, walls, ceilings)
        const SOLID = 1 << 0;
        /// Blocks only when approached from above (jump-through platforms)
        const ONE_WAY = 1 << 1;
        /// Never blocks; used for trigger zones
        const TRIGGER = 1 << 2;
    }
}

impl CollisionLayer {
    /// Mask used for horizontal and upward probes.
    pub const BLOCKING: Self = Self::SOLID;

    /// Mask used for downward probes: solid plus one-way geometry.
    pub const FLOOR: Self = Self::SOLID.union(Self::ONE_WAY);
}

impl Default for CollisionLayer {
    fn default() -> Self {
        Self::SOLID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_mask_includes_one_way() {
        assert!(CollisionLayer::FLOOR.contains(CollisionLayer::ONE_WAY));
        assert!(CollisionLayer::FLOOR.contains(CollisionLayer::SOLID));
        assert!(!CollisionLayer::BLOCKING.contains(CollisionLayer::ONE_WAY));
    }

    #[test]
    fn trigger_is_not_blocking() {
        assert!(!CollisionLayer::FLOOR.intersects(CollisionLayer::TRIGGER));
    }

    #[test]
    fn layer_serializes() {
        let json = serde_json::to_string(&CollisionLayer::ONE_WAY).unwrap();
        let back: CollisionLayer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CollisionLayer::ONE_WAY);
    }
}
