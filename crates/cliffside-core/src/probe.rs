//! Multi-ray collision probe.
//!
//! The probe casts a fan of parallel rays out of one edge of the body's box
//! and reports whether any of them hits geometry. It is the only place the
//! core talks to the [`WorldQuery`] collaborator.
//!
//! ```text
//!            Above
//!        ^   ^   ^   ^
//!      +---------------+
//!  <-  |               |  ->
//!  <-  |     body      |  ->   Right
//!  <-  |               |  ->
//!      +---------------+
//!        v   v   v   v
//!            Below (also hits one-way platforms)
//! ```

use std::fmt;
use std::sync::Arc;

use glam::Vec2;
use outcrop::{Aabb, CollisionLayer, Ray, WorldQuery};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest number of rays per edge.
pub const MAX_ACCURACY: u32 = 10;

/// Largest skin width.
pub const MAX_SKIN_WIDTH: f32 = 0.1;

/// Multiple of the skin width used by states to detect an adjacent wall.
pub const WALL_CHECK_SKIN_MULTIPLIER: f32 = 4.0;

/// Errors raised when a probe is misconfigured.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProbeError {
    /// Ray count out of `1..=MAX_ACCURACY`.
    #[error("probe accuracy {0} out of range 1..={MAX_ACCURACY}")]
    Accuracy(u32),

    /// Skin width out of `[0, MAX_SKIN_WIDTH]`.
    #[error("probe skin width {0} out of range [0, {MAX_SKIN_WIDTH}]")]
    SkinWidth(f32),
}

/// One of the four axis directions a probe can be cast in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProbeDirection {
    /// +x
    Right,
    /// +y
    Above,
    /// -x
    Left,
    /// -y
    Below,
}

impl ProbeDirection {
    /// Unit vector for this direction.
    #[must_use]
    pub const fn vector(self) -> Vec2 {
        match self {
            Self::Right => Vec2::X,
            Self::Above => Vec2::Y,
            Self::Left => Vec2::NEG_X,
            Self::Below => Vec2::NEG_Y,
        }
    }

    /// Layers that block a probe in this direction.
    #[must_use]
    pub const fn mask(self) -> CollisionLayer {
        match self {
            Self::Below => CollisionLayer::FLOOR,
            _ => CollisionLayer::BLOCKING,
        }
    }
}

impl fmt::Display for ProbeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Right => write!(f, "Right"),
            Self::Above => write!(f, "Above"),
            Self::Left => write!(f, "Left"),
            Self::Below => write!(f, "Below"),
        }
    }
}

/// Ray fan settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Rays per edge (`1..=10`)
    pub accuracy: u32,
    /// Outward offset of every ray origin, and inset of the outermost rays
    pub skin_width: f32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            accuracy: 4,
            skin_width: 0.02,
        }
    }
}

impl ProbeConfig {
    /// Check ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] if `accuracy` or `skin_width` is out of range.
    pub fn validate(&self) -> Result<(), ProbeError> {
        if self.accuracy == 0 || self.accuracy > MAX_ACCURACY {
            return Err(ProbeError::Accuracy(self.accuracy));
        }
        if !(0.0..=MAX_SKIN_WIDTH).contains(&self.skin_width) {
            return Err(ProbeError::SkinWidth(self.skin_width));
        }
        Ok(())
    }

    /// Probe distance used to detect a wall right next to the body.
    #[must_use]
    pub fn wall_check_distance(&self) -> f32 {
        self.skin_width * WALL_CHECK_SKIN_MULTIPLIER
    }
}

/// Casts ray fans from a box against a world.
#[derive(Clone)]
pub struct CollisionProbe {
    world: Arc<dyn WorldQuery>,
    config: ProbeConfig,
}

impl fmt::Debug for CollisionProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollisionProbe")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CollisionProbe {
    /// Create a probe against `world`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] if `config` is out of range.
    pub fn new(world: Arc<dyn WorldQuery>, config: ProbeConfig) -> Result<Self, ProbeError> {
        config.validate()?;
        Ok(Self { world, config })
    }

    /// The probe settings.
    #[must_use]
    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Ray origins for a probe out of `bounds` toward `direction`.
    ///
    /// With one ray the origin is the edge midpoint. Otherwise rays are spread
    /// evenly between the edge corners, each corner pulled inward by the skin
    /// width. Every origin is then pushed outward by the skin width.
    #[must_use]
    pub fn ray_origins(&self, bounds: &Aabb, direction: ProbeDirection) -> Vec<Vec2> {
        let skin = self.config.skin_width;
        let outward = direction.vector() * skin;

        if self.config.accuracy == 1 {
            let half = bounds.half_extents();
            let edge_mid = bounds.center() + direction.vector() * half;
            return vec![edge_mid + outward];
        }

        let (corner_a, corner_b) = match direction {
            ProbeDirection::Below => (
                Vec2::new(bounds.min.x + skin, bounds.min.y),
                Vec2::new(bounds.max.x - skin, bounds.min.y),
            ),
            ProbeDirection::Above => (
                Vec2::new(bounds.min.x + skin, bounds.max.y),
                Vec2::new(bounds.max.x - skin, bounds.max.y),
            ),
            ProbeDirection::Left => (
                Vec2::new(bounds.min.x, bounds.min.y + skin),
                Vec2::new(bounds.min.x, bounds.max.y - skin),
            ),
            ProbeDirection::Right => (
                Vec2::new(bounds.max.x, bounds.min.y + skin),
                Vec2::new(bounds.max.x, bounds.max.y - skin),
            ),
        };

        #[allow(clippy::cast_precision_loss)]
        let last = (self.config.accuracy - 1) as f32;
        (0..self.config.accuracy)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let ratio = i as f32 / last;
                corner_a.lerp(corner_b, ratio) + outward
            })
            .collect()
    }

    /// Whether any ray of the fan hits geometry within `distance`.
    #[must_use]
    pub fn probe(&self, bounds: &Aabb, direction: ProbeDirection, distance: f32) -> bool {
        let mask = direction.mask();
        self.ray_origins(bounds, direction).into_iter().any(|origin| {
            let ray = Ray::new(origin, direction.vector(), distance);
            self.world.cast_ray(&ray, mask).is_some()
        })
    }
}
