//! Sampled curves used by the movement profile.
//!
//! A [`SampledCurve`] is an ordered list of `(x, y)` keys. Evaluation clamps to
//! the first/last value outside the key range and interpolates linearly
//! between neighbouring keys.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when building a curve from keys.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    /// The curve has no keys.
    #[error("curve has no keys")]
    Empty,

    /// A key is NaN or infinite.
    #[error("curve key {index} is not finite")]
    NonFinite {
        /// Index of the offending key
        index: usize,
    },

    /// Keys are not sorted by their `x` value.
    #[error("curve key {index} is out of order (x = {x} after {previous})")]
    Unsorted {
        /// Index of the offending key
        index: usize,
        /// Its `x` value
        x: f32,
        /// The preceding key's `x` value
        previous: f32,
    },
}

/// Piecewise-linear curve over sorted keys.
///
/// # Example
///
/// ```
/// use cliffside_core::curve::SampledCurve;
/// use glam::Vec2;
///
/// let curve = SampledCurve::new(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 2.0)]).unwrap();
/// assert_eq!(curve.evaluate(0.5), 1.0);
/// assert_eq!(curve.evaluate(-1.0), 0.0);
/// assert_eq!(curve.evaluate(3.0), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec2>", into = "Vec<Vec2>")]
pub struct SampledCurve {
    keys: Vec<Vec2>,
}

impl SampledCurve {
    /// Build a curve, checking that keys are non-empty, finite and sorted.
    ///
    /// Equal `x` values are allowed and produce a step.
    ///
    /// # Errors
    ///
    /// Returns a [`CurveError`] describing the first violation.
    pub fn new(keys: Vec<Vec2>) -> Result<Self, CurveError> {
        if keys.is_empty() {
            return Err(CurveError::Empty);
        }
        for (index, key) in keys.iter().enumerate() {
            if !key.is_finite() {
                return Err(CurveError::NonFinite { index });
            }
            if index > 0 && key.x < keys[index - 1].x {
                return Err(CurveError::Unsorted {
                    index,
                    x: key.x,
                    previous: keys[index - 1].x,
                });
            }
        }
        Ok(Self { keys })
    }

    /// Straight line from `(0, from)` to `(1, to)`.
    #[must_use]
    pub fn linear(from: f32, to: f32) -> Self {
        Self {
            keys: vec![Vec2::new(0.0, from), Vec2::new(1.0, to)],
        }
    }

    /// Flat curve returning `value` everywhere.
    #[must_use]
    pub fn constant(value: f32) -> Self {
        Self {
            keys: vec![Vec2::new(0.0, value)],
        }
    }

    /// The keys, in order.
    #[must_use]
    pub fn keys(&self) -> &[Vec2] {
        &self.keys
    }

    /// Smallest `x` of the domain.
    #[must_use]
    pub fn x_min(&self) -> f32 {
        self.keys[0].x
    }

    /// Largest `x` of the domain.
    #[must_use]
    pub fn x_max(&self) -> f32 {
        self.keys[self.keys.len() - 1].x
    }

    /// Evaluate the curve at `x`.
    #[must_use]
    pub fn evaluate(&self, x: f32) -> f32 {
        let first = self.keys[0];
        let last = self.keys[self.keys.len() - 1];
        if x <= first.x {
            return first.y;
        }
        if x >= last.x {
            return last.y;
        }

        // first.x < x < last.x, so 1 <= upper < len
        let upper = self.keys.partition_point(|k| k.x <= x);
        let a = self.keys[upper - 1];
        let b = self.keys[upper];
        let span = b.x - a.x;
        if span <= 0.0 {
            return b.y;
        }
        a.y + (b.y - a.y) * ((x - a.x) / span)
    }
}

impl TryFrom<Vec<Vec2>> for SampledCurve {
    type Error = CurveError;

    fn try_from(keys: Vec<Vec2>) -> Result<Self, Self::Error> {
        Self::new(keys)
    }
}

impl From<SampledCurve> for Vec<Vec2> {
    fn from(curve: SampledCurve) -> Self {
        curve.keys
    }
}
