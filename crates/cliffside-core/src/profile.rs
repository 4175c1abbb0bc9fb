//! Per-character movement tuning.
//!
//! A [`MovementProfile`] is immutable once validated and is shared between the
//! controller and its states through an `Arc`. Profiles can be authored in
//! JSON; every loader path runs [`MovementProfile::validate`].

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::curve::{CurveError, SampledCurve};

/// Errors raised when a profile is malformed.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// A scalar field is negative or not finite.
    #[error("profile field `{field}` has invalid value {value}: {reason}")]
    InvalidValue {
        /// Field name
        field: &'static str,
        /// Offending value
        value: f32,
        /// What was expected
        reason: &'static str,
    },

    /// One of the curves is malformed.
    #[error("profile curve `{name}` is invalid: {source}")]
    Curve {
        /// Curve field name
        name: &'static str,
        /// Underlying curve error
        #[source]
        source: CurveError,
    },

    /// The JSON document could not be parsed.
    #[error("profile parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Movement tuning for one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementProfile {
    /// Horizontal speed in units per second at full input
    pub move_speed: f32,
    /// Free-fall speed in units per second
    pub gravity: f32,
    /// Jump charges refilled on landing
    pub max_allowed_jumps: u32,
    /// Grace window after walking off a ledge, in seconds
    pub max_coyote_time: f32,
    /// Cumulative vertical offset against time since the jump started
    pub jump_displacement_curve: SampledCurve,
    /// Whether jumping off a wall slide is allowed
    pub can_wall_jump: bool,
    /// Fall speed while sliding down a wall
    pub wall_sliding_speed: f32,
    /// Magnitude of both components of the wall-jump impulse
    pub wall_jump_force: f32,
    /// Per-second exponential decay rate of the wall-jump impulse
    pub wall_jump_impulse_decay: f32,
    /// Dash speed before the acceleration multiplier
    pub dashing_power: f32,
    /// Dash duration in seconds
    pub dashing_time: f32,
    /// Seconds to recharge one dash
    pub dashing_cooldown: f32,
    /// Dash charges
    pub max_allowed_dashes: u32,
    /// Speed multiplier against dash progress in `[0, 1]`
    pub dash_acceleration_curve: SampledCurve,
}

impl Default for MovementProfile {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            gravity: 14.0,
            max_allowed_jumps: 3,
            max_coyote_time: 0.3,
            jump_displacement_curve: default_jump_curve(),
            can_wall_jump: true,
            wall_sliding_speed: 2.0,
            wall_jump_force: 6.0,
            wall_jump_impulse_decay: 8.0,
            dashing_power: 20.0,
            dashing_time: 0.2,
            dashing_cooldown: 1.0,
            max_allowed_dashes: 1,
            dash_acceleration_curve: default_dash_curve(),
        }
    }
}

/// Rise of 2.5 units over 0.4 seconds, decelerating toward the apex.
fn default_jump_curve() -> SampledCurve {
    SampledCurve::new(vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(0.1, 1.1),
        Vec2::new(0.2, 1.9),
        Vec2::new(0.3, 2.35),
        Vec2::new(0.4, 2.5),
    ])
    .unwrap_or_else(|_| SampledCurve::linear(0.0, 2.5))
}

/// Ease-in-out sampled at quarter steps.
fn default_dash_curve() -> SampledCurve {
    SampledCurve::new(vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(0.25, 0.156),
        Vec2::new(0.5, 0.5),
        Vec2::new(0.75, 0.844),
        Vec2::new(1.0, 1.0),
    ])
    .unwrap_or_else(|_| SampledCurve::linear(0.0, 1.0))
}

impl MovementProfile {
    /// Parse and validate a profile from JSON. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Parse`] on malformed JSON (including invalid
    /// curves) and the validation errors of [`MovementProfile::validate`].
    ///
    /// # Example
    ///
    /// ```
    /// use cliffside_core::MovementProfile;
    ///
    /// let profile = MovementProfile::from_json(r#"{ "move_speed": 7.5, "max_allowed_dashes": 2 }"#).unwrap();
    /// assert_eq!(profile.move_speed, 7.5);
    /// assert_eq!(profile.max_allowed_dashes, 2);
    /// assert_eq!(profile.gravity, MovementProfile::default().gravity);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        let profile: Self = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Serialize this profile to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Parse`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ProfileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every scalar and curve.
    ///
    /// # Errors
    ///
    /// Returns the first [`ProfileError`] found.
    pub fn validate(&self) -> Result<(), ProfileError> {
        let non_negative = [
            ("move_speed", self.move_speed),
            ("gravity", self.gravity),
            ("max_coyote_time", self.max_coyote_time),
            ("wall_sliding_speed", self.wall_sliding_speed),
            ("wall_jump_force", self.wall_jump_force),
            ("wall_jump_impulse_decay", self.wall_jump_impulse_decay),
            ("dashing_power", self.dashing_power),
            ("dashing_cooldown", self.dashing_cooldown),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ProfileError::InvalidValue {
                    field,
                    value,
                    reason: "expected a finite, non-negative number",
                });
            }
        }

        if !self.dashing_time.is_finite() || self.dashing_time <= 0.0 {
            return Err(ProfileError::InvalidValue {
                field: "dashing_time",
                value: self.dashing_time,
                reason: "expected a finite, positive number",
            });
        }

        // Curves built through serde or `SampledCurve::new` are already checked;
        // re-run the check so hand-assembled profiles are covered too.
        for (name, curve) in [
            ("jump_displacement_curve", &self.jump_displacement_curve),
            ("dash_acceleration_curve", &self.dash_acceleration_curve),
        ] {
            SampledCurve::new(curve.keys().to_vec())
                .map_err(|source| ProfileError::Curve { name, source })?;
        }

        Ok(())
    }

    /// Length of the jump arc in seconds.
    #[must_use]
    pub fn jump_duration(&self) -> f32 {
        self.jump_displacement_curve.x_max()
    }

    /// Height reached by a full single jump.
    #[must_use]
    pub fn jump_height(&self) -> f32 {
        self.jump_displacement_curve
            .evaluate(self.jump_duration())
            - self.jump_displacement_curve.evaluate(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_valid() {
        MovementProfile::default().validate().unwrap();
    }

    #[test]
    fn default_jump_arc() {
        let profile = MovementProfile::default();
        assert!((profile.jump_duration() - 0.4).abs() < 1e-6);
        assert!((profile.jump_height() - 2.5).abs() < 1e-6);
    }

    #[test]
    fn negative_speed_is_rejected() {
        let profile = MovementProfile {
            move_speed: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            profile.validate(),
            Err(ProfileError::InvalidValue {
                field: "move_speed",
                ..
            })
        ));
    }

    #[test]
    fn zero_dashing_time_is_rejected() {
        let profile = MovementProfile {
            dashing_time: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            profile.validate(),
            Err(ProfileError::InvalidValue {
                field: "dashing_time",
                ..
            })
        ));
    }

    #[test]
    fn nan_gravity_is_rejected() {
        let profile = MovementProfile {
            gravity: f32::NAN,
            ..Default::default()
        };
        assert!(profile.validate().is_err());
    }

    #[test]
    fn empty_curve_in_json_fails_at_load() {
        let result = MovementProfile::from_json(r#"{ "jump_displacement_curve": [] }"#);
        assert!(matches!(result, Err(ProfileError::Parse(_))));
    }

    #[test]
    fn invalid_value_in_json_fails_at_load() {
        let result = MovementProfile::from_json(r#"{ "wall_sliding_speed": -2.0 }"#);
        assert!(matches!(result, Err(ProfileError::InvalidValue { .. })));
    }

    #[test]
    fn json_roundtrip() {
        let profile = MovementProfile {
            can_wall_jump: false,
            max_allowed_jumps: 1,
            ..Default::default()
        };
        let json = profile.to_json().unwrap();
        assert_eq!(MovementProfile::from_json(&json).unwrap(), profile);
    }
}
