//! Per-tick input and frame timing.
//!
//! Input arrives already resolved from devices: a movement axis and two
//! edge-triggered button presses. Timing is explicit; nothing in the core reads
//! a global clock.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Resolved input for one tick.
///
/// # Example
///
/// ```
/// use cliffside_core::InputFrame;
///
/// let input = InputFrame::moving(1.0).with_jump();
/// assert_eq!(input.move_axis.x, 1.0);
/// assert!(input.jump_pressed);
/// assert!(!input.dash_pressed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InputFrame {
    /// Movement stick, each component in `[-1, 1]`
    pub move_axis: Vec2,
    /// Jump was pressed this tick
    pub jump_pressed: bool,
    /// Dash was pressed this tick
    pub dash_pressed: bool,
}

impl InputFrame {
    /// No input.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// Horizontal input only.
    #[must_use]
    pub fn moving(x: f32) -> Self {
        Self {
            move_axis: Vec2::new(x, 0.0),
            ..Self::default()
        }
    }

    /// Full two-axis input.
    #[must_use]
    pub fn axis(move_axis: Vec2) -> Self {
        Self {
            move_axis,
            ..Self::default()
        }
    }

    /// Same input with a jump press.
    #[must_use]
    pub fn with_jump(mut self) -> Self {
        self.jump_pressed = true;
        self
    }

    /// Same input with a dash press.
    #[must_use]
    pub fn with_dash(mut self) -> Self {
        self.dash_pressed = true;
        self
    }
}

/// Clock reading for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameTime {
    /// Seconds since the controller's clock started, at the end of this tick
    pub now: f32,
    /// Seconds covered by this tick
    pub dt: f32,
}

impl FrameTime {
    /// Create a frame time.
    #[must_use]
    pub const fn new(now: f32, dt: f32) -> Self {
        Self { now, dt }
    }
}

/// Fixed-step clock.
///
/// `now` is computed as `tick * dt` rather than accumulated, so long runs do not
/// drift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameClock {
    dt: f32,
    tick: u64,
}

impl FrameClock {
    /// Clock stepping by `dt` seconds per tick.
    #[must_use]
    pub const fn new(dt: f32) -> Self {
        Self { dt, tick: 0 }
    }

    /// Step size.
    #[must_use]
    pub const fn dt(&self) -> f32 {
        self.dt
    }

    /// Ticks advanced so far.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Advance one tick and return its frame time.
    pub fn advance(&mut self) -> FrameTime {
        self.tick += 1;
        #[allow(clippy::cast_precision_loss)]
        let now = self.tick as f32 * self.dt;
        FrameTime::new(now, self.dt)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(1.0 / 60.0)
    }
}
