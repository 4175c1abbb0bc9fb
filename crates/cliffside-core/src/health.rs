//! Hit points with respawn-on-death semantics.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of applying damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageOutcome {
    /// Survived with this many hit points left
    Hurt {
        /// Hit points after the damage
        remaining: u32,
    },
    /// Hit points ran out; health was reset to the maximum
    Died,
}

/// Hit points of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    max: u32,
    current: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Health {
    /// Full health with `max` hit points.
    #[must_use]
    pub const fn new(max: u32) -> Self {
        Self { max, current: max }
    }

    /// Maximum hit points.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Current hit points.
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    /// Remove `amount` hit points. Running out resets to full.
    pub fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        self.current = self.current.saturating_sub(amount);
        if self.current == 0 {
            debug!(max = self.max, "died, health reset");
            self.current = self.max;
            DamageOutcome::Died
        } else {
            DamageOutcome::Hurt {
                remaining: self.current,
            }
        }
    }
}
