//! Movement events and observers.
//!
//! The core never calls into rendering, audio or UI. It records what happened
//! during a tick as [`MovementEvent`]s in an [`EventQueue`]; after the tick the
//! controller hands the queue to every registered [`MovementObserver`] in
//! registration order, and the host may also drain it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::body::CollisionFlags;
use crate::machine::StateKind;

/// Something observable that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MovementEvent {
    /// A downward move was blocked.
    Grounded,
    /// Walked off a ledge without jumping.
    Fell,
    /// A jump started. `index` is 0 for the first jump since the last refill.
    Jumped {
        /// Ordinal of the jump
        index: u32,
    },
    /// An axis move was blocked.
    Collision {
        /// Flags after the move
        flags: CollisionFlags,
    },
    /// Damage was applied.
    Hurt,
    /// A dash started.
    Dashed {
        /// Unit dash direction
        direction: Vec2,
    },
    /// A dash was left, for any reason.
    DashEnded,
    /// A dash finished on the ground.
    DashLanded,
    /// One dash charge came back.
    DashRecharged {
        /// Charges after the recharge
        remaining: u32,
    },
    /// Jumped off a wall.
    WallJumped {
        /// Impulse velocity applied
        impulse: Vec2,
    },
    /// The active movement state changed.
    StateChanged {
        /// Previous state
        from: StateKind,
        /// New state
        to: StateKind,
    },
}

/// Events collected during one tick.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<MovementEvent>,
}

impl EventQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event.
    pub fn push(&mut self, event: MovementEvent) {
        self.events.push(event);
    }

    /// Forget every recorded event.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Take every recorded event, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<MovementEvent> {
        std::mem::take(&mut self.events)
    }

    /// Recorded events in order.
    #[must_use]
    pub fn as_slice(&self) -> &[MovementEvent] {
        &self.events
    }

    /// Iterate recorded events in order.
    pub fn iter(&self) -> impl Iterator<Item = &MovementEvent> {
        self.events.iter()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Receives movement events after each tick.
///
/// Observers are fire-and-forget: they cannot influence the simulation.
///
/// Any `FnMut(&MovementEvent) + Send` closure is an observer.
pub trait MovementObserver: Send {
    /// Called once per event, in the order the events were recorded.
    fn on_event(&mut self, event: &MovementEvent);
}

impl<F> MovementObserver for F
where
    F: FnMut(&MovementEvent) + Send,
{
    fn on_event(&mut self, event: &MovementEvent) {
        self(event);
    }
}
