//! Trigger zones: non-blocking regions that report enter/exit edges.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Aabb;

/// A named region that reports when a box starts or stops overlapping it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerZone {
    /// Name reported in events
    pub name: String,
    /// World-space bounds
    pub bounds: Aabb,
    /// Fire each edge (enter, exit) at most once
    #[serde(default)]
    pub one_shot: bool,
}

impl TriggerZone {
    /// Create a repeating trigger zone.
    #[must_use]
    pub fn new(name: impl Into<String>, bounds: Aabb) -> Self {
        Self {
            name: name.into(),
            bounds,
            one_shot: false,
        }
    }

    /// Mark this zone as one-shot.
    #[must_use]
    pub fn one_shot(mut self) -> Self {
        self.one_shot = true;
        self
    }
}

/// Edge reported by [`TriggerSet::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerEvent {
    /// The box started overlapping the named zone.
    Entered(String),
    /// The box stopped overlapping the named zone.
    Exited(String),
}

#[derive(Debug, Clone, Default)]
struct ZoneState {
    inside: bool,
    entered_fired: bool,
    exited_fired: bool,
}

/// Trigger zones plus the overlap state of one tracked box.
#[derive(Debug, Clone, Default)]
pub struct TriggerSet {
    zones: Vec<TriggerZone>,
    states: Vec<ZoneState>,
}

impl TriggerSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a zone. Zones are evaluated in insertion order.
    pub fn add(&mut self, zone: TriggerZone) {
        self.zones.push(zone);
        self.states.push(ZoneState::default());
    }

    /// Number of zones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Whether the set has no zones.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Update overlap state for `body` and return the edges that fired.
    pub fn update(&mut self, body: &Aabb) -> Vec<TriggerEvent> {
        let mut events = Vec::new();

        for (zone, state) in self.zones.iter().zip(self.states.iter_mut()) {
            let inside = zone.bounds.overlaps(body);
            if inside == state.inside {
                continue;
            }
            state.inside = inside;

            if inside {
                if zone.one_shot && state.entered_fired {
                    continue;
                }
                state.entered_fired = true;
                debug!(zone = %zone.name, "trigger entered");
                events.push(TriggerEvent::Entered(zone.name.clone()));
            } else {
                if zone.one_shot && state.exited_fired {
                    continue;
                }
                state.exited_fired = true;
                debug!(zone = %zone.name, "trigger exited");
                events.push(TriggerEvent::Exited(zone.name.clone()));
            }
        }

        events
    }
}
