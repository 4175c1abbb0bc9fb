//! Test helpers for building levels and driving a controller tick by tick.

use std::sync::{Arc, Mutex, RwLock};

use glam::Vec2;
use outcrop::{Aabb, CollisionLayer, CollisionWorld, Ray, RayHit, WorldQuery};

use crate::controller::Controller;
use crate::events::MovementEvent;
use crate::input::{FrameClock, InputFrame};
use crate::profile::MovementProfile;

/// Fixed step used by every scenario. A power of two, so timestamps are exact.
pub const DT: f32 = 1.0 / 64.0;

/// Spawn point that settles on [`floor`] within a few ticks.
pub const SPAWN: Vec2 = Vec2::new(0.0, 1.5);

/// Install a test-writer subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Level Builders
// =============================================================================

/// Wide solid floor with its top face at y = 0.
pub fn floor() -> Aabb {
    Aabb::from_min_max(Vec2::new(-50.0, -1.0), Vec2::new(50.0, 0.0))
}

/// A world holding only [`floor`].
pub fn floor_world() -> CollisionWorld {
    world_of(&[floor()], &[])
}

/// A world from solid and one-way boxes.
pub fn world_of(solids: &[Aabb], one_way: &[Aabb]) -> CollisionWorld {
    let mut world = CollisionWorld::new();
    for bounds in solids {
        world.add_solid(*bounds).unwrap();
    }
    for bounds in one_way {
        world.add_one_way(*bounds).unwrap();
    }
    world
}

/// World that tests can edit while a controller holds it.
#[derive(Debug, Default)]
pub struct EditableWorld(RwLock<CollisionWorld>);

impl EditableWorld {
    /// Wrap a world.
    pub fn new(world: CollisionWorld) -> Self {
        Self(RwLock::new(world))
    }

    /// Edit the geometry.
    pub fn edit<R>(&self, f: impl FnOnce(&mut CollisionWorld) -> R) -> R {
        let mut world = self.0.write().unwrap();
        f(&mut *world)
    }
}

impl WorldQuery for EditableWorld {
    fn cast_ray(&self, ray: &Ray, mask: CollisionLayer) -> Option<RayHit> {
        self.0.read().unwrap().cast_ray(ray, mask)
    }
}

// =============================================================================
// Harness
// =============================================================================

/// A controller plus its fixed-step clock.
pub struct Harness {
    /// The controller under test
    pub controller: Controller,
    /// Clock producing frame times
    pub clock: FrameClock,
}

impl Harness {
    /// Controller with `profile` spawned at `position` in `world`.
    pub fn new(world: Arc<dyn WorldQuery>, profile: MovementProfile, position: Vec2) -> Self {
        init_tracing();
        let controller = Controller::builder()
            .world(world)
            .profile(profile)
            .position(position)
            .build()
            .unwrap();
        Self {
            controller,
            clock: FrameClock::new(DT),
        }
    }

    /// Stock profile spawned at [`SPAWN`] above [`floor`].
    pub fn on_floor() -> Self {
        Self::with_profile_on_floor(MovementProfile::default())
    }

    /// Custom profile spawned at [`SPAWN`] above [`floor`].
    pub fn with_profile_on_floor(profile: MovementProfile) -> Self {
        Self::new(Arc::new(floor_world()), profile, SPAWN)
    }

    /// Advance one tick and return its events.
    pub fn step(&mut self, input: InputFrame) -> Vec<MovementEvent> {
        let time = self.clock.advance();
        self.controller.tick(&input, time).to_vec()
    }

    /// Advance `ticks` ticks with the same input, returning every event.
    pub fn run(&mut self, input: InputFrame, ticks: usize) -> Vec<MovementEvent> {
        let mut events = Vec::new();
        for _ in 0..ticks {
            events.extend(self.step(input));
        }
        events
    }

    /// Idle until grounded.
    ///
    /// # Panics
    ///
    /// Panics if the body does not land within one second.
    pub fn settle(&mut self) {
        for _ in 0..64 {
            self.step(InputFrame::idle());
            if self.controller.state().is_grounded {
                return;
            }
        }
        panic!("body never landed, at {:?}", self.controller.position());
    }

    /// Current time on the harness clock.
    pub fn now(&self) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let now = self.clock.tick() as f32 * DT;
        now
    }
}

/// Observer that records every event into a shared log, tagged with `tag`.
pub fn recording_observer(
    log: &Arc<Mutex<Vec<(usize, MovementEvent)>>>,
    tag: usize,
) -> impl FnMut(&MovementEvent) + Send + 'static {
    let log = Arc::clone(log);
    move |event: &MovementEvent| log.lock().unwrap().push((tag, *event))
}

/// Count events matching `pred`.
pub fn count(events: &[MovementEvent], pred: impl Fn(&MovementEvent) -> bool) -> usize {
    events.iter().filter(|e| pred(*e)).count()
}
