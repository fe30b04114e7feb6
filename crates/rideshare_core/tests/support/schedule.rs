#![allow(dead_code)]

use bevy_ecs::prelude::World;
use bevy_ecs::schedule::Schedule;
use rideshare_core::clock::Event;
use rideshare_core::runner::{apply_event, run_next_event, run_until_empty, simulation_schedule};
use rideshare_core::SimError;

/// Helper that owns a reusable `Schedule` so tests can apply single events,
/// step, or drain the event queue.
pub struct ScheduleRunner {
    schedule: Schedule,
}

impl Default for ScheduleRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleRunner {
    /// Create a runner with the default simulation schedule.
    pub fn new() -> Self {
        Self {
            schedule: simulation_schedule(),
        }
    }

    /// Apply one event directly, returning what it emitted.
    pub fn apply(&mut self, world: &mut World, event: Event) -> Result<Vec<Event>, SimError> {
        apply_event(world, &mut self.schedule, event)
    }

    /// Apply one event that must succeed.
    pub fn apply_ok(&mut self, world: &mut World, event: Event) -> Vec<Event> {
        self.apply(world, event).expect("transition succeeds")
    }

    /// Run a single queued event (returns `true` if an event was processed).
    pub fn run_one(&mut self, world: &mut World) -> bool {
        run_next_event(world, &mut self.schedule).expect("step succeeds")
    }

    /// Drive the simulation until the event queue is empty.
    pub fn run_full(&mut self, world: &mut World) -> Result<usize, SimError> {
        run_until_empty(world, &mut self.schedule, usize::MAX)
    }
}
