//! Simulation runner: advances the clock and routes events into the ECS.
//!
//! Clock progression and event routing happen here, outside systems. Each step
//! pops the next event from [SimulationClock], inserts it as [CurrentEvent]
//! with a fresh [EventOutcome], runs the schedule, then feeds the emitted
//! events back into the clock. A fault raised by a system halts the run.

use bevy_ecs::prelude::{Res, Schedule, World};
use bevy_ecs::schedule::{ExecutorKind, IntoSystemConfigs};
use tracing::{debug, info};

use crate::clock::{CurrentEvent, Event, EventKind, SimulationClock};
use crate::dispatcher::Dispatcher;
use crate::error::SimError;
use crate::monitor::{Monitor, Report};
use crate::profiling::EventMetrics;
use crate::systems::{
    cancellation::cancellation_system, driver_request::driver_request_system,
    dropoff::dropoff_system, pickup::pickup_system, rider_request::rider_request_system,
    EventOutcome,
};

// Condition functions for each event kind
fn is_rider_request(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| matches!(e.0.kind, EventKind::RiderRequest { .. }))
        .unwrap_or(false)
}

fn is_driver_request(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| matches!(e.0.kind, EventKind::DriverRequest { .. }))
        .unwrap_or(false)
}

fn is_cancellation(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| matches!(e.0.kind, EventKind::Cancellation { .. }))
        .unwrap_or(false)
}

fn is_pickup(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| matches!(e.0.kind, EventKind::Pickup { .. }))
        .unwrap_or(false)
}

fn is_dropoff(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| matches!(e.0.kind, EventKind::Dropoff { .. }))
        .unwrap_or(false)
}

/// Builds the simulation schedule: one system per event kind, each gated on
/// the current event. Runs single-threaded so transitions never interleave.
pub fn simulation_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems((
        rider_request_system.run_if(is_rider_request),
        driver_request_system.run_if(is_driver_request),
        cancellation_system.run_if(is_cancellation),
        pickup_system.run_if(is_pickup),
        dropoff_system.run_if(is_dropoff),
    ));
    schedule
}

/// Inserts the resources every event system reads, keeping any already present.
pub fn init_simulation_resources(world: &mut World) {
    world.init_resource::<SimulationClock>();
    world.init_resource::<Dispatcher>();
    world.init_resource::<Monitor>();
}

/// Applies one event's transition and returns the events it produced,
/// without touching the clock.
pub fn apply_event(
    world: &mut World,
    schedule: &mut Schedule,
    event: Event,
) -> Result<Vec<Event>, SimError> {
    world.insert_resource(CurrentEvent(event));
    world.insert_resource(EventOutcome::default());
    schedule.run(world);
    world.remove_resource::<CurrentEvent>();

    let outcome = world.remove_resource::<EventOutcome>().unwrap_or_default();
    match outcome.fault {
        Some(err) => Err(err),
        None => Ok(outcome.emitted),
    }
}

/// Runs one simulation step: pops the next event, applies it and schedules
/// whatever it emitted. Returns `Ok(false)` once the clock is empty.
pub fn run_next_event(world: &mut World, schedule: &mut Schedule) -> Result<bool, SimError> {
    let event = match world.resource_mut::<SimulationClock>().pop_next() {
        Some(e) => e,
        None => return Ok(false),
    };
    debug!(
        timestamp = event.timestamp,
        kind = event.kind.name(),
        event = %event.describe(world),
        "processing event"
    );

    // Track event metrics if EventMetrics resource exists
    if let Some(mut metrics) = world.get_resource_mut::<EventMetrics>() {
        metrics.record_event(&event.kind);
    }

    let emitted = apply_event(world, schedule, event)?;
    let mut clock = world.resource_mut::<SimulationClock>();
    for next in emitted {
        clock.schedule(next);
    }
    Ok(true)
}

/// Runs simulation steps until the event queue is empty or `max_steps` is reached.
/// Returns the number of steps executed.
pub fn run_until_empty(
    world: &mut World,
    schedule: &mut Schedule,
    max_steps: usize,
) -> Result<usize, SimError> {
    let mut steps = 0;
    while steps < max_steps && run_next_event(world, schedule)? {
        steps += 1;
    }
    Ok(steps)
}

/// A world plus its schedule: the whole simulation.
pub struct Simulation {
    world: World,
    schedule: Schedule,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    pub fn new() -> Self {
        let mut world = World::new();
        init_simulation_resources(&mut world);
        Self {
            world,
            schedule: simulation_schedule(),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Entities referenced by initial events are spawned through this.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn monitor(&self) -> &Monitor {
        self.world.resource::<Monitor>()
    }

    /// Schedules `initial_events`, drains the queue and returns the report.
    pub fn run(&mut self, initial_events: Vec<Event>) -> Result<Report, SimError> {
        self.run_with_limit(initial_events, usize::MAX)
    }

    /// Like [`Simulation::run`] but stops after `max_steps` events.
    pub fn run_with_limit(
        &mut self,
        initial_events: Vec<Event>,
        max_steps: usize,
    ) -> Result<Report, SimError> {
        info!(initial_events = initial_events.len(), "simulation started");
        {
            let mut clock = self.world.resource_mut::<SimulationClock>();
            for event in initial_events {
                clock.schedule(event);
            }
        }
        let steps = run_until_empty(&mut self.world, &mut self.schedule, max_steps)?;
        let clock = self.world.resource::<SimulationClock>();
        info!(steps, now = clock.now(), pending = clock.pending(), "simulation finished");
        Ok(self.monitor().report())
    }
}
