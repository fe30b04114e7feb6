//! Test helpers for common test setup and utilities.
//!
//! This module provides shared fixtures so unit and integration tests build
//! worlds the same way.

use std::num::NonZeroU32;

use bevy_ecs::prelude::{Entity, World};

use crate::clock::{CurrentEvent, Event, SimulationClock};
use crate::dispatcher::Dispatcher;
use crate::ecs::{Driver, Rider};
use crate::monitor::Monitor;
use crate::spatial::Location;
use crate::systems::EventOutcome;

/// Create a world with every resource the event systems read.
pub fn create_test_world() -> World {
    let mut world = World::new();
    world.insert_resource(SimulationClock::default());
    world.insert_resource(Dispatcher::default());
    world.insert_resource(Monitor::default());
    world.insert_resource(EventOutcome::default());
    world
}

/// Spawn an idle driver.
///
/// # Panics
///
/// Panics if `speed` is zero.
pub fn spawn_driver(world: &mut World, id: &str, location: Location, speed: u32) -> Entity {
    let speed = NonZeroU32::new(speed).expect("test drivers need a non-zero speed");
    world.spawn(Driver::new(id, location, speed)).id()
}

/// Spawn a rider in the waiting state.
pub fn spawn_rider(
    world: &mut World,
    id: &str,
    origin: Location,
    destination: Location,
    patience: u64,
) -> Entity {
    world.spawn(Rider::new(id, patience, origin, destination)).id()
}

/// The rider used throughout the walkthrough tests: origin (1,2), destination
/// (5,8), patience 5.
pub fn spawn_bathe(world: &mut World) -> Entity {
    spawn_rider(world, "Bathe", Location::new(1, 2), Location::new(5, 8), 5)
}

/// The driver used throughout the walkthrough tests: at (0,0), speed 1.
pub fn spawn_atom(world: &mut World) -> Entity {
    spawn_driver(world, "Atom", Location::new(0, 0), 1)
}

/// Install `event` as the current event with a fresh outcome buffer.
pub fn set_current_event(world: &mut World, event: Event) {
    world.insert_resource(CurrentEvent(event));
    world.insert_resource(EventOutcome::default());
}

/// Take the outcome buffer left behind by the last schedule run.
///
/// # Panics
///
/// Panics if no outcome buffer is installed.
pub fn take_outcome(world: &mut World) -> EventOutcome {
    world
        .remove_resource::<EventOutcome>()
        .expect("outcome buffer installed")
}

pub fn rider(world: &World, entity: Entity) -> &Rider {
    world.get::<Rider>(entity).expect("rider entity")
}

pub fn driver(world: &World, entity: Entity) -> &Driver {
    world.get::<Driver>(entity).expect("driver entity")
}
