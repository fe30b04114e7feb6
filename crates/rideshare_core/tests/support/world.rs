#![allow(dead_code)]

use std::num::NonZeroU32;

use bevy_ecs::prelude::{Entity, World};
use rideshare_core::clock::SimulationClock;
use rideshare_core::dispatcher::Dispatcher;
use rideshare_core::ecs::{Driver, Rider};
use rideshare_core::monitor::Monitor;
use rideshare_core::runner::init_simulation_resources;
use rideshare_core::scenario::{spawn_driver, spawn_rider};
use rideshare_core::spatial::Location;

/// Fresh world with the clock, dispatcher and monitor installed.
pub fn test_world() -> World {
    let mut world = World::new();
    init_simulation_resources(&mut world);
    world
}

/// Builder for rider fixtures.
#[derive(Clone, Debug)]
pub struct RiderBuilder {
    id: String,
    origin: Location,
    destination: Location,
    patience: u64,
}

impl RiderBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            origin: Location::new(0, 0),
            destination: Location::new(1, 1),
            patience: 10,
        }
    }

    pub fn origin(mut self, row: i32, column: i32) -> Self {
        self.origin = Location::new(row, column);
        self
    }

    pub fn destination(mut self, row: i32, column: i32) -> Self {
        self.destination = Location::new(row, column);
        self
    }

    pub fn patience(mut self, patience: u64) -> Self {
        self.patience = patience;
        self
    }

    pub fn spawn(self, world: &mut World) -> Entity {
        spawn_rider(world, &self.id, self.origin, self.destination, self.patience)
            .expect("unique rider id")
    }
}

/// Builder for driver fixtures.
#[derive(Clone, Debug)]
pub struct DriverBuilder {
    id: String,
    location: Location,
    speed: u32,
}

impl DriverBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            location: Location::new(0, 0),
            speed: 1,
        }
    }

    pub fn at(mut self, row: i32, column: i32) -> Self {
        self.location = Location::new(row, column);
        self
    }

    pub fn speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }

    pub fn spawn(self, world: &mut World) -> Entity {
        let speed = NonZeroU32::new(self.speed).expect("non-zero speed");
        spawn_driver(world, &self.id, self.location, speed).expect("unique driver id")
    }
}

pub fn rider(world: &World, entity: Entity) -> &Rider {
    world.get::<Rider>(entity).expect("rider entity")
}

pub fn driver(world: &World, entity: Entity) -> &Driver {
    world.get::<Driver>(entity).expect("driver entity")
}

pub fn dispatcher(world: &World) -> &Dispatcher {
    world.resource::<Dispatcher>()
}

pub fn monitor(world: &World) -> &Monitor {
    world.resource::<Monitor>()
}

pub fn clock(world: &World) -> &SimulationClock {
    world.resource::<SimulationClock>()
}
