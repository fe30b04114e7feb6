//! Scenario setup: spawn riders and drivers and produce the initial events.
//!
//! Scenarios come either from an event file (one request per line) or from
//! a seeded random generator over a square grid.

mod build;
mod params;
mod parse;

use std::collections::HashMap;
use std::num::NonZeroU32;

use bevy_ecs::prelude::{Entity, Resource, World};
use thiserror::Error;

use crate::ecs::{Driver, Rider};
use crate::spatial::{Location, LocationParseError};

pub use build::build_scenario;
pub use params::ScenarioParams;
pub use parse::{load_events, parse_event_line, EventRecord};

/// Errors raised while loading a scenario. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: unknown event type `{event_type}`")]
    UnknownEventType { line: usize, event_type: String },
    #[error("line {line}: invalid {field} `{value}`")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("line {line}: {source}")]
    InvalidLocation {
        line: usize,
        #[source]
        source: LocationParseError,
    },
    #[error("line {line}: driver `{id}` has zero speed")]
    ZeroSpeed { line: usize, id: String },
    #[error("{kind} `{id}` is defined more than once")]
    DuplicateActor { kind: &'static str, id: String },
}

/// String id to entity lookup for every actor spawned by a scenario.
#[derive(Debug, Default, Resource)]
pub struct ActorIndex {
    drivers: HashMap<String, Entity>,
    riders: HashMap<String, Entity>,
}

impl ActorIndex {
    pub fn driver(&self, id: &str) -> Option<Entity> {
        self.drivers.get(id).copied()
    }

    pub fn rider(&self, id: &str) -> Option<Entity> {
        self.riders.get(id).copied()
    }

    pub fn driver_count(&self) -> usize {
        self.drivers.len()
    }

    pub fn rider_count(&self) -> usize {
        self.riders.len()
    }
}

/// Spawns a driver and indexes it by id.
pub fn spawn_driver(
    world: &mut World,
    id: &str,
    location: Location,
    speed: NonZeroU32,
) -> Result<Entity, ScenarioError> {
    world.init_resource::<ActorIndex>();
    if world.resource::<ActorIndex>().drivers.contains_key(id) {
        return Err(ScenarioError::DuplicateActor {
            kind: "driver",
            id: id.to_string(),
        });
    }
    let entity = world.spawn(Driver::new(id, location, speed)).id();
    world
        .resource_mut::<ActorIndex>()
        .drivers
        .insert(id.to_string(), entity);
    Ok(entity)
}

/// Spawns a rider and indexes it by id.
pub fn spawn_rider(
    world: &mut World,
    id: &str,
    origin: Location,
    destination: Location,
    patience: u64,
) -> Result<Entity, ScenarioError> {
    world.init_resource::<ActorIndex>();
    if world.resource::<ActorIndex>().riders.contains_key(id) {
        return Err(ScenarioError::DuplicateActor {
            kind: "rider",
            id: id.to_string(),
        });
    }
    let entity = world
        .spawn(Rider::new(id, patience, origin, destination))
        .id();
    world
        .resource_mut::<ActorIndex>()
        .riders
        .insert(id.to_string(), entity);
    Ok(entity)
}
