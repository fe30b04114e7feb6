//! Event-file format.
//!
//! ```text
//! # comments and blank lines are skipped
//! 0 RiderRequest Bathe 1,2 5,8 5
//! 1 DriverRequest Atom 0,0 1
//! ```
//!
//! Driver lines are `<t> DriverRequest <id> <row,col> <speed>`; rider lines are
//! `<t> RiderRequest <id> <origin> <destination> <patience>`.

use std::collections::HashSet;
use std::num::NonZeroU32;
use std::str::FromStr;

use bevy_ecs::prelude::World;
use tracing::debug;

use crate::clock::Event;
use crate::scenario::{spawn_driver, spawn_rider, ActorIndex, ScenarioError};
use crate::spatial::Location;

/// One parsed line of an event file, before anything is spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventRecord {
    DriverRequest {
        timestamp: u64,
        id: String,
        location: Location,
        speed: NonZeroU32,
    },
    RiderRequest {
        timestamp: u64,
        id: String,
        origin: Location,
        destination: Location,
        patience: u64,
    },
}

fn number<T: FromStr>(line: usize, field: &'static str, value: &str) -> Result<T, ScenarioError> {
    value.parse().map_err(|_| ScenarioError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}

fn location(line: usize, value: &str) -> Result<Location, ScenarioError> {
    value
        .parse()
        .map_err(|source| ScenarioError::InvalidLocation { line, source })
}

fn expect_fields(line: usize, tokens: &[&str], expected: usize) -> Result<(), ScenarioError> {
    if tokens.len() == expected {
        Ok(())
    } else {
        Err(ScenarioError::FieldCount {
            line,
            expected,
            found: tokens.len(),
        })
    }
}

/// Parses one line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_event_line(line: usize, text: &str) -> Result<Option<EventRecord>, ScenarioError> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() < 2 {
        return Err(ScenarioError::FieldCount {
            line,
            expected: 5,
            found: tokens.len(),
        });
    }
    let timestamp = number(line, "timestamp", tokens[0])?;

    let record = match tokens[1] {
        "DriverRequest" => {
            expect_fields(line, &tokens, 5)?;
            let speed: u32 = number(line, "speed", tokens[4])?;
            let speed = NonZeroU32::new(speed).ok_or_else(|| ScenarioError::ZeroSpeed {
                line,
                id: tokens[2].to_string(),
            })?;
            EventRecord::DriverRequest {
                timestamp,
                id: tokens[2].to_string(),
                location: location(line, tokens[3])?,
                speed,
            }
        }
        "RiderRequest" => {
            expect_fields(line, &tokens, 6)?;
            EventRecord::RiderRequest {
                timestamp,
                id: tokens[2].to_string(),
                origin: location(line, tokens[3])?,
                destination: location(line, tokens[4])?,
                patience: number(line, "patience", tokens[5])?,
            }
        }
        other => {
            return Err(ScenarioError::UnknownEventType {
                line,
                event_type: other.to_string(),
            })
        }
    };
    Ok(Some(record))
}

/// Fails on an id that appears twice in `records` or is already spawned.
fn reject_duplicate_ids(world: &World, records: &[EventRecord]) -> Result<(), ScenarioError> {
    let index = world.get_resource::<ActorIndex>();
    let mut drivers = HashSet::new();
    let mut riders = HashSet::new();
    for record in records {
        let (kind, id, seen, spawned) = match record {
            EventRecord::DriverRequest { id, .. } => (
                "driver",
                id,
                &mut drivers,
                index.and_then(|index| index.driver(id)),
            ),
            EventRecord::RiderRequest { id, .. } => (
                "rider",
                id,
                &mut riders,
                index.and_then(|index| index.rider(id)),
            ),
        };
        if spawned.is_some() || !seen.insert(id.as_str()) {
            return Err(ScenarioError::DuplicateActor {
                kind,
                id: id.clone(),
            });
        }
    }
    Ok(())
}

/// Parses an event file, spawns its actors into `world` and returns the
/// initial events in file order. Nothing is spawned if any line is invalid.
pub fn load_events(world: &mut World, text: &str) -> Result<Vec<Event>, ScenarioError> {
    let records = text
        .lines()
        .enumerate()
        .filter_map(|(index, line)| parse_event_line(index + 1, line).transpose())
        .collect::<Result<Vec<_>, _>>()?;
    reject_duplicate_ids(world, &records)?;

    let mut events = Vec::with_capacity(records.len());
    for record in records {
        let event = match record {
            EventRecord::DriverRequest {
                timestamp,
                id,
                location,
                speed,
            } => Event::driver_request(timestamp, spawn_driver(world, &id, location, speed)?),
            EventRecord::RiderRequest {
                timestamp,
                id,
                origin,
                destination,
                patience,
            } => Event::rider_request(
                timestamp,
                spawn_rider(world, &id, origin, destination, patience)?,
            ),
        };
        events.push(event);
    }
    debug!(events = events.len(), "loaded scenario events");
    Ok(events)
}
