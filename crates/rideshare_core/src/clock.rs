use std::fmt;

use bevy_ecs::prelude::{Entity, Resource, World};

use crate::ecs::{Driver, Rider};
use crate::queue::PriorityQueue;

/// What an event does, and to whom. Entities are the arena ids of the
/// [`crate::ecs::Rider`] / [`crate::ecs::Driver`] components involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A rider asks for a driver.
    RiderRequest { rider: Entity },
    /// A driver asks for a rider (and registers with the dispatcher).
    DriverRequest { driver: Entity },
    /// A rider's patience runs out.
    Cancellation { rider: Entity },
    /// A matched driver arrives at the rider's origin.
    Pickup { rider: Entity, driver: Entity },
    /// A driver arrives at the rider's destination.
    Dropoff { driver: Entity, rider: Entity },
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::RiderRequest { .. } => "RiderRequest",
            EventKind::DriverRequest { .. } => "DriverRequest",
            EventKind::Cancellation { .. } => "Cancellation",
            EventKind::Pickup { .. } => "Pickup",
            EventKind::Dropoff { .. } => "Dropoff",
        }
    }
}

/// A timestamped simulation event. Ordering between events is owned by
/// [`SimulationClock`]: timestamp first, then scheduling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Event {
    pub timestamp: u64,
    pub kind: EventKind,
}

impl Event {
    pub fn rider_request(timestamp: u64, rider: Entity) -> Self {
        Self {
            timestamp,
            kind: EventKind::RiderRequest { rider },
        }
    }

    pub fn driver_request(timestamp: u64, driver: Entity) -> Self {
        Self {
            timestamp,
            kind: EventKind::DriverRequest { driver },
        }
    }

    pub fn cancellation(timestamp: u64, rider: Entity) -> Self {
        Self {
            timestamp,
            kind: EventKind::Cancellation { rider },
        }
    }

    pub fn pickup(timestamp: u64, rider: Entity, driver: Entity) -> Self {
        Self {
            timestamp,
            kind: EventKind::Pickup { rider, driver },
        }
    }

    pub fn dropoff(timestamp: u64, driver: Entity, rider: Entity) -> Self {
        Self {
            timestamp,
            kind: EventKind::Dropoff { driver, rider },
        }
    }
}

impl Event {
    /// Renders the event with the actors' ids looked up in `world`, e.g.
    /// `0 -- Bathe: Request a driver`.
    pub fn describe<'w>(&self, world: &'w World) -> EventDescription<'w> {
        EventDescription {
            event: *self,
            world,
        }
    }
}

/// [`Event`] paired with the world its entities live in. See [`Event::describe`].
pub struct EventDescription<'w> {
    event: Event,
    world: &'w World,
}

impl EventDescription<'_> {
    // Entities that no longer resolve fall back to their raw id.
    fn rider(&self, entity: Entity) -> String {
        self.world
            .get::<Rider>(entity)
            .map_or_else(|| format!("{entity:?}"), |rider| rider.id.clone())
    }

    fn driver(&self, entity: Entity) -> String {
        self.world
            .get::<Driver>(entity)
            .map_or_else(|| format!("{entity:?}"), |driver| driver.id.clone())
    }
}

impl fmt::Display for EventDescription<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.event.timestamp;
        match self.event.kind {
            EventKind::RiderRequest { rider } => {
                write!(f, "{t} -- {}: Request a driver", self.rider(rider))
            }
            EventKind::DriverRequest { driver } => {
                write!(f, "{t} -- {}: Request a rider", self.driver(driver))
            }
            EventKind::Cancellation { rider } => {
                write!(f, "{t} -- {}: Cancel the ride", self.rider(rider))
            }
            EventKind::Pickup { rider, driver } => write!(
                f,
                "{t} -- {} -- {}: the driver Pick up the rider",
                self.driver(driver),
                self.rider(rider)
            ),
            EventKind::Dropoff { driver, rider } => write!(
                f,
                "{t} -- {} -- {}: the driver Drop off the rider",
                self.driver(driver),
                self.rider(rider)
            ),
        }
    }
}

fn event_timestamp(event: &Event) -> u64 {
    event.timestamp
}

/// The event currently being processed by the schedule.
#[derive(Debug, Clone, Copy, Resource)]
pub struct CurrentEvent(pub Event);

#[derive(Debug, Resource)]
pub struct SimulationClock {
    now: u64,
    events: PriorityQueue<Event, u64>,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self {
            now: 0,
            events: PriorityQueue::with_key(event_timestamp),
        }
    }
}

impl SimulationClock {
    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn schedule(&mut self, event: Event) {
        debug_assert!(
            event.timestamp >= self.now,
            "event timestamp must be >= current time"
        );
        self.events.add(event);
    }

    pub fn pop_next(&mut self) -> Option<Event> {
        let event = self.events.pop()?;
        self.now = event.timestamp;
        Some(event)
    }

    pub fn next_event_time(&self) -> Option<u64> {
        self.events.peek_key().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.events.len()
    }
}
