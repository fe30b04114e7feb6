//! Event systems: one per [`crate::clock::EventKind`] variant.
//!
//! Each system reads [`crate::clock::CurrentEvent`], mutates riders, drivers,
//! the [`crate::dispatcher::Dispatcher`] and the [`crate::monitor::Monitor`],
//! and records what it produced in [`EventOutcome`]. The runner owns the
//! queue; systems never schedule directly.

use bevy_ecs::prelude::{Entity, Resource};

use crate::clock::Event;
use crate::error::SimError;

pub mod cancellation;
pub mod driver_request;
pub mod dropoff;
pub mod pickup;
pub mod rider_request;

/// Follow-on events and the first fault raised while processing one event.
#[derive(Debug, Default, Resource)]
pub struct EventOutcome {
    pub emitted: Vec<Event>,
    pub fault: Option<SimError>,
}

impl EventOutcome {
    pub fn emit(&mut self, event: Event) {
        self.emitted.push(event);
    }

    pub fn fail(&mut self, error: SimError) {
        if self.fault.is_none() {
            self.fault = Some(error);
        }
    }

    pub(crate) fn missing(&mut self, event: &Event, role: &'static str, entity: Entity) {
        self.fail(SimError::MissingEntity {
            event: event.kind.name(),
            timestamp: event.timestamp,
            role,
            entity,
        });
    }

    /// `event.timestamp + delay`, or `None` after recording the overflow.
    pub(crate) fn deadline(&mut self, event: &Event, delay: u64) -> Option<u64> {
        let at = event.timestamp.checked_add(delay);
        if at.is_none() {
            self.fail(SimError::TimestampOverflow {
                event: event.kind.name(),
                timestamp: event.timestamp,
                delay,
            });
        }
        at
    }

    pub(crate) fn violation(&mut self, event: &Event, reason: impl Into<String>) {
        self.fail(SimError::PreconditionViolation {
            event: event.kind.name(),
            timestamp: event.timestamp,
            reason: reason.into(),
        });
    }
}
