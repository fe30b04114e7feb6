use bevy_ecs::prelude::{Entity, Query, Res, ResMut};

use crate::clock::{CurrentEvent, Event, EventKind};
use crate::dispatcher::Dispatcher;
use crate::ecs::{Driver, Rider};
use crate::monitor::{Category, Description, Monitor};
use crate::systems::EventOutcome;

/// A rider asks for a driver. A matched driver heads for the rider's origin
/// (Pickup); the rider's patience timer is always armed (Cancellation).
pub fn rider_request_system(
    event: Res<CurrentEvent>,
    mut outcome: ResMut<EventOutcome>,
    mut dispatcher: ResMut<Dispatcher>,
    mut monitor: ResMut<Monitor>,
    mut riders: Query<&mut Rider>,
    mut drivers: Query<&mut Driver>,
) {
    let current = event.0;
    let EventKind::RiderRequest { rider: rider_entity } = current.kind else {
        return;
    };
    let Ok(mut rider) = riders.get_mut(rider_entity) else {
        outcome.missing(&current, "rider", rider_entity);
        return;
    };
    let Some(cancel_at) = outcome.deadline(&current, rider.patience) else {
        return;
    };

    monitor.notify(
        current.timestamp,
        Category::Rider,
        Description::Request,
        &rider.id,
        rider.origin,
    );

    let lookup = |e: Entity| drivers.get(e).ok();
    let matched = match dispatcher.request_driver(rider_entity, &mut rider, lookup) {
        Ok(matched) => matched,
        Err(unresolved) => {
            outcome.missing(&current, "driver", unresolved);
            return;
        }
    };
    if let Some(driver_entity) = matched {
        let Ok(mut driver) = drivers.get_mut(driver_entity) else {
            outcome.missing(&current, "driver", driver_entity);
            return;
        };
        let travel_time = driver.start_drive(rider.origin);
        let Some(pickup_at) = outcome.deadline(&current, travel_time) else {
            return;
        };
        outcome.emit(Event::pickup(pickup_at, rider_entity, driver_entity));
    }
    outcome.emit(Event::cancellation(cancel_at, rider_entity));
}
