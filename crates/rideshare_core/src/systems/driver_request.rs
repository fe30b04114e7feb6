use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::clock::{CurrentEvent, Event, EventKind};
use crate::dispatcher::Dispatcher;
use crate::ecs::{Driver, Rider};
use crate::monitor::{Category, Description, Monitor};
use crate::systems::EventOutcome;

/// An idle driver asks for a rider, registering with the dispatcher on first
/// request. If someone is waiting, the driver heads for them (Pickup).
pub fn driver_request_system(
    event: Res<CurrentEvent>,
    mut outcome: ResMut<EventOutcome>,
    mut dispatcher: ResMut<Dispatcher>,
    mut monitor: ResMut<Monitor>,
    riders: Query<&Rider>,
    mut drivers: Query<&mut Driver>,
) {
    let current = event.0;
    let EventKind::DriverRequest {
        driver: driver_entity,
    } = current.kind
    else {
        return;
    };
    let Ok(mut driver) = drivers.get_mut(driver_entity) else {
        outcome.missing(&current, "driver", driver_entity);
        return;
    };
    if !driver.is_idle() {
        outcome.violation(
            &current,
            format!("driver `{}` requested a rider while on the road", driver.id),
        );
        return;
    }

    monitor.notify(
        current.timestamp,
        Category::Driver,
        Description::Request,
        &driver.id,
        driver.location,
    );

    let Some(rider_entity) = dispatcher.request_rider(driver_entity) else {
        return;
    };
    let Ok(rider) = riders.get(rider_entity) else {
        outcome.missing(&current, "rider", rider_entity);
        return;
    };
    let travel_time = driver.start_drive(rider.origin);
    let Some(pickup_at) = outcome.deadline(&current, travel_time) else {
        return;
    };
    outcome.emit(Event::pickup(pickup_at, rider_entity, driver_entity));
}
