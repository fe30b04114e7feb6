use bevy_ecs::prelude::{Query, Res, ResMut};
use tracing::debug;

use crate::clock::{CurrentEvent, Event, EventKind};
use crate::ecs::{Driver, Rider, RiderStatus};
use crate::monitor::{Category, Description, Monitor};
use crate::systems::EventOutcome;

/// The driver reaches the rider's origin. A still-waiting rider boards
/// (Dropoff); a rider who cancelled meanwhile leaves the driver to request
/// again at once (DriverRequest).
pub fn pickup_system(
    event: Res<CurrentEvent>,
    mut outcome: ResMut<EventOutcome>,
    mut monitor: ResMut<Monitor>,
    mut riders: Query<&mut Rider>,
    mut drivers: Query<&mut Driver>,
) {
    let current = event.0;
    let EventKind::Pickup {
        rider: rider_entity,
        driver: driver_entity,
    } = current.kind
    else {
        return;
    };
    let Ok(mut rider) = riders.get_mut(rider_entity) else {
        outcome.missing(&current, "rider", rider_entity);
        return;
    };
    let Ok(mut driver) = drivers.get_mut(driver_entity) else {
        outcome.missing(&current, "driver", driver_entity);
        return;
    };

    // The driver arrives whether or not the rider is still there.
    if let Err(err) = driver.end_drive() {
        outcome.fail(err);
        return;
    }

    match rider.status {
        RiderStatus::Waiting => {
            let ride_time = driver.start_ride(&rider);
            rider.status = RiderStatus::Satisfied;
            monitor.notify(
                current.timestamp,
                Category::Driver,
                Description::Pickup,
                &driver.id,
                driver.location,
            );
            monitor.notify(
                current.timestamp,
                Category::Rider,
                Description::Pickup,
                &rider.id,
                rider.origin,
            );
            let Some(dropoff_at) = outcome.deadline(&current, ride_time) else {
                return;
            };
            outcome.emit(Event::dropoff(dropoff_at, driver_entity, rider_entity));
        }
        RiderStatus::Cancelled => {
            debug!(rider = %rider.id, driver = %driver.id, "driver arrived after cancellation");
            monitor.notify(
                current.timestamp,
                Category::Driver,
                Description::Request,
                &driver.id,
                driver.location,
            );
            outcome.emit(Event::driver_request(current.timestamp, driver_entity));
        }
        RiderStatus::Satisfied => {
            outcome.violation(
                &current,
                format!("rider `{}` was already picked up", rider.id),
            );
        }
    }
}
