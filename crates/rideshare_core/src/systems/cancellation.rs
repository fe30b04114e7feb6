use bevy_ecs::prelude::{Query, Res, ResMut};
use tracing::debug;

use crate::clock::{CurrentEvent, EventKind};
use crate::dispatcher::Dispatcher;
use crate::ecs::{Rider, RiderStatus};
use crate::monitor::{Category, Description, Monitor};
use crate::systems::EventOutcome;

/// The rider's patience ran out. A rider already picked up ignores it;
/// otherwise the rider leaves the waiting list (if still on it) and cancels.
/// A driver already heading for the rider finds out on arrival.
pub fn cancellation_system(
    event: Res<CurrentEvent>,
    mut outcome: ResMut<EventOutcome>,
    mut dispatcher: ResMut<Dispatcher>,
    mut monitor: ResMut<Monitor>,
    mut riders: Query<&mut Rider>,
) {
    let current = event.0;
    let EventKind::Cancellation { rider: rider_entity } = current.kind else {
        return;
    };
    let Ok(mut rider) = riders.get_mut(rider_entity) else {
        outcome.missing(&current, "rider", rider_entity);
        return;
    };
    if rider.status == RiderStatus::Satisfied {
        return;
    }

    let was_waiting = dispatcher.cancel_ride(rider_entity);
    debug!(rider = %rider.id, was_waiting, "rider cancelled");
    rider.status = RiderStatus::Cancelled;
    monitor.notify(
        current.timestamp,
        Category::Rider,
        Description::Cancel,
        &rider.id,
        rider.origin,
    );
}
