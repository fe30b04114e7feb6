use bevy_ecs::prelude::{Query, Res, ResMut};

use crate::clock::{CurrentEvent, Event, EventKind};
use crate::ecs::{Driver, Rider, RiderStatus};
use crate::monitor::{Category, Description, Monitor};
use crate::systems::EventOutcome;

/// The driver reaches the rider's destination, drops them off and goes
/// straight back to requesting.
pub fn dropoff_system(
    event: Res<CurrentEvent>,
    mut outcome: ResMut<EventOutcome>,
    mut monitor: ResMut<Monitor>,
    riders: Query<&Rider>,
    mut drivers: Query<&mut Driver>,
) {
    let current = event.0;
    let EventKind::Dropoff {
        driver: driver_entity,
        rider: rider_entity,
    } = current.kind
    else {
        return;
    };
    let Ok(rider) = riders.get(rider_entity) else {
        outcome.missing(&current, "rider", rider_entity);
        return;
    };
    let Ok(mut driver) = drivers.get_mut(driver_entity) else {
        outcome.missing(&current, "driver", driver_entity);
        return;
    };
    if rider.status != RiderStatus::Satisfied {
        outcome.violation(
            &current,
            format!("rider `{}` was never picked up", rider.id),
        );
        return;
    }
    if let Err(err) = driver.end_ride() {
        outcome.fail(err);
        return;
    }

    monitor.notify(
        current.timestamp,
        Category::Driver,
        Description::Dropoff,
        &driver.id,
        driver.location,
    );
    monitor.notify(
        current.timestamp,
        Category::Rider,
        Description::Dropoff,
        &rider.id,
        rider.destination,
    );
    monitor.notify(
        current.timestamp,
        Category::Driver,
        Description::Request,
        &driver.id,
        driver.location,
    );
    outcome.emit(Event::driver_request(current.timestamp, driver_entity));
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::prelude::Schedule;

    use crate::error::SimError;
    use crate::spatial::Location;
    use crate::test_helpers::{
        create_test_world, driver, set_current_event, spawn_atom, spawn_bathe, take_outcome,
    };

    #[test]
    fn dropoff_frees_driver_and_requests_again() {
        let mut world = create_test_world();
        let bathe = spawn_bathe(&mut world);
        let atom = spawn_atom(&mut world);
        world.get_mut::<Rider>(bathe).expect("rider").status = RiderStatus::Satisfied;
        world
            .get_mut::<Driver>(atom)
            .expect("driver")
            .start_drive(Location::new(5, 8));
        set_current_event(&mut world, Event::dropoff(14, atom, bathe));

        let mut schedule = Schedule::default();
        schedule.add_systems(dropoff_system);
        schedule.run(&mut world);

        let outcome = take_outcome(&mut world);
        assert_eq!(outcome.emitted, vec![Event::driver_request(14, atom)]);
        let atom_driver = driver(&world, atom);
        assert!(atom_driver.is_idle());
        assert_eq!(atom_driver.location, Location::new(5, 8));

        let monitor = world.resource::<Monitor>();
        let descriptions: Vec<Description> = monitor
            .activities(Category::Driver, "Atom")
            .iter()
            .map(|a| a.description)
            .collect();
        assert_eq!(descriptions, vec![Description::Dropoff, Description::Request]);
        let rider_log = monitor.activities(Category::Rider, "Bathe");
        assert_eq!(rider_log[0].location, Location::new(5, 8));
    }

    #[test]
    fn dropoff_of_rider_never_picked_up_is_a_violation() {
        let mut world = create_test_world();
        let bathe = spawn_bathe(&mut world);
        let atom = spawn_atom(&mut world);
        set_current_event(&mut world, Event::dropoff(14, atom, bathe));

        let mut schedule = Schedule::default();
        schedule.add_systems(dropoff_system);
        schedule.run(&mut world);

        let outcome = take_outcome(&mut world);
        assert!(matches!(
            outcome.fault,
            Some(SimError::PreconditionViolation { event: "Dropoff", .. })
        ));
        assert!(outcome.emitted.is_empty());
    }
}
