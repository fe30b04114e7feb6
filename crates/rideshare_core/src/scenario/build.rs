use std::num::NonZeroU32;

use bevy_ecs::prelude::World;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::clock::Event;
use crate::scenario::params::ScenarioParams;
use crate::scenario::{spawn_driver, spawn_rider, ScenarioError};
use crate::spatial::Location;

fn random_location<R: Rng>(rng: &mut R, grid_size: i32) -> Location {
    let size = grid_size.max(1);
    Location::new(rng.gen_range(0..size), rng.gen_range(0..size))
}

/// Spawns `num_drivers` drivers and `num_riders` riders at random grid
/// locations and returns their request events, sorted by timestamp.
///
/// Ids are `driver-<n>` / `rider-<n>`.
pub fn build_scenario(
    world: &mut World,
    params: ScenarioParams,
) -> Result<Vec<Event>, ScenarioError> {
    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let min_speed = params.min_speed.max(1);
    let max_speed = params.max_speed.max(min_speed);
    let max_patience = params.max_patience.max(params.min_patience);

    let mut events = Vec::with_capacity(params.num_drivers + params.num_riders);
    for n in 0..params.num_drivers {
        let location = random_location(&mut rng, params.grid_size);
        let speed = NonZeroU32::new(rng.gen_range(min_speed..=max_speed)).unwrap_or(NonZeroU32::MIN);
        let timestamp = rng.gen_range(0..=params.request_window);
        let entity = spawn_driver(world, &format!("driver-{n}"), location, speed)?;
        events.push(Event::driver_request(timestamp, entity));
    }
    for n in 0..params.num_riders {
        let origin = random_location(&mut rng, params.grid_size);
        let destination = random_location(&mut rng, params.grid_size);
        let patience = rng.gen_range(params.min_patience..=max_patience);
        let timestamp = rng.gen_range(0..=params.request_window);
        let entity = spawn_rider(world, &format!("rider-{n}"), origin, destination, patience)?;
        events.push(Event::rider_request(timestamp, entity));
    }

    // Stable sort keeps drivers ahead of riders at equal timestamps.
    events.sort_by_key(|event| event.timestamp);
    debug!(
        drivers = params.num_drivers,
        riders = params.num_riders,
        "built random scenario"
    );
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{Driver, Rider};
    use crate::scenario::ActorIndex;

    #[test]
    fn builds_requested_population_within_bounds() {
        let mut world = World::new();
        let params = ScenarioParams {
            num_riders: 30,
            num_drivers: 7,
            ..Default::default()
        }
        .with_seed(7)
        .with_grid_size(5)
        .with_request_window(40)
        .with_patience(2, 4)
        .with_speed(1, 2);

        let events = build_scenario(&mut world, params).expect("scenario");

        assert_eq!(events.len(), 37);
        assert!(events.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert!(events.iter().all(|e| e.timestamp <= 40));
        let index = world.resource::<ActorIndex>();
        assert_eq!(index.driver_count(), 7);
        assert_eq!(index.rider_count(), 30);

        for rider in world.query::<&Rider>().iter(&world) {
            assert!((2..=4).contains(&rider.patience));
            assert!((0..5).contains(&rider.origin.row));
            assert!((0..5).contains(&rider.destination.column));
        }
        for driver in world.query::<&Driver>().iter(&world) {
            assert!((1..=2).contains(&driver.speed.get()));
        }
    }

    #[test]
    fn same_seed_builds_same_scenario() {
        let build = || {
            let mut world = World::new();
            let events = build_scenario(&mut world, ScenarioParams::default().with_seed(42))
                .expect("scenario");
            let mut origins: Vec<(String, Location)> = world
                .query::<&Rider>()
                .iter(&world)
                .map(|r| (r.id.clone(), r.origin))
                .collect();
            origins.sort_by(|a, b| a.0.cmp(&b.0));
            (events.iter().map(|e| e.timestamp).collect::<Vec<_>>(), origins)
        };
        assert_eq!(build(), build());
    }
}
