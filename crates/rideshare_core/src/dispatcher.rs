//! Dispatcher: the matching authority between idle drivers and waiting riders.
//!
//! - A rider request is served by the registered idle driver with the lowest
//!   travel time to the rider's origin (registration order breaks ties), or
//!   parks the rider on the FIFO waiting list.
//! - A driver request registers the driver (once) and takes the head of the
//!   waiting list, if any.
//!
//! The dispatcher only hands out entity ids. Starting the drive is the
//! caller's job.

use std::collections::VecDeque;

use bevy_ecs::prelude::{Entity, Resource};
use tracing::debug;

use crate::ecs::{Driver, Rider, RiderStatus};

#[derive(Debug, Default, Resource)]
pub struct Dispatcher {
    drivers: Vec<Entity>,
    waiting_riders: VecDeque<Entity>,
}

impl Dispatcher {
    /// Registered drivers, in registration order.
    pub fn drivers(&self) -> &[Entity] {
        &self.drivers
    }

    /// Riders without a driver, oldest request first.
    pub fn waiting_riders(&self) -> impl Iterator<Item = Entity> + '_ {
        self.waiting_riders.iter().copied()
    }

    pub fn is_registered(&self, driver: Entity) -> bool {
        self.drivers.contains(&driver)
    }

    pub fn is_waiting(&self, rider: Entity) -> bool {
        self.waiting_riders.contains(&rider)
    }

    /// Marks the rider as waiting and returns the fastest idle driver.
    ///
    /// `lookup` resolves a registered driver entity to its component. With no
    /// idle driver the rider joins the waiting list and `Ok(None)` is
    /// returned. A registered driver that `lookup` cannot resolve is returned
    /// as the error and leaves the waiting list untouched.
    pub fn request_driver<'d, F>(
        &mut self,
        rider_entity: Entity,
        rider: &mut Rider,
        lookup: F,
    ) -> Result<Option<Entity>, Entity>
    where
        F: Fn(Entity) -> Option<&'d Driver>,
    {
        rider.status = RiderStatus::Waiting;

        let mut best: Option<(Entity, u64)> = None;
        for &driver_entity in &self.drivers {
            let driver = lookup(driver_entity).ok_or(driver_entity)?;
            if !driver.is_idle() {
                continue;
            }
            let travel_time = driver.travel_time(rider.origin);
            match best {
                Some((_, best_time)) if travel_time >= best_time => {}
                _ => best = Some((driver_entity, travel_time)),
            }
        }

        match best {
            Some((driver_entity, travel_time)) => {
                debug!(rider = %rider.id, ?driver_entity, travel_time, "matched rider to idle driver");
                Ok(Some(driver_entity))
            }
            None => {
                if !self.waiting_riders.contains(&rider_entity) {
                    self.waiting_riders.push_back(rider_entity);
                }
                debug!(rider = %rider.id, waiting = self.waiting_riders.len(), "no idle driver, rider waits");
                Ok(None)
            }
        }
    }

    /// Registers the driver if new and hands out the longest-waiting rider.
    pub fn request_rider(&mut self, driver_entity: Entity) -> Option<Entity> {
        if !self.drivers.contains(&driver_entity) {
            self.drivers.push(driver_entity);
        }
        self.waiting_riders.pop_front()
    }

    /// Drops the rider from the waiting list. Returns whether it was there;
    /// a rider that was already matched is not an error.
    pub fn cancel_ride(&mut self, rider_entity: Entity) -> bool {
        match self.waiting_riders.iter().position(|&r| r == rider_entity) {
            Some(index) => {
                self.waiting_riders.remove(index);
                true
            }
            None => false,
        }
    }
}
