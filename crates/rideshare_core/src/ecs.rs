use std::num::NonZeroU32;

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::spatial::{manhattan_distance, Location};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiderStatus {
    Waiting,
    Cancelled,
    Satisfied,
}

/// A passenger. Status transitions are owned by the event systems; the
/// component itself only holds data.
#[derive(Debug, Clone, PartialEq, Eq, Component)]
pub struct Rider {
    pub id: String,
    pub status: RiderStatus,
    /// Time units after the request at which an unserved request cancels.
    pub patience: u64,
    pub origin: Location,
    pub destination: Location,
}

impl Rider {
    pub fn new(id: impl Into<String>, patience: u64, origin: Location, destination: Location) -> Self {
        Self {
            id: id.into(),
            status: RiderStatus::Waiting,
            patience,
            origin,
            destination,
        }
    }
}

/// A vehicle. `destination` is set exactly while the driver is on the road.
#[derive(Debug, Clone, PartialEq, Eq, Component)]
pub struct Driver {
    pub id: String,
    pub location: Location,
    pub speed: NonZeroU32,
    destination: Option<Location>,
}

impl Driver {
    pub fn new(id: impl Into<String>, location: Location, speed: NonZeroU32) -> Self {
        Self {
            id: id.into(),
            location,
            speed,
            destination: None,
        }
    }

    pub fn destination(&self) -> Option<Location> {
        self.destination
    }

    pub fn is_idle(&self) -> bool {
        self.destination.is_none()
    }

    /// Time to reach `destination` at this driver's speed: `distance / speed`
    /// rounded to the nearest integer, ties to even.
    pub fn travel_time(&self, destination: Location) -> u64 {
        let distance = manhattan_distance(self.location, destination);
        round_half_even_div(distance, u64::from(self.speed.get()))
    }

    /// Heads for `location` (a rider's origin) and returns the travel time.
    pub fn start_drive(&mut self, location: Location) -> u64 {
        self.destination = Some(location);
        self.travel_time(location)
    }

    /// Arrives at the current destination.
    pub fn end_drive(&mut self) -> Result<(), SimError> {
        self.arrive()
    }

    /// Heads for the rider's destination and returns the ride time.
    pub fn start_ride(&mut self, rider: &Rider) -> u64 {
        self.start_drive(rider.destination)
    }

    /// Arrives at the rider's destination.
    pub fn end_ride(&mut self) -> Result<(), SimError> {
        self.arrive()
    }

    fn arrive(&mut self) -> Result<(), SimError> {
        let destination = self.destination.take().ok_or_else(|| SimError::NoDestination {
            driver: self.id.clone(),
        })?;
        self.location = destination;
        Ok(())
    }
}

fn round_half_even_div(numerator: u64, denominator: u64) -> u64 {
    let quotient = numerator / denominator;
    let twice_remainder = 2 * (numerator % denominator);
    match twice_remainder.cmp(&denominator) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal => quotient + (quotient % 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver_at(row: i32, column: i32, speed: u32) -> Driver {
        Driver::new(
            "Atom",
            Location::new(row, column),
            NonZeroU32::new(speed).expect("non-zero speed"),
        )
    }

    #[test]
    fn travel_time_is_distance_over_speed() {
        let driver = driver_at(0, 0, 1);
        assert_eq!(driver.travel_time(Location::new(5, 8)), 13);
    }

    #[test]
    fn travel_time_rounds_half_to_even() {
        let driver = driver_at(0, 0, 2);
        assert_eq!(driver.travel_time(Location::new(0, 1)), 0);
        assert_eq!(driver.travel_time(Location::new(0, 3)), 2);
        assert_eq!(driver.travel_time(Location::new(0, 5)), 2);
        assert_eq!(driver.travel_time(Location::new(0, 7)), 4);

        let driver = driver_at(0, 0, 3);
        assert_eq!(driver.travel_time(Location::new(0, 4)), 1);
        assert_eq!(driver.travel_time(Location::new(0, 5)), 2);
    }

    #[test]
    fn drive_moves_only_on_arrival() {
        let mut driver = driver_at(0, 0, 1);
        assert!(driver.is_idle());
        assert_eq!(driver.start_drive(Location::new(5, 8)), 13);
        assert!(!driver.is_idle());
        assert_eq!(driver.location, Location::new(0, 0));

        driver.end_drive().expect("destination set");
        assert!(driver.is_idle());
        assert_eq!(driver.location, Location::new(5, 8));
    }

    #[test]
    fn ride_ends_at_rider_destination() {
        let mut driver = driver_at(1, 2, 1);
        let rider = Rider::new("Bathe", 5, Location::new(1, 2), Location::new(5, 8));
        assert_eq!(driver.start_ride(&rider), 10);
        driver.end_ride().expect("destination set");
        assert_eq!(driver.location, Location::new(5, 8));
        assert!(driver.is_idle());
    }

    #[test]
    fn arriving_without_destination_is_an_error() {
        let mut driver = driver_at(0, 0, 1);
        assert_eq!(
            driver.end_drive(),
            Err(SimError::NoDestination {
                driver: "Atom".to_string()
            })
        );
    }
}
