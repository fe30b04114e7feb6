//! Monitor / KPIs: records per-actor activities and derives the run report.

use std::collections::BTreeMap;
use std::fmt;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::spatial::{manhattan_distance, Location};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Rider,
    Driver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Description {
    Request,
    Cancel,
    Pickup,
    Dropoff,
}

impl Description {
    pub fn as_str(&self) -> &'static str {
        match self {
            Description::Request => "request",
            Description::Cancel => "cancel",
            Description::Pickup => "pickup",
            Description::Dropoff => "dropoff",
        }
    }
}

/// One thing an actor did at one point in simulated time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub time: u64,
    pub description: Description,
    pub actor_id: String,
    pub location: Location,
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}---{}---{}---{}",
            self.time,
            self.actor_id,
            self.description.as_str(),
            self.location
        )
    }
}

/// Aggregate statistics of a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Mean time between request and pickup/cancel over riders that got either.
    pub rider_wait_time: f64,
    /// Mean distance driven per driver that did anything after registering.
    pub driver_total_distance: f64,
    /// Mean distance driven with a rider on board per driver that completed a ride.
    pub driver_ride_distance: f64,
}

impl Report {
    pub fn to_map(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            ("rider_wait_time", self.rider_wait_time),
            ("driver_total_distance", self.driver_total_distance),
            ("driver_ride_distance", self.driver_ride_distance),
        ])
    }
}

/// Keeps every activity it is notified about, grouped by category and actor.
#[derive(Debug, Default, Resource)]
pub struct Monitor {
    riders: BTreeMap<String, Vec<Activity>>,
    drivers: BTreeMap<String, Vec<Activity>>,
}

impl Monitor {
    pub fn notify(
        &mut self,
        timestamp: u64,
        category: Category,
        description: Description,
        actor_id: &str,
        location: Location,
    ) {
        trace!(timestamp, ?category, description = description.as_str(), actor_id, %location, "activity");
        let log = match category {
            Category::Rider => &mut self.riders,
            Category::Driver => &mut self.drivers,
        };
        log.entry(actor_id.to_string()).or_default().push(Activity {
            time: timestamp,
            description,
            actor_id: actor_id.to_string(),
            location,
        });
    }

    pub fn activities(&self, category: Category, actor_id: &str) -> &[Activity] {
        let log = match category {
            Category::Rider => &self.riders,
            Category::Driver => &self.drivers,
        };
        log.get(actor_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All activities of one category, actor by actor (sorted by id), each
    /// actor's activities in notification order.
    pub fn iter_category(&self, category: Category) -> impl Iterator<Item = &Activity> + '_ {
        let log = match category {
            Category::Rider => &self.riders,
            Category::Driver => &self.drivers,
        };
        log.values().flatten()
    }

    pub fn report(&self) -> Report {
        Report {
            rider_wait_time: self.average_wait_time(),
            driver_total_distance: self.average_total_distance(),
            driver_ride_distance: self.average_ride_distance(),
        }
    }

    fn average_wait_time(&self) -> f64 {
        // The first activity is the request; the second is the pickup or cancel.
        let waits: Vec<u64> = self
            .riders
            .values()
            .filter(|activities| activities.len() >= 2)
            .map(|activities| activities[1].time.saturating_sub(activities[0].time))
            .collect();
        mean(waits.iter().sum::<u64>(), waits.len())
    }

    fn average_total_distance(&self) -> f64 {
        let totals: Vec<u64> = self
            .drivers
            .values()
            .filter(|activities| activities.len() >= 2)
            .map(|activities| {
                activities
                    .windows(2)
                    .map(|pair| manhattan_distance(pair[0].location, pair[1].location))
                    .sum()
            })
            .collect();
        mean(totals.iter().sum::<u64>(), totals.len())
    }

    fn average_ride_distance(&self) -> f64 {
        let totals: Vec<u64> = self
            .drivers
            .values()
            .filter(|activities| activities.len() >= 4)
            .map(|activities| {
                let stops: Vec<&Activity> = activities
                    .iter()
                    .filter(|a| matches!(a.description, Description::Pickup | Description::Dropoff))
                    .collect();
                stops
                    .chunks_exact(2)
                    .map(|ride| manhattan_distance(ride[0].location, ride[1].location))
                    .sum()
            })
            .collect();
        mean(totals.iter().sum::<u64>(), totals.len())
    }
}

impl fmt::Display for Monitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Monitor ({} drivers, {} riders)",
            self.drivers.len(),
            self.riders.len()
        )
    }
}

fn mean(total: u64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_monitor_reports_zeros() {
        let monitor = Monitor::default();
        assert_eq!(monitor.report(), Report::default());
        assert_eq!(monitor.to_string(), "Monitor (0 drivers, 0 riders)");
    }

    #[test]
    fn notify_groups_activities_by_actor() {
        let mut monitor = Monitor::default();
        monitor.notify(0, Category::Rider, Description::Request, "rider1", Location::new(1, 1));
        monitor.notify(3, Category::Rider, Description::Cancel, "rider1", Location::new(1, 1));
        monitor.notify(1, Category::Driver, Description::Request, "driver1", Location::new(0, 0));

        let rider = monitor.activities(Category::Rider, "rider1");
        assert_eq!(rider.len(), 2);
        assert_eq!(rider[0].to_string(), "0---rider1---request---(1,1)");
        assert!(monitor.activities(Category::Driver, "rider1").is_empty());
        assert_eq!(monitor.to_string(), "Monitor (1 drivers, 1 riders)");
    }

    #[test]
    fn report_averages_over_qualifying_actors() {
        let mut monitor = Monitor::default();
        // Dan waits 11 and rides from (1,1) to (6,6); Eve never gets a second activity.
        monitor.notify(1, Category::Rider, Description::Request, "Dan", Location::new(1, 1));
        monitor.notify(12, Category::Rider, Description::Pickup, "Dan", Location::new(1, 1));
        monitor.notify(17, Category::Rider, Description::Dropoff, "Dan", Location::new(6, 6));
        monitor.notify(2, Category::Rider, Description::Request, "Eve", Location::new(0, 0));

        monitor.notify(10, Category::Driver, Description::Request, "Arnold", Location::new(3, 3));
        monitor.notify(12, Category::Driver, Description::Pickup, "Arnold", Location::new(1, 1));
        monitor.notify(17, Category::Driver, Description::Dropoff, "Arnold", Location::new(6, 6));
        monitor.notify(17, Category::Driver, Description::Request, "Arnold", Location::new(6, 6));
        // Registered but never dispatched: excluded from both driver averages.
        monitor.notify(5, Category::Driver, Description::Request, "Idle", Location::new(9, 9));

        let report = monitor.report();
        assert_eq!(report.rider_wait_time, 11.0);
        assert_eq!(report.driver_total_distance, 14.0);
        assert_eq!(report.driver_ride_distance, 10.0);
        assert_eq!(report.to_map()["driver_ride_distance"], 10.0);
    }
}
