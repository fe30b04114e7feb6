//! Run a seeded 500 riders / 100 drivers scenario and print the report.
//!
//! Run with: cargo run -p rideshare_core --example scenario_run

use rideshare_core::monitor::{Category, Description};
use rideshare_core::profiling::EventMetrics;
use rideshare_core::scenario::{build_scenario, ScenarioParams};
use rideshare_core::Simulation;

fn main() {
    const NUM_RIDERS: usize = 500;
    const NUM_DRIVERS: usize = 100;
    const SEED: u64 = 123;

    let mut sim = Simulation::new();
    sim.world_mut().insert_resource(EventMetrics::default());
    let events = match build_scenario(
        sim.world_mut(),
        ScenarioParams {
            num_riders: NUM_RIDERS,
            num_drivers: NUM_DRIVERS,
            ..Default::default()
        }
        .with_seed(SEED)
        .with_grid_size(40)
        .with_request_window(500),
    ) {
        Ok(events) => events,
        Err(err) => {
            eprintln!("failed to build scenario: {err}");
            std::process::exit(1);
        }
    };

    let report = match sim.run(events) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("simulation halted: {err}");
            std::process::exit(1);
        }
    };

    let monitor = sim.monitor();
    let served = monitor
        .iter_category(Category::Rider)
        .filter(|a| a.description == Description::Dropoff)
        .count();
    let metrics = sim.world().resource::<EventMetrics>();

    println!("--- Scenario run ({NUM_RIDERS} riders, {NUM_DRIVERS} drivers, seed {SEED}) ---");
    println!("Events processed: {}", metrics.events_processed);
    for (kind, count) in metrics.summary() {
        println!("  {kind:<14} {count}");
    }
    println!("Riders served: {served} / {NUM_RIDERS}");
    println!("Mean rider wait: {:.2}", report.rider_wait_time);
    println!("Mean driver distance: {:.2}", report.driver_total_distance);
    println!("Mean driver ride distance: {:.2}", report.driver_ride_distance);
}
