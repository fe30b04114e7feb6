//! Discrete-event simulation of a ride-sharing dispatcher.
//!
//! Riders and drivers live as components in a `bevy_ecs` world; a timestamp
//! ordered event queue drives request, cancellation, pickup and dropoff
//! transitions, and a monitor records what happened for the final report.

pub mod clock;
pub mod dispatcher;
pub mod ecs;
pub mod error;
pub mod monitor;
pub mod profiling;
pub mod queue;
pub mod runner;
pub mod scenario;
pub mod spatial;
pub mod systems;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use clock::{Event, EventKind};
pub use error::SimError;
pub use monitor::Report;
pub use runner::Simulation;
