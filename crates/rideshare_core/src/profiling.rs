//! Event-rate tracking: counts processed events per kind.

use std::collections::HashMap;
use std::time::Instant;

use bevy_ecs::prelude::Resource;

use crate::clock::EventKind;

/// Event processing metrics. Insert as a resource to have the runner record
/// every processed event.
#[derive(Debug, Default, Resource)]
pub struct EventMetrics {
    /// Total number of events processed.
    pub events_processed: u64,
    /// Start time for rate calculation.
    pub start_time: Option<Instant>,
    /// Events per event kind name.
    pub events_by_kind: HashMap<&'static str, u64>,
}

impl EventMetrics {
    /// Record an event being processed.
    pub fn record_event(&mut self, kind: &EventKind) {
        if self.start_time.is_none() {
            self.start_time = Some(Instant::now());
        }
        self.events_processed += 1;
        *self.events_by_kind.entry(kind.name()).or_insert(0) += 1;
    }

    pub fn count(&self, kind_name: &str) -> u64 {
        self.events_by_kind.get(kind_name).copied().unwrap_or(0)
    }

    /// Get current event processing rate (events per second of wall time).
    pub fn events_per_second(&self) -> f64 {
        let Some(start) = self.start_time else {
            return 0.0;
        };
        let elapsed = start.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.events_processed as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Kind names with their counts, most frequent first.
    pub fn summary(&self) -> Vec<(&'static str, u64)> {
        let mut entries: Vec<_> = self
            .events_by_kind
            .iter()
            .map(|(kind, count)| (*kind, *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_ecs::prelude::Entity;

    #[test]
    fn counts_events_by_kind() {
        let mut metrics = EventMetrics::default();
        let rider = Entity::from_raw(1);
        metrics.record_event(&EventKind::RiderRequest { rider });
        metrics.record_event(&EventKind::Cancellation { rider });
        metrics.record_event(&EventKind::RiderRequest { rider });

        assert_eq!(metrics.events_processed, 3);
        assert_eq!(metrics.count("RiderRequest"), 2);
        assert_eq!(metrics.count("Dropoff"), 0);
        assert_eq!(
            metrics.summary(),
            vec![("RiderRequest", 2), ("Cancellation", 1)]
        );
        assert!(metrics.start_time.is_some());
    }
}
