use bevy_ecs::prelude::Entity;
use thiserror::Error;

/// Broken simulation invariants. Any of these halts the run: the world is no
/// longer trustworthy once one has been observed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("driver `{driver}` arrived without a destination")]
    NoDestination { driver: String },
    #[error("{event} at t={timestamp} references {role} entity {entity:?}, which does not exist")]
    MissingEntity {
        event: &'static str,
        timestamp: u64,
        role: &'static str,
        entity: Entity,
    },
    #[error("{event} at t={timestamp}: follow-up after {delay} time units overflows the clock")]
    TimestampOverflow {
        event: &'static str,
        timestamp: u64,
        delay: u64,
    },
    #[error("{event} at t={timestamp}: {reason}")]
    PreconditionViolation {
        event: &'static str,
        timestamp: u64,
        reason: String,
    },
}
