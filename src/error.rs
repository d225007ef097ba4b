//! Error types for stack tower
//!
//! A missed placement is not an error: it ends the game through
//! [`CommitOutcome::Missed`](crate::sim::CommitOutcome). What lives here are
//! configuration mistakes (rejected at construction) and integration bugs.

use thiserror::Error;

use crate::sim::GamePhase;

/// Rejected configuration values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("invalid configuration: {field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("invalid configuration: {field} must be finite")]
    NotFinite { field: &'static str },

    #[error("invalid configuration: max_speed {max} is below base_speed {base}")]
    SpeedCapBelowBase { base: f32, max: f32 },

    #[error("invalid configuration: fragment_retire_y {retire_y} must be below the base block")]
    RetireAboveBase { retire_y: f32 },

    #[error("invalid configuration: {0}")]
    Parse(String),
}

/// Operations invoked outside their contract
///
/// These are integration defects, never part of normal play.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    #[error("invalid state transition: {operation} while {phase:?}")]
    InvalidStateTransition {
        operation: &'static str,
        phase: GamePhase,
    },

    #[error("tower has no base block")]
    EmptyTower,
}
