use thiserror::Error;

pub mod constants;
pub mod movement;
pub mod performance;
pub mod period;
pub mod rule;

pub use movement::{Approach, ApproachKey, Direction, Movement, MovementCounts};
pub use performance::{
    ApproachPerformance, Improvements, IntersectionPerformance, LevelOfService, LosTransition,
    SimulationComparison,
};
pub use period::{PeakStatus, TimePeriod};
pub use rule::{RuleSet, SignalRule};

#[cfg(test)]
mod tests;

/// Errors raised when an input value fails validation.
///
/// Every variant names the offending field so callers can map it back to the request.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("Field '{field}' must not be negative (got {value})")]
    NegativeCount { field: &'static str, value: i64 },
    #[error("Field '{field}' must be positive (got {value})")]
    NonPositive { field: &'static str, value: i64 },
    #[error("Field '{field}' is out of range (got {value})")]
    OutOfRange { field: &'static str, value: i64 },
    #[error("Field 'green_time' ({green_time}) exceeds field 'cycle_length' ({cycle_length})")]
    GreenExceedsCycle { green_time: u32, cycle_length: u32 },
    #[error("Field '{field}' must not be empty")]
    EmptyField { field: &'static str },
    #[error("Field '{field}' must be a positive finite number (got {value})")]
    InvalidRate { field: &'static str, value: f64 },
    #[error("Duplicate rule for approach {0}")]
    DuplicateRule(ApproachKey),
    #[error("Duplicate approach {0}")]
    DuplicateApproach(ApproachKey),
    #[error("Unknown direction: {0}")]
    UnknownDirection(String),
}
