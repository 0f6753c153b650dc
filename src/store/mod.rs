use async_trait::async_trait;
use thiserror::Error;

use crate::comparator::ComparisonReport;

pub mod cache;
pub use cache::SimulationCache;

#[cfg(test)]
mod tests;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    #[error("Invalid capacity: {0}")]
    InvalidCapacity(usize),
    #[error("Intersection id must not be empty")]
    EmptyIntersectionId,
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Destination for finished comparisons.
///
/// Handles are passed to the comparator explicitly; there is no process-wide store.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Record a finished comparison under its intersection id
    async fn record(&self, report: ComparisonReport) -> Result<(), StoreError>;

    /// Get the recorded comparisons of an intersection, oldest first
    async fn history(&self, intersection_id: &str) -> Result<Vec<ComparisonReport>, StoreError>;
}
