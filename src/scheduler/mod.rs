use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::comparator::{ComparisonError, ComparisonReport, ComparisonRequest};

pub mod node;
pub use node::{completed_reports, ComparisonScheduler, JobHandle};

#[cfg(test)]
mod tests;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchedulerError {
    #[error("Invalid concurrency limit: {0}")]
    InvalidConcurrency(usize),
}

/// Limits of the comparison worker pool
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Comparisons allowed to run at the same time
    pub max_concurrent: usize,
    /// Per-job wall-clock limit; the job is cancelled when it runs out
    pub timeout: Option<Duration>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_concurrent: std::thread::available_parallelism().map(|n| n.get()).unwrap_or(4),
            timeout: None,
        }
    }
}

/// A labelled comparison to run on the pool
#[derive(Debug, Clone)]
pub struct ComparisonJob {
    pub label: String,
    pub request: ComparisonRequest,
}

impl ComparisonJob {
    pub fn new(label: impl Into<String>, request: ComparisonRequest) -> Self {
        Self { label: label.into(), request }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    Completed(Box<ComparisonReport>),
    Failed(ComparisonError),
    TimedOut,
    Cancelled,
}

impl JobOutcome {
    pub fn report(&self) -> Option<&ComparisonReport> {
        match self {
            JobOutcome::Completed(report) => Some(&**report),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct JobResult {
    pub label: String,
    pub outcome: JobOutcome,
    /// Time from submission to outcome, including the wait for a free slot
    pub elapsed: Duration,
}
