use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

use crate::types::constants::{DEFAULT_HORIZON_SECONDS, DEFAULT_SERVICE_RATE};
use crate::types::ValidationError;

pub mod simulator;
pub mod trace;

pub use simulator::QueueSimulator;
pub use trace::ArrivalTrace;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationError {
    #[error("Simulation cancelled")]
    Cancelled,
    #[error("Invalid arrival rate: {0}")]
    InvalidArrivalRate(f64),
    #[error("Arrival trace covers {trace_len} seconds but the horizon is {horizon_seconds}")]
    TraceTooShort { trace_len: usize, horizon_seconds: u32 },
}

/// Tunables of one queue simulation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Number of simulated one-second steps
    pub horizon_seconds: u32,
    /// Discharge capacity during green, vehicles per second
    pub service_rate: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            horizon_seconds: DEFAULT_HORIZON_SECONDS,
            service_rate: DEFAULT_SERVICE_RATE,
        }
    }
}

impl SimulationParams {
    pub fn new(horizon_seconds: i64, service_rate: f64) -> Result<Self, ValidationError> {
        if horizon_seconds <= 0 {
            return Err(ValidationError::NonPositive { field: "horizon_seconds", value: horizon_seconds });
        }
        let horizon_seconds = u32::try_from(horizon_seconds)
            .map_err(|_| ValidationError::OutOfRange { field: "horizon_seconds", value: horizon_seconds })?;
        let params = Self { horizon_seconds, service_rate };
        params.validate()?;
        Ok(params)
    }

    pub fn with_horizon(self, horizon_seconds: i64) -> Result<Self, ValidationError> {
        SimulationParams::new(horizon_seconds, self.service_rate)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.horizon_seconds == 0 {
            return Err(ValidationError::NonPositive { field: "horizon_seconds", value: 0 });
        }
        if !self.service_rate.is_finite() || self.service_rate <= 0.0 {
            return Err(ValidationError::InvalidRate { field: "service_rate", value: self.service_rate });
        }
        Ok(())
    }
}

/// Shared flag a long-running simulation polls between iterations.
///
/// Clones observe the same flag, so the scheduler keeps one clone and hands
/// another to the worker.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub(crate) fn check(&self) -> Result<(), SimulationError> {
        if self.is_cancelled() {
            return Err(SimulationError::Cancelled);
        }
        Ok(())
    }
}
