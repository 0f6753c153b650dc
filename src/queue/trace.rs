use rand::Rng;
use rand_distr::{Distribution, Poisson};
use serde::{Deserialize, Serialize};

use super::{CancellationFlag, SimulationError};
use crate::types::constants::SECONDS_PER_HOUR;

/// Per-second vehicle arrivals for one approach.
///
/// A trace is sampled once per approach and replayed under every rule set
/// of a comparison, so both sides see the same traffic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrivalTrace {
    arrivals: Vec<u32>,
}

impl ArrivalTrace {
    /// Draws `horizon_seconds` Poisson arrivals at `total_volume / 3600` vehicles per second.
    ///
    /// A zero volume yields an all-zero trace without consuming randomness.
    pub fn sample<R: Rng + ?Sized>(
        total_volume: u64,
        horizon_seconds: u32,
        rng: &mut R,
        cancel: &CancellationFlag,
    ) -> Result<Self, SimulationError> {
        cancel.check()?;
        if total_volume == 0 {
            return Ok(Self { arrivals: vec![0; horizon_seconds as usize] });
        }

        let arrival_rate = total_volume as f64 / SECONDS_PER_HOUR;
        let poisson = Poisson::new(arrival_rate)
            .map_err(|_| SimulationError::InvalidArrivalRate(arrival_rate))?;

        let mut arrivals = Vec::with_capacity(horizon_seconds as usize);
        for _ in 0..horizon_seconds {
            cancel.check()?;
            let draw: f64 = poisson.sample(rng);
            arrivals.push(draw as u32);
        }
        Ok(Self { arrivals })
    }

    /// Wraps a hand-built trace, one entry per simulated second
    pub fn from_arrivals(arrivals: Vec<u32>) -> Self {
        Self { arrivals }
    }

    pub fn arrivals(&self) -> &[u32] {
        &self.arrivals
    }

    pub fn len(&self) -> usize {
        self.arrivals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrivals.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.arrivals.iter().map(|a| *a as u64).sum()
    }
}
