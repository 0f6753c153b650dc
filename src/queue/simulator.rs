use rand::Rng;

use super::{ArrivalTrace, CancellationFlag, SimulationError, SimulationParams};
use crate::types::constants::{
    EXPECTED_THROUGHPUT_RATIO, MAX_AVERAGE_DELAY_SECONDS, RED_DELAY_FACTOR,
    SATURATION_FLOW_EFFICIENCY,
};
use crate::types::{Approach, ApproachPerformance, SignalRule};

/// Second-by-second queue model of a single approach under a single signal rule.
///
/// Each step adds that second's arrivals to the queue, discharges vehicles if the
/// signal is green, then records the queue. Discharge follows a fixed slot schedule
/// counted over every green second since the start of the run: the `n`-th green
/// second releases `floor((n+1)*rate) - floor(n*rate)` vehicles, so a rate of 0.5
/// serves one vehicle every second green second even across short or odd greens.
#[derive(Debug, Clone, Default)]
pub struct QueueSimulator {
    params: SimulationParams,
}

impl QueueSimulator {
    pub fn new(params: SimulationParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Samples a fresh arrival trace from `rng` and runs it
    pub fn simulate<R: Rng + ?Sized>(
        &self,
        approach: &Approach,
        rule: &SignalRule,
        rng: &mut R,
        cancel: &CancellationFlag,
    ) -> Result<ApproachPerformance, SimulationError> {
        let trace = ArrivalTrace::sample(approach.total_volume(), self.params.horizon_seconds, rng, cancel)?;
        self.simulate_trace(approach, rule, &trace, cancel)
    }

    /// Runs the queue over a given arrival trace.
    ///
    /// The trace must cover the whole horizon; extra entries are ignored.
    pub fn simulate_trace(
        &self,
        approach: &Approach,
        rule: &SignalRule,
        trace: &ArrivalTrace,
        cancel: &CancellationFlag,
    ) -> Result<ApproachPerformance, SimulationError> {
        cancel.check()?;
        let total_volume = approach.total_volume();
        if total_volume == 0 {
            return Ok(idle_performance(approach, rule));
        }

        let horizon = self.params.horizon_seconds;
        if trace.len() < horizon as usize {
            return Err(SimulationError::TraceTooShort { trace_len: trace.len(), horizon_seconds: horizon });
        }

        let cycle = rule.cycle_length as u64;
        let green = rule.green_time as u64;
        let mut queue: u64 = 0;
        let mut queue_sum: u64 = 0;
        let mut green_elapsed: u64 = 0;

        for (t, arrivals) in trace.arrivals().iter().take(horizon as usize).enumerate() {
            cancel.check()?;
            queue += *arrivals as u64;
            if (t as u64 % cycle) < green {
                // the slot clock runs whether or not anyone is waiting
                queue -= queue.min(self.discharge_at(green_elapsed));
                green_elapsed += 1;
            }
            queue_sum += queue;
        }

        let queue_length = queue_sum as f64 / horizon as f64;
        let average_delay = (queue_length + RED_DELAY_FACTOR * rule.red_time() as f64)
            .min(MAX_AVERAGE_DELAY_SECONDS);
        let throughput = total_volume as f64 * rule.green_ratio() * SATURATION_FLOW_EFFICIENCY;

        Ok(ApproachPerformance {
            approach: approach.key(),
            total_volume,
            average_delay_seconds: average_delay,
            throughput_vph: throughput,
            queue_length,
            efficiency_score: efficiency_score(total_volume, average_delay, throughput),
            signal_timing: rule.green_time,
            cycle_length: rule.cycle_length,
        })
    }

    /// Vehicles released at the `green_elapsed`-th green second of the run
    fn discharge_at(&self, green_elapsed: u64) -> u64 {
        let rate = self.params.service_rate;
        let released = ((green_elapsed + 1) as f64 * rate).floor() - (green_elapsed as f64 * rate).floor();
        released.max(0.0) as u64
    }
}

fn idle_performance(approach: &Approach, rule: &SignalRule) -> ApproachPerformance {
    ApproachPerformance {
        approach: approach.key(),
        total_volume: 0,
        average_delay_seconds: 0.0,
        throughput_vph: 0.0,
        queue_length: 0.0,
        efficiency_score: 100.0,
        signal_timing: rule.green_time,
        cycle_length: rule.cycle_length,
    }
}

/// 100 minus a delay penalty above 30 s (at most 50) and a shortfall penalty
/// when throughput stays under 80 % of the volume (at most 30)
pub fn efficiency_score(total_volume: u64, average_delay: f64, throughput: f64) -> f64 {
    if total_volume == 0 {
        return 100.0;
    }
    let mut score = 100.0;
    if average_delay > 30.0 {
        score -= ((average_delay - 30.0) * 2.0).min(50.0);
    }
    let expected = EXPECTED_THROUGHPUT_RATIO * total_volume as f64;
    if throughput < expected {
        score -= (expected - throughput) / expected * 30.0;
    }
    score.clamp(0.0, 100.0)
}
