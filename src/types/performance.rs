use serde::{Deserialize, Serialize};
use std::fmt;

use super::ApproachKey;

/// Level of Service grade, ordered from best (A) to worst (F)
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum LevelOfService {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl LevelOfService {
    /// Classifies an average delay in seconds per vehicle.
    ///
    /// Boundary values belong to the better grade (exactly 10 s is `A`).
    pub fn from_delay(average_delay: f64) -> Self {
        if average_delay <= 10.0 {
            LevelOfService::A
        } else if average_delay <= 20.0 {
            LevelOfService::B
        } else if average_delay <= 35.0 {
            LevelOfService::C
        } else if average_delay <= 55.0 {
            LevelOfService::D
        } else if average_delay <= 80.0 {
            LevelOfService::E
        } else {
            LevelOfService::F
        }
    }

    /// Position on the `F, E, D, C, B, A` scale; higher is better
    pub fn rank(&self) -> u8 {
        match self {
            LevelOfService::F => 0,
            LevelOfService::E => 1,
            LevelOfService::D => 2,
            LevelOfService::C => 3,
            LevelOfService::B => 4,
            LevelOfService::A => 5,
        }
    }
}

impl fmt::Display for LevelOfService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            LevelOfService::A => "A",
            LevelOfService::B => "B",
            LevelOfService::C => "C",
            LevelOfService::D => "D",
            LevelOfService::E => "E",
            LevelOfService::F => "F",
        };
        write!(f, "{}", letter)
    }
}

/// Direction of the LOS change between the current and the optimized snapshot
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LosTransition {
    Improved,
    Degraded,
    Maintained,
}

impl LosTransition {
    pub fn between(current: LevelOfService, optimized: LevelOfService) -> Self {
        match optimized.rank().cmp(&current.rank()) {
            std::cmp::Ordering::Greater => LosTransition::Improved,
            std::cmp::Ordering::Less => LosTransition::Degraded,
            std::cmp::Ordering::Equal => LosTransition::Maintained,
        }
    }

    /// Long form, e.g. "Improved from C to B"
    pub fn describe(&self, current: LevelOfService, optimized: LevelOfService) -> String {
        match self {
            LosTransition::Improved => format!("Improved from {} to {}", current, optimized),
            LosTransition::Degraded => format!("Degraded from {} to {}", current, optimized),
            LosTransition::Maintained => format!("Maintained at {}", current),
        }
    }
}

impl fmt::Display for LosTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LosTransition::Improved => write!(f, "improved"),
            LosTransition::Degraded => write!(f, "degraded"),
            LosTransition::Maintained => write!(f, "maintained"),
        }
    }
}

/// Simulated performance of one approach under one rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproachPerformance {
    /// Which approach this record describes
    pub approach: ApproachKey,
    /// Hourly volume of the approach
    pub total_volume: u64,
    /// Mean delay in seconds per vehicle, capped at 120
    pub average_delay_seconds: f64,
    /// Served vehicles per hour
    pub throughput_vph: f64,
    /// Mean number of queued vehicles over the horizon
    pub queue_length: f64,
    /// 0 to 100, higher is better
    pub efficiency_score: f64,
    /// Green time of the applied rule
    pub signal_timing: u32,
    /// Cycle length of the applied rule
    pub cycle_length: u32,
}

/// Volume-weighted performance of the whole intersection under one rule set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionPerformance {
    pub average_delay: f64,
    pub total_throughput: f64,
    pub efficiency: f64,
    pub level_of_service: LevelOfService,
    pub active_approach_count: usize,
}

impl IntersectionPerformance {
    /// Snapshot of an intersection with no active approach
    pub fn idle() -> Self {
        Self {
            average_delay: 0.0,
            total_throughput: 0.0,
            efficiency: 100.0,
            level_of_service: LevelOfService::A,
            active_approach_count: 0,
        }
    }
}

/// Deltas between the current and the optimized snapshot; never negative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Improvements {
    pub delay_reduction_percent: f64,
    pub throughput_increase_percent: f64,
    pub efficiency_improvement: f64,
    pub fuel_savings_percent: f64,
    pub emission_reduction_percent: f64,
    pub los_transition: LosTransition,
}

/// Result of comparing a baseline rule set against a candidate rule set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationComparison {
    pub current: IntersectionPerformance,
    pub optimized: IntersectionPerformance,
    pub improvements: Improvements,
    pub recommendations: Vec<String>,
}
