//! Volume and movement-distribution analysis of raw approach counts.
//!
//! Everything here is a pure function of the counts; no simulation is involved.

use serde::{Deserialize, Serialize};

use crate::types::constants::{HIGH_VOLUME_THRESHOLD, MEDIUM_VOLUME_THRESHOLD, SEVERE_VOLUME_THRESHOLD};
use crate::types::{Approach, ApproachKey, Movement, MovementCounts, TimePeriod};

#[cfg(test)]
mod tests;

// ------------------------------------------------------------------------------------------------
// Approach analysis
// ------------------------------------------------------------------------------------------------

/// Share of the approach volume per movement, in percent
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementDistribution {
    pub thru: f64,
    pub left: f64,
    pub right: f64,
    pub u_turn: f64,
}

impl MovementDistribution {
    pub fn get(&self, movement: Movement) -> f64 {
        match movement {
            Movement::Thru => self.thru,
            Movement::Left => self.left,
            Movement::Right => self.right,
            Movement::UTurn => self.u_turn,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrimaryMovement {
    pub movement: Movement,
    pub volume: u32,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationPotential {
    Low,
    Medium,
    High,
}

impl OptimizationPotential {
    pub fn from_volume(total_volume: u64) -> Self {
        if total_volume > HIGH_VOLUME_THRESHOLD {
            OptimizationPotential::High
        } else if total_volume > MEDIUM_VOLUME_THRESHOLD {
            OptimizationPotential::Medium
        } else {
            OptimizationPotential::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproachAnalysis {
    pub approach: ApproachKey,
    pub total_volume: u64,
    pub movement_distribution: MovementDistribution,
    pub primary_movement: PrimaryMovement,
    pub efficiency_score: f64,
    pub optimization_potential: OptimizationPotential,
}

pub fn analyze_approach(approach: &Approach) -> ApproachAnalysis {
    let counts = &approach.movement_counts;
    let total_volume = counts.total();
    let distribution = movement_distribution(counts);

    // Strict comparison keeps the first movement in declared order on ties
    let mut primary = Movement::Thru;
    for (movement, count) in counts.iter() {
        if count > counts.get(primary) {
            primary = movement;
        }
    }

    ApproachAnalysis {
        approach: approach.key(),
        total_volume,
        movement_distribution: distribution,
        primary_movement: PrimaryMovement {
            movement: primary,
            volume: counts.get(primary),
            percentage: distribution.get(primary),
        },
        efficiency_score: approach_efficiency(counts),
        optimization_potential: OptimizationPotential::from_volume(total_volume),
    }
}

pub fn movement_distribution(counts: &MovementCounts) -> MovementDistribution {
    let total = counts.total();
    if total == 0 {
        return MovementDistribution::default();
    }
    let share = |count: u32| count as f64 / total as f64 * 100.0;
    MovementDistribution {
        thru: share(counts.thru),
        left: share(counts.left),
        right: share(counts.right),
        u_turn: share(counts.u_turn),
    }
}

/// Static efficiency of a movement mix, 0 to 100.
///
/// Starts at 80, loses 10 per unused movement (u-turns excluded), 15 when one
/// movement carries over 70 % of the volume and 10 when none carries 30 %.
pub fn approach_efficiency(counts: &MovementCounts) -> f64 {
    let total = counts.total();
    if total == 0 {
        return 100.0;
    }

    let unused = counts
        .iter()
        .filter(|(movement, count)| *movement != Movement::UTurn && *count == 0)
        .count();
    let mut penalty = unused as f64 * 10.0;

    let concentration = counts.max() as f64 / total as f64;
    if concentration > 0.7 {
        penalty += 15.0;
    } else if concentration < 0.3 {
        penalty += 10.0;
    }

    (80.0 - penalty).clamp(0.0, 100.0)
}

// ------------------------------------------------------------------------------------------------
// Bottlenecks and opportunities
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BottleneckSeverity {
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bottleneck {
    pub approach: ApproachKey,
    pub issue: String,
    pub severity: BottleneckSeverity,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationOpportunity {
    pub approach: ApproachKey,
    pub movement: Movement,
    pub opportunity: String,
    pub impact: String,
}

/// Flags an approach carrying more than 100 vehicles
pub fn bottleneck_for(analysis: &ApproachAnalysis) -> Option<Bottleneck> {
    if analysis.total_volume <= HIGH_VOLUME_THRESHOLD {
        return None;
    }
    let severity = if analysis.total_volume > SEVERE_VOLUME_THRESHOLD {
        BottleneckSeverity::High
    } else {
        BottleneckSeverity::Medium
    };
    Some(Bottleneck {
        approach: analysis.approach.clone(),
        issue: "High traffic volume".to_string(),
        severity,
        recommendation: "Consider signal timing optimization".to_string(),
    })
}

/// One opportunity per unused movement, u-turns excluded
pub fn opportunities_for(approach: &Approach) -> Vec<OptimizationOpportunity> {
    approach
        .movement_counts
        .iter()
        .filter(|(movement, count)| *movement != Movement::UTurn && *count == 0)
        .map(|(movement, _)| OptimizationOpportunity {
            approach: approach.key(),
            movement,
            opportunity: "Unused movement - can optimize signal timing".to_string(),
            impact: "Reduce signal cycle time".to_string(),
        })
        .collect()
}

// ------------------------------------------------------------------------------------------------
// Intersection analysis
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionAnalysis {
    pub intersection_id: String,
    pub total_volume: u64,
    pub approaches: Vec<ApproachAnalysis>,
    pub bottlenecks: Vec<Bottleneck>,
    pub optimization_opportunities: Vec<OptimizationOpportunity>,
    pub intersection_efficiency: f64,
    pub current_issues: Vec<String>,
}

/// Analyzes every approach of an intersection in input order
pub fn analyze_intersection(intersection_id: &str, approaches: &[Approach]) -> IntersectionAnalysis {
    let analyses: Vec<ApproachAnalysis> = approaches.iter().map(analyze_approach).collect();
    let bottlenecks = analyses.iter().filter_map(bottleneck_for).collect();
    let optimization_opportunities = approaches.iter().flat_map(opportunities_for).collect();

    IntersectionAnalysis {
        intersection_id: intersection_id.to_string(),
        total_volume: approaches.iter().map(Approach::total_volume).sum(),
        approaches: analyses,
        bottlenecks,
        optimization_opportunities,
        intersection_efficiency: intersection_efficiency(approaches),
        current_issues: current_issues(approaches),
    }
}

/// 100 minus 20 per unused approach, minus 15 more when the quietest approach
/// carries under a tenth of the busiest; never below 0
pub fn intersection_efficiency(approaches: &[Approach]) -> f64 {
    let volumes: Vec<u64> = approaches.iter().map(Approach::total_volume).collect();
    if volumes.iter().sum::<u64>() == 0 {
        return 100.0;
    }

    let unused = volumes.iter().filter(|v| **v == 0).count();
    let mut efficiency = 100.0 - unused as f64 * 20.0;
    if is_imbalanced(&volumes) {
        efficiency -= 15.0;
    }
    efficiency.max(0.0)
}

fn is_imbalanced(volumes: &[u64]) -> bool {
    let max = volumes.iter().copied().max().unwrap_or(0);
    let min = volumes.iter().copied().min().unwrap_or(0);
    max > 0 && (min as f64 / max as f64) < 0.1
}

/// Human-readable problems found in the counts
pub fn current_issues(approaches: &[Approach]) -> Vec<String> {
    let mut issues = Vec::new();
    for approach in approaches {
        let volume = approach.total_volume();
        if volume > HIGH_VOLUME_THRESHOLD {
            issues.push(format!("High traffic volume on {} ({} vehicles)", approach.key(), volume));
        }
    }
    for approach in approaches {
        if approach.total_volume() == 0 {
            issues.push(format!("Unused approach: {} - wasting signal time", approach.key()));
        }
    }
    let volumes: Vec<u64> = approaches.iter().map(Approach::total_volume).collect();
    if is_imbalanced(&volumes) {
        issues.push("Highly imbalanced traffic distribution".to_string());
    }
    issues
}

// ------------------------------------------------------------------------------------------------
// Period summary
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodVolume {
    pub label: String,
    pub volume: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub period_count: usize,
    pub total_volume: u64,
    /// Periods marked as peak, in input order
    pub peak_periods: Vec<PeriodVolume>,
    /// Period with the highest volume; first one wins on ties
    pub busiest_period: Option<PeriodVolume>,
    pub average_volume_per_period: f64,
}

pub fn summarize_periods(periods: &[TimePeriod]) -> PeriodSummary {
    let mut total_volume = 0;
    let mut peak_periods = Vec::new();
    let mut busiest_period: Option<PeriodVolume> = None;

    for period in periods {
        let volume = period.total_volume();
        total_volume += volume;
        if period.is_peak() {
            peak_periods.push(PeriodVolume { label: period.label.clone(), volume });
        }
        if busiest_period.as_ref().map_or(true, |b| volume > b.volume) {
            busiest_period = Some(PeriodVolume { label: period.label.clone(), volume });
        }
    }

    let average_volume_per_period = if periods.is_empty() {
        0.0
    } else {
        total_volume as f64 / periods.len() as f64
    };

    PeriodSummary {
        period_count: periods.len(),
        total_volume,
        peak_periods,
        busiest_period,
        average_volume_per_period,
    }
}
