use crate::types::{ApproachPerformance, IntersectionPerformance, LevelOfService};

/// Folds per-approach records into one volume-weighted intersection snapshot.
///
/// Weights are `volume / intersection_volume`, where `intersection_volume` is the
/// total of every approach in the request, including ones that were left out of
/// `records` because their rule was missing. Records with zero volume are ignored.
pub fn aggregate(records: &[ApproachPerformance], intersection_volume: u64) -> IntersectionPerformance {
    let active: Vec<&ApproachPerformance> = records.iter().filter(|r| r.total_volume > 0).collect();
    if active.is_empty() || intersection_volume == 0 {
        return IntersectionPerformance::idle();
    }

    let total = intersection_volume as f64;
    let mut average_delay = 0.0;
    let mut total_throughput = 0.0;
    let mut efficiency = 0.0;
    for record in &active {
        let weight = record.total_volume as f64 / total;
        average_delay += weight * record.average_delay_seconds;
        total_throughput += record.throughput_vph;
        efficiency += weight * record.efficiency_score;
    }

    IntersectionPerformance {
        average_delay,
        total_throughput,
        efficiency,
        level_of_service: LevelOfService::from_delay(average_delay),
        active_approach_count: active.len(),
    }
}
