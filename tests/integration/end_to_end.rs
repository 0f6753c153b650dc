use intersim::analyzer::summarize_periods;
use intersim::queue::ArrivalTrace;
use intersim::types::{Direction, LevelOfService, LosTransition};
use intersim::utils::logging;
use intersim::{
    CancellationFlag, Comparator, ComparisonError, QueueSimulator, ResultStore, SimulationCache,
};
use std::sync::Arc;

use crate::common;

/// Tests the whole pipeline on the reference intersection with longer greens
#[tokio::test]
async fn test_reference_comparison() {
    logging::init_logging();
    logging::log("TEST", "=== Starting test_reference_comparison ===");

    let cache = Arc::new(SimulationCache::default());
    let comparator = Comparator::default().with_store(cache.clone());
    let candidate = common::rules_with_green([40, 60, 25, 5]);

    let report = comparator
        .compare_and_record(common::request(candidate, 11), CancellationFlag::new())
        .await
        .expect("comparison should succeed");
    logging::log("TEST", &format!("Recommendations: {:?}", report.comparison.recommendations));

    let comparison = &report.comparison;
    assert_eq!(comparison.current.active_approach_count, 3);
    assert!(comparison.optimized.average_delay <= comparison.current.average_delay);
    assert!(comparison.improvements.throughput_increase_percent > 0.0);
    assert_ne!(comparison.improvements.los_transition, LosTransition::Degraded);
    assert!(!comparison.recommendations.is_empty());
    assert!(report.warnings.is_empty());

    assert_eq!(report.analysis.optimization_opportunities.len(), 6);
    assert_eq!(cache.history(common::INTERSECTION_ID).await.unwrap(), vec![report]);
}

/// Tests that separate comparators given the same seed print the same JSON
#[test]
fn test_byte_identical_output() {
    let candidate = common::rules_with_green([40, 60, 25, 5]);
    let first = Comparator::default()
        .compare(&common::request(candidate.clone(), 99), &CancellationFlag::new())
        .unwrap();
    let second = Comparator::default()
        .compare(&common::request(candidate, 99), &CancellationFlag::new())
        .unwrap();
    assert_eq!(
        serde_json::to_string_pretty(&first.comparison).unwrap(),
        serde_json::to_string_pretty(&second.comparison).unwrap()
    );
}

#[test]
fn test_self_comparison_over_seeds() {
    for seed in 0..8 {
        let report = Comparator::default()
            .compare(&common::request(common::current_rules(), seed), &CancellationFlag::new())
            .unwrap();
        let improvements = &report.comparison.improvements;
        assert_eq!(improvements.delay_reduction_percent, 0.0, "seed {}", seed);
        assert_eq!(improvements.throughput_increase_percent, 0.0, "seed {}", seed);
        assert_eq!(improvements.efficiency_improvement, 0.0, "seed {}", seed);
        assert_eq!(improvements.los_transition, LosTransition::Maintained, "seed {}", seed);
    }
}

/// Tests the throughput and idle-approach reference values through the public API
#[test]
fn test_reference_values() {
    let simulator = QueueSimulator::default();
    let cancel = CancellationFlag::new();
    let rule = intersim::types::SignalRule::new("Mass Ave", Direction::Northbound, 30, 90, 30).unwrap();
    let busy = common::approach("Mass Ave", Direction::Northbound, 100, 20, 0, 0);
    let perf = simulator
        .simulate_trace(&busy, &rule, &ArrivalTrace::from_arrivals(vec![0; 3600]), &cancel)
        .unwrap();
    assert!((perf.throughput_vph - 34.0).abs() < 1e-9);

    let driveway = common::approach("Driveway", Direction::Westbound, 0, 0, 0, 0);
    let driveway_rule = intersim::types::SignalRule::new("Driveway", Direction::Westbound, 5, 90, 5).unwrap();
    let idle = simulator
        .simulate_trace(&driveway, &driveway_rule, &ArrivalTrace::from_arrivals(vec![]), &cancel)
        .unwrap();
    assert_eq!(idle.efficiency_score, 100.0);
    assert_eq!(idle.average_delay_seconds, 0.0);
    assert_eq!(idle.throughput_vph, 0.0);

    assert_eq!(LevelOfService::from_delay(35.0), LevelOfService::C);
    assert_eq!(LevelOfService::from_delay(35.000001), LevelOfService::D);
}

#[test]
fn test_errors_surface_before_simulation() {
    let mut request = common::request(common::current_rules(), 1);
    request.approaches.push(common::approach("Mass Ave", Direction::Northbound, 1, 0, 0, 0));
    let result = Comparator::default().compare(&request, &CancellationFlag::new());
    assert!(matches!(result, Err(ComparisonError::Validation(_))));

    let bad_counts: Result<intersim::types::MovementCounts, _> =
        serde_json::from_str(r#"{"thru": -1, "left": 0, "right": 0, "u_turn": 0}"#);
    assert!(bad_counts.unwrap_err().to_string().contains("thru"));

    assert!(summarize_periods(&[]).busiest_period.is_none());
}
