use intersim::analyzer::summarize_periods;
use intersim::scheduler::completed_reports;
use intersim::utils::logging;
use intersim::{
    Comparator, ComparisonJob, ComparisonRequest, ComparisonScheduler, HeuristicRuleProvider,
    RuleProvider, SchedulerConfig,
};

use crate::common;

/// Tests one comparison per count window through the scheduler
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_period_batch() {
    logging::init_logging();
    logging::log("TEST", "=== Starting test_period_batch ===");

    let periods = common::morning_periods();
    let heuristic = HeuristicRuleProvider::default();
    let mut jobs = Vec::new();
    for (i, period) in periods.iter().enumerate() {
        let proposal = heuristic
            .propose(common::INTERSECTION_ID, &period.approaches, &common::current_rules())
            .await
            .unwrap();
        let request = ComparisonRequest::new(
            common::INTERSECTION_ID,
            period.approaches.clone(),
            common::current_rules(),
            proposal.rules,
        )
        .with_seed(i as u64)
        .with_horizon(900);
        jobs.push(ComparisonJob::new(period.label.clone(), request));
    }

    let scheduler = ComparisonScheduler::new(
        Comparator::default(),
        SchedulerConfig { max_concurrent: 2, timeout: None },
    )
    .unwrap();
    let results = scheduler.run_batch(jobs).await;

    let labels: Vec<&str> = results.iter().map(|r| r.label.as_str()).collect();
    let expected: Vec<&str> = periods.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, expected);
    assert_eq!(completed_reports(&results).len(), periods.len());

    let summary = summarize_periods(&periods);
    assert_eq!(summary.total_volume, 770);
    assert_eq!(summary.peak_periods.len(), 3);
    assert_eq!(summary.busiest_period.unwrap().label, "07:15-07:30");
    assert_eq!(summary.average_volume_per_period, 192.5);
}
