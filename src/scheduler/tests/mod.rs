use super::*;
use crate::comparator::{Comparator, ComparisonRequest};
use crate::queue::CancellationFlag;
use crate::store::{ResultStore, SimulationCache};
use crate::types::{Approach, Direction, MovementCounts, RuleSet, SignalRule, ValidationError};
use crate::utils::logging;
use std::sync::Arc;

mod cancellation;

fn request(seed: u64, green: i64) -> ComparisonRequest {
    let approaches = vec![
        Approach::new("Mass Ave", Direction::Northbound, MovementCounts::new(300, 80, 20, 0).unwrap()).unwrap(),
        Approach::new("Mass Ave", Direction::Southbound, MovementCounts::new(250, 0, 60, 0).unwrap()).unwrap(),
    ];
    let rules = |green: i64| {
        RuleSet::from_rules(vec![
            SignalRule::new("Mass Ave", Direction::Northbound, green, 90, green).unwrap(),
            SignalRule::new("Mass Ave", Direction::Southbound, green, 90, green).unwrap(),
        ])
        .unwrap()
    };
    ComparisonRequest::new("MASS_AVE", approaches, rules(30), rules(green)).with_seed(seed)
}

/// A request long enough that it is still sampling when it gets cancelled
fn slow_request() -> ComparisonRequest {
    request(1, 45).with_horizon(5_000_000)
}

fn scheduler(max_concurrent: usize, timeout: Option<Duration>) -> ComparisonScheduler {
    ComparisonScheduler::new(Comparator::default(), SchedulerConfig { max_concurrent, timeout }).unwrap()
}
