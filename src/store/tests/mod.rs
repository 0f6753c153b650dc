use super::*;
use crate::comparator::{Comparator, ComparisonReport, ComparisonRequest};
use crate::queue::CancellationFlag;
use crate::types::{Approach, Direction, MovementCounts, RuleSet, SignalRule};
use std::sync::Arc;

mod concurrency;

fn report(intersection_id: &str, seed: u64) -> ComparisonReport {
    let approaches = vec![Approach::new("Mass Ave", Direction::Northbound, MovementCounts::new(40, 10, 0, 0).unwrap()).unwrap()];
    let rules = RuleSet::from_rules(vec![SignalRule::new("Mass Ave", Direction::Northbound, 30, 90, 30).unwrap()]).unwrap();
    let request = ComparisonRequest::new(intersection_id, approaches, rules.clone(), rules)
        .with_seed(seed)
        .with_horizon(120);
    Comparator::default().compare(&request, &CancellationFlag::new()).unwrap()
}
