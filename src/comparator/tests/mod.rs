use super::*;
use crate::provider::fixed::mass_ave_magazine_rules;
use crate::provider::{HeuristicRuleProvider, StaticRuleProvider};
use crate::queue::{CancellationFlag, SimulationParams};
use crate::store::{ResultStore, SimulationCache};
use crate::types::{Direction, IntersectionPerformance, LevelOfService, LosTransition, MovementCounts, SignalRule};
use std::sync::Arc;


const INTERSECTION: &str = "MASS_AVE_MAGAZINE_ST";

fn approaches() -> Vec<Approach> {
    let approach = |name: &str, direction, thru, left, right| {
        Approach::new(name, direction, MovementCounts::new(thru, left, right, 0).unwrap()).unwrap()
    };
    vec![
        approach("Mass Ave", Direction::Northbound, 46, 37, 0),
        approach("Mass Ave", Direction::Southbound, 69, 0, 19),
        approach("Magazine St", Direction::Eastbound, 0, 23, 28),
        approach("Driveway", Direction::Westbound, 0, 0, 0),
    ]
}

fn longer_greens() -> RuleSet {
    RuleSet::from_rules(vec![
        SignalRule::new("Mass Ave", Direction::Northbound, 40, 90, 40).unwrap(),
        SignalRule::new("Mass Ave", Direction::Southbound, 60, 90, 60).unwrap(),
        SignalRule::new("Magazine St", Direction::Eastbound, 25, 90, 25).unwrap(),
        SignalRule::new("Driveway", Direction::Westbound, 5, 90, 5).unwrap(),
    ])
    .unwrap()
}

fn request(candidate: RuleSet) -> ComparisonRequest {
    ComparisonRequest::new(INTERSECTION, approaches(), mass_ave_magazine_rules().unwrap(), candidate).with_seed(17)
}

fn performance(average_delay: f64, total_throughput: f64, efficiency: f64) -> IntersectionPerformance {
    IntersectionPerformance {
        average_delay,
        total_throughput,
        efficiency,
        level_of_service: LevelOfService::from_delay(average_delay),
        active_approach_count: 3,
    }
}
