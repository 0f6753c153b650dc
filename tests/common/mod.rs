#![allow(dead_code)]

//! Shared fixtures: the Mass Ave / Magazine St intersection.

use intersim::provider::fixed::mass_ave_magazine_rules;
use intersim::types::{Approach, Direction, MovementCounts, PeakStatus, RuleSet, SignalRule, TimePeriod};
use intersim::ComparisonRequest;

pub const INTERSECTION_ID: &str = "MASS_AVE_MAGAZINE_ST";

pub fn approach(name: &str, direction: Direction, thru: i64, left: i64, right: i64, u_turn: i64) -> Approach {
    Approach::new(name, direction, MovementCounts::new(thru, left, right, u_turn).expect("valid counts"))
        .expect("valid approach")
}

/// Afternoon counts with an unused driveway
pub fn mass_ave_approaches() -> Vec<Approach> {
    vec![
        approach("Mass Ave", Direction::Northbound, 46, 37, 0, 0),
        approach("Mass Ave", Direction::Southbound, 69, 0, 19, 0),
        approach("Magazine St", Direction::Eastbound, 0, 23, 28, 0),
        approach("Driveway", Direction::Westbound, 0, 0, 0, 0),
    ]
}

pub fn current_rules() -> RuleSet {
    mass_ave_magazine_rules().expect("valid default table")
}

pub fn rules_with_green(green: [i64; 4]) -> RuleSet {
    let keys = [
        ("Mass Ave", Direction::Northbound),
        ("Mass Ave", Direction::Southbound),
        ("Magazine St", Direction::Eastbound),
        ("Driveway", Direction::Westbound),
    ];
    let rules = keys
        .iter()
        .zip(green)
        .map(|((street, direction), green)| SignalRule::new(*street, *direction, green, 90, green).expect("valid rule"))
        .collect();
    RuleSet::from_rules(rules).expect("distinct approaches")
}

pub fn request(candidate: RuleSet, seed: u64) -> ComparisonRequest {
    ComparisonRequest::new(INTERSECTION_ID, mass_ave_approaches(), current_rules(), candidate).with_seed(seed)
}

/// Four 15-minute windows around the morning peak, volumes scaled by `factor`
pub fn morning_periods() -> Vec<TimePeriod> {
    let windows: [(&str, &str, PeakStatus, i64); 4] = [
        ("06:45", "07:00", PeakStatus::OffPeak, 1),
        ("07:00", "07:15", PeakStatus::Peak, 3),
        ("07:15", "07:30", PeakStatus::Peak, 4),
        ("07:30", "07:45", PeakStatus::Peak, 2),
    ];
    windows
        .iter()
        .map(|(start, end, peak_status, factor)| TimePeriod {
            label: format!("{}-{}", start, end),
            start_time: start.to_string(),
            end_time: end.to_string(),
            peak_status: *peak_status,
            approaches: vec![
                approach("Mass Ave", Direction::Northbound, 20 * factor, 10 * factor, 0, 0),
                approach("Mass Ave", Direction::Southbound, 25 * factor, 0, 5 * factor, 0),
                approach("Magazine St", Direction::Eastbound, 0, 8 * factor, 9 * factor, 0),
                approach("Driveway", Direction::Westbound, 0, 0, 0, 0),
            ],
        })
        .collect()
}
