use super::action_text::{TimingAction, TimingActionKind};
use super::fixed::mass_ave_magazine_rules;
use super::*;
use crate::types::{ApproachKey, Direction, MovementCounts, SignalRule};


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

fn green(rules: &RuleSet, street: &str, direction: Direction) -> u32 {
    rules.get(&ApproachKey::new(street, direction)).unwrap().green_time
}
