use super::*;
use crate::types::{Direction, PeakStatus};

mod approach;

fn approach(name: &str, direction: Direction, thru: i64, left: i64, right: i64, u_turn: i64) -> Approach {
    Approach::new(name, direction, MovementCounts::new(thru, left, right, u_turn).unwrap()).unwrap()
}

fn mass_ave_magazine() -> Vec<Approach> {
    vec![
        approach("Mass Ave", Direction::Northbound, 46, 37, 0, 0),
        approach("Mass Ave", Direction::Southbound, 69, 0, 19, 0),
        approach("Magazine St", Direction::Eastbound, 0, 23, 28, 0),
        approach("Driveway", Direction::Westbound, 0, 0, 0, 0),
    ]
}
