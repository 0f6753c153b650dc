use super::*;
use crate::types::{Approach, Direction, MovementCounts, SignalRule};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

mod discharge;

fn approach(thru: i64, left: i64, right: i64) -> Approach {
    Approach::new(
        "Mass Ave",
        Direction::Northbound,
        MovementCounts::new(thru, left, right, 0).unwrap(),
    )
    .unwrap()
}

fn rule(green_time: i64, cycle_length: i64) -> SignalRule {
    SignalRule::new("Mass Ave", Direction::Northbound, green_time, cycle_length, green_time).unwrap()
}
