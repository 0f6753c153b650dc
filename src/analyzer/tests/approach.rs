use super::*;

#[test]
fn test_distribution_and_primary_movement() {
    let analysis = analyze_approach(&approach("Mass Ave", Direction::Northbound, 46, 37, 0, 0));
    assert_eq!(analysis.total_volume, 83);
    assert!((analysis.movement_distribution.thru - 46.0 / 83.0 * 100.0).abs() < 1e-9);
    assert_eq!(analysis.movement_distribution.right, 0.0);
    assert_eq!(analysis.primary_movement.movement, Movement::Thru);
    assert_eq!(analysis.primary_movement.volume, 46);
    assert_eq!(analysis.optimization_potential, OptimizationPotential::Medium);
}

/// Tests that ties go to the first movement in declared order
#[test]
fn test_primary_movement_ties() {
    let tie = analyze_approach(&approach("A", Direction::Eastbound, 10, 10, 3, 0));
    assert_eq!(tie.primary_movement.movement, Movement::Thru);

    let tie = analyze_approach(&approach("A", Direction::Eastbound, 0, 5, 5, 5));
    assert_eq!(tie.primary_movement.movement, Movement::Left);

    let empty = analyze_approach(&approach("A", Direction::Eastbound, 0, 0, 0, 0));
    assert_eq!(empty.primary_movement, PrimaryMovement { movement: Movement::Thru, volume: 0, percentage: 0.0 });
    assert_eq!(empty.movement_distribution, MovementDistribution::default());
}

#[test]
fn test_approach_efficiency_rules() {
    let score = |thru, left, right, u_turn| approach_efficiency(&MovementCounts::new(thru, left, right, u_turn).unwrap());
    assert_eq!(score(0, 0, 0, 0), 100.0);
    // one unused movement, balanced enough
    assert_eq!(score(46, 37, 0, 0), 70.0);
    // one unused movement, over-concentrated
    assert_eq!(score(69, 0, 19, 0), 55.0);
    // spread too thin, no unused movement
    assert_eq!(score(25, 25, 25, 25), 70.0);
    // unused u-turns cost nothing
    assert_eq!(score(40, 30, 30, 0), 80.0);
    assert_eq!(score(10, 0, 0, 0), 45.0);
}

#[test]
fn test_optimization_potential_thresholds() {
    assert_eq!(OptimizationPotential::from_volume(50), OptimizationPotential::Low);
    assert_eq!(OptimizationPotential::from_volume(51), OptimizationPotential::Medium);
    assert_eq!(OptimizationPotential::from_volume(100), OptimizationPotential::Medium);
    assert_eq!(OptimizationPotential::from_volume(101), OptimizationPotential::High);
}
