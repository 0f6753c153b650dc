use super::*;

/// Tests the reference throughput: 120 veh/h, 30 s green of a 90 s cycle
#[test]
fn test_reference_throughput() {
    let simulator = QueueSimulator::default();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let perf = simulator
        .simulate(&approach(80, 40, 0), &rule(30, 90), &mut rng, &CancellationFlag::new())
        .unwrap();
    assert!((perf.throughput_vph - 34.0).abs() < 1e-9, "throughput was {}", perf.throughput_vph);
    assert_eq!(perf.total_volume, 120);
    assert_eq!(perf.cycle_length, 90);
}

/// Tests that more green never increases delay or queue for fixed arrivals
#[test]
fn test_green_time_monotonicity() {
    let simulator = QueueSimulator::default();
    let cancel = CancellationFlag::new();
    let heavy = approach(600, 200, 100);

    for seed in 0..10u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let trace = ArrivalTrace::sample(heavy.total_volume(), 3600, &mut rng, &cancel).unwrap();

        let mut previous: Option<(f64, f64)> = None;
        for green in (5..=90).step_by(5) {
            let perf = simulator.simulate_trace(&heavy, &rule(green, 90), &trace, &cancel).unwrap();
            if let Some((delay, queue)) = previous {
                assert!(
                    perf.average_delay_seconds <= delay,
                    "seed {} green {}: delay rose from {} to {}",
                    seed, green, delay, perf.average_delay_seconds
                );
                assert!(perf.queue_length <= queue, "seed {} green {}: queue rose", seed, green);
            }
            previous = Some((perf.average_delay_seconds, perf.queue_length));
        }
    }
}

/// Tests that oversaturated approaches report at most two minutes of delay
#[test]
fn test_delay_is_capped() {
    let simulator = QueueSimulator::default();
    let trace = ArrivalTrace::from_arrivals(vec![1; 3600]);
    let perf = simulator
        .simulate_trace(&approach(3600, 0, 0), &rule(30, 90), &trace, &CancellationFlag::new())
        .unwrap();
    assert_eq!(perf.average_delay_seconds, 120.0);
    assert!(perf.queue_length > 120.0);
    // 50 points for delay, 19.375 for serving 1020 of the expected 2880
    assert!((perf.efficiency_score - 30.625).abs() < 1e-9, "efficiency was {}", perf.efficiency_score);
}

/// Tests the efficiency score on an empty trace: only the throughput shortfall counts
#[test]
fn test_efficiency_from_handmade_trace() {
    let simulator = QueueSimulator::default();
    let trace = ArrivalTrace::from_arrivals(vec![0; 3600]);
    let perf = simulator
        .simulate_trace(&approach(80, 40, 0), &rule(30, 90), &trace, &CancellationFlag::new())
        .unwrap();
    assert_eq!(perf.queue_length, 0.0);
    assert_eq!(perf.average_delay_seconds, 30.0);
    assert!((perf.efficiency_score - 80.625).abs() < 1e-9, "efficiency was {}", perf.efficiency_score);
}

/// Tests the fractional discharge schedule at 0.5 veh/s
#[test]
fn test_fractional_discharge_schedule() {
    let simulator = QueueSimulator::new(SimulationParams::new(4, 0.5).unwrap());
    let trace = ArrivalTrace::from_arrivals(vec![2, 0, 0, 0]);
    let perf = simulator
        .simulate_trace(&approach(10, 0, 0), &rule(4, 10), &trace, &CancellationFlag::new())
        .unwrap();
    // recorded queue: 2, 1, 1, 0
    assert_eq!(perf.queue_length, 1.0);
    assert_eq!(perf.average_delay_seconds, 4.0);
}

/// Tests that a one-second green still serves the queue over successive cycles
#[test]
fn test_one_second_green_discharges() {
    let simulator = QueueSimulator::default();
    let mut arrivals = vec![0; 3600];
    arrivals[0] = 1;
    let perf = simulator
        .simulate_trace(&approach(10, 0, 0), &rule(1, 2), &ArrivalTrace::from_arrivals(arrivals), &CancellationFlag::new())
        .unwrap();
    // served in the second green second, at t=2
    assert!((perf.queue_length - 2.0 / 3600.0).abs() < 1e-12, "queue was {}", perf.queue_length);
    assert!((perf.average_delay_seconds - (2.0 / 3600.0 + 0.5)).abs() < 1e-12);
}

/// Tests that odd greens average the full service rate across cycles
#[test]
fn test_odd_green_carries_half_vehicle() {
    let simulator = QueueSimulator::new(SimulationParams::new(180, 0.5).unwrap());
    let mut arrivals = vec![0; 180];
    arrivals[0] = 31;
    let perf = simulator
        .simulate_trace(&approach(10, 0, 0), &rule(31, 90), &ArrivalTrace::from_arrivals(arrivals), &CancellationFlag::new())
        .unwrap();
    // 15 served in the first green and 16 in the second, the last one at t=120
    assert!((perf.queue_length * 180.0 - 1905.0).abs() < 1e-9, "queue was {}", perf.queue_length);
}

/// Tests that an approach without traffic is perfect under any rule
#[test]
fn test_zero_volume_is_idle() {
    let simulator = QueueSimulator::default();
    let empty = approach(0, 0, 0);
    let cancel = CancellationFlag::new();
    for (green, cycle) in [(5, 90), (45, 90), (90, 90), (1, 120)] {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let perf = simulator.simulate(&empty, &rule(green, cycle), &mut rng, &cancel).unwrap();
        assert_eq!(perf.average_delay_seconds, 0.0);
        assert_eq!(perf.throughput_vph, 0.0);
        assert_eq!(perf.queue_length, 0.0);
        assert_eq!(perf.efficiency_score, 100.0);
        assert_eq!(perf.signal_timing, green as u32);
    }
}
