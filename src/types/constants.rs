//! Fixed model coefficients shared by the simulator, aggregator and comparator.

/// Simulated seconds per run when the caller does not pick a horizon
pub const DEFAULT_HORIZON_SECONDS: u32 = 3600;

/// Movement counts are hourly volumes; arrival rate is volume over this many seconds
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Discharge capacity during green, vehicles per second (2 s headway)
pub const DEFAULT_SERVICE_RATE: f64 = 0.5;

/// Discount applied to theoretical throughput
pub const SATURATION_FLOW_EFFICIENCY: f64 = 0.85;

/// Share of the red time an average vehicle waits
pub const RED_DELAY_FACTOR: f64 = 0.5;

/// Average delay never reported above two minutes
pub const MAX_AVERAGE_DELAY_SECONDS: f64 = 120.0;

/// Share of the volume that should be served before throughput is penalized
pub const EXPECTED_THROUGHPUT_RATIO: f64 = 0.8;

/// Fuel saved per point of delay reduction
pub const FUEL_SAVINGS_FACTOR: f64 = 0.3;

/// Emissions avoided per point of delay reduction
pub const EMISSION_REDUCTION_FACTOR: f64 = 0.25;

/// Recommendation thresholds
pub const DELAY_REDUCTION_THRESHOLD: f64 = 20.0;
pub const THROUGHPUT_INCREASE_THRESHOLD: f64 = 15.0;
pub const EFFICIENCY_IMPROVEMENT_THRESHOLD: f64 = 10.0;
pub const FUEL_SAVINGS_THRESHOLD: f64 = 5.0;
pub const EMISSION_REDUCTION_THRESHOLD: f64 = 5.0;

/// Approach volume above which it is flagged as a bottleneck
pub const HIGH_VOLUME_THRESHOLD: u64 = 100;
/// Bottleneck volume above which severity becomes high
pub const SEVERE_VOLUME_THRESHOLD: u64 = 150;
/// Approach volume above which optimization potential is medium
pub const MEDIUM_VOLUME_THRESHOLD: u64 = 50;

/// Bounded history kept per intersection by the in-process cache
pub const DEFAULT_CACHE_CAPACITY: usize = 10;
