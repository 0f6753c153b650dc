pub mod config;
pub mod interface;
pub mod scenarios;
pub mod simulation_results;

use intersim::provider::ProviderError;
use intersim::scheduler::SchedulerError;
use intersim::ComparisonError;
use thiserror::Error;

pub use config::{Config, ConfigError};
pub use scenarios::run_all_tests::run_all_tests;
pub use scenarios::sim_simple::run_simple_simulation;
pub use scenarios::sim_sweep_green_time::run_sweep_green_time_simulation;
pub use scenarios::sim_time_periods::run_time_periods_simulation;
pub use simulation_results::SimulationResults;

/// Failure of a scenario run
#[derive(Error, Debug)]
pub enum SimulatorError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Comparison failed: {0}")]
    Comparison(#[from] ComparisonError),
    #[error("Rule provider failed: {0}")]
    Provider(#[from] ProviderError),
    #[error("Scheduler setup failed: {0}")]
    Scheduler(#[from] SchedulerError),
    #[error("Failed to write results: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize results: {0}")]
    Serialization(#[from] serde_json::Error),
}
