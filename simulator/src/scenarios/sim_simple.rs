use chrono::Local;
use intersim::utils::logging;
use intersim::{CancellationFlag, Comparator};
use std::time::Instant;

use crate::config::Config;
use crate::simulation_results::SimulationResults;
use crate::SimulatorError;

pub const RESULTS_DIR: &str = "sim_simple";

/// Runs one comparison of the current plan against the configured candidate provider
pub async fn run_simple_simulation() -> Result<(), SimulatorError> {
    let started = Local::now();
    let clock = Instant::now();

    let config = Config::load()?;
    log_configuration(&config, &started);

    let provider = config.candidate.provider()?;
    let proposed = Comparator::default()
        .compare_with_provider(config.request(), provider.as_ref(), CancellationFlag::new())
        .await?;

    for step in &proposed.proposal.steps {
        logging::log("SIMULATOR", &format!("Step {}: {} ({})", step.step, step.action, step.reasoning));
    }

    let results = SimulationResults::new(
        &started,
        proposed.provider,
        config.intersection.horizon_seconds,
        clock.elapsed(),
        proposed.proposal,
        proposed.report,
    );
    results.log_summary();
    let path = results.save(RESULTS_DIR)?;

    println!("Simple simulation saved to {}", path.display());
    Ok(())
}

fn log_configuration(config: &Config, started: &chrono::DateTime<Local>) {
    logging::log("SIMULATOR", "=== Simulation Configuration ===");
    logging::log("SIMULATOR", &format!("Start Time: {}", started.format("%Y-%m-%d %H:%M:%S")));
    logging::log("SIMULATOR", &format!("Intersection: {}", config.intersection.id));
    logging::log("SIMULATOR", &format!("Horizon: {} seconds", config.intersection.horizon_seconds));
    match config.intersection.seed {
        Some(seed) => logging::log("SIMULATOR", &format!("Seed: {}", seed)),
        None => logging::log("SIMULATOR", "Seed: random"),
    }
    logging::log("SIMULATOR", &format!("Candidate source: {:?}", config.candidate.source));
    for approach in &config.intersection.approaches {
        logging::log(
            "SIMULATOR",
            &format!("{}: {} vehicles/hour", approach.key().label(), approach.total_volume()),
        );
    }
    for rule in config.current_rules.iter() {
        logging::log(
            "SIMULATOR",
            &format!("Current rule {}: {} s green of {} s", rule.key().label(), rule.green_time, rule.cycle_length),
        );
    }
    logging::log("SIMULATOR", "=============================");
}
