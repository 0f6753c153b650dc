use intersim::utils::logging;
use intersim::Comparator;

use crate::config::Config;
use crate::scenarios::sweep_runner::SweepRunner;
use crate::SimulatorError;

pub const RESULTS_DIR: &str = "sim_sweep_green_time";

/// Sweeps the green time of one approach while every other rule stays at its current value.
///
/// All sweep points share one seed, so each point replays the same arrivals and the
/// curve reflects the timing change alone. Without a configured seed one is drawn
/// for the whole sweep.
pub async fn run_sweep_green_time_simulation() -> Result<(), SimulatorError> {
    let config = Config::load_sweep_green_time()?;
    let seed = config.intersection.seed.unwrap_or_else(rand::random);
    logging::log(
        "SIMULATOR",
        &format!("Sweeping green time of {} with seed {}", config.sweep.approach_key().label(), seed),
    );

    let runner = SweepRunner::new("Green Time", RESULTS_DIR, "green_time", config.sweep.green_times());
    let comparator = Comparator::default();

    let points = runner
        .run(&comparator, |green_time| {
            let candidate = config.candidate_rules(*green_time)?;
            Ok(config
                .intersection
                .request(config.intersection.approaches.clone(), &config.current_rules, Some(candidate))
                .with_seed(seed))
        })
        .await?;

    runner.save_sweep_results(&config.intersection.id, &points)?;
    Ok(())
}
