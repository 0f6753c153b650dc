use chrono::Local;
use intersim::analyzer::{summarize_periods, PeriodSummary};
use intersim::scheduler::JobResult;
use intersim::utils::logging;
use intersim::{Comparator, ComparisonJob, ComparisonScheduler, JobOutcome, SimulationCache};
use serde::Serialize;
use std::sync::Arc;

use crate::config::{Config, TimePeriodsConfig};
use crate::simulation_results::{data_dir, save_json, simulation_id};
use crate::SimulatorError;

pub const RESULTS_DIR: &str = "sim_time_periods";

/// Result row of one count window
#[derive(Debug, Clone, Serialize)]
pub struct PeriodResult {
    pub label: String,
    pub volume: u64,
    /// completed, failed, timed_out or cancelled
    pub status: &'static str,
    pub elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<intersim::ComparisonReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimePeriodsResults {
    pub sim_id: String,
    pub intersection_id: String,
    pub summary: PeriodSummary,
    pub periods: Vec<PeriodResult>,
}

/// Runs one comparison per count window through the comparison scheduler.
///
/// The candidate plan of each window is proposed from that window's counts. A window
/// that fails or times out is reported as such without stopping the others.
pub async fn run_time_periods_simulation() -> Result<(), SimulatorError> {
    let started = Local::now();
    let config = Config::load_time_periods()?;
    let summary = summarize_periods(&config.periods);
    log_period_summary(&summary);

    let jobs = build_jobs(&config).await?;
    let comparator = Comparator::default().with_store(Arc::new(SimulationCache::default()));
    let scheduler = ComparisonScheduler::new(comparator.clone(), config.scheduler.scheduler_config())?;
    println!("Running {} time periods ({} at a time)", jobs.len(), scheduler.config().max_concurrent);

    let results = scheduler.run_batch(jobs).await;
    let periods = period_results(&config, results);
    let completed = periods.iter().filter(|p| p.report.is_some()).count();

    let history = comparator.history(&config.intersection.id).await?;
    logging::log(
        "SIMULATOR",
        &format!("{}/{} periods completed, {} reports kept in history", completed, periods.len(), history.len()),
    );

    let output = TimePeriodsResults {
        sim_id: simulation_id(&config.intersection.id, &started),
        intersection_id: config.intersection.id.clone(),
        summary,
        periods,
    };
    let path = save_json(&data_dir(RESULTS_DIR), &format!("{}.json", output.sim_id), &output)?;
    println!("Time period simulation saved to {}", path.display());
    Ok(())
}

/// One labelled job per window, with the provider's candidate for that window's counts
async fn build_jobs(config: &TimePeriodsConfig) -> Result<Vec<ComparisonJob>, SimulatorError> {
    let provider = config.candidate.provider()?;
    let mut jobs = Vec::with_capacity(config.periods.len());
    for period in &config.periods {
        let proposal = provider
            .propose(&config.intersection.id, &period.approaches, &config.current_rules)
            .await?;
        let request = config
            .intersection
            .request(period.approaches.clone(), &config.current_rules, Some(proposal.rules));
        jobs.push(ComparisonJob::new(period.label.clone(), request));
    }
    Ok(jobs)
}

fn period_results(config: &TimePeriodsConfig, results: Vec<JobResult>) -> Vec<PeriodResult> {
    config
        .periods
        .iter()
        .zip(results)
        .map(|(period, result)| {
            let elapsed_ms = result.elapsed.as_millis() as u64;
            let (status, error, report) = match result.outcome {
                JobOutcome::Completed(report) => ("completed", None, Some(*report)),
                JobOutcome::Failed(e) => ("failed", Some(e.to_string()), None),
                JobOutcome::TimedOut => ("timed_out", None, None),
                JobOutcome::Cancelled => ("cancelled", None, None),
            };
            logging::log("SIMULATOR", &format!("Period {}: {} in {} ms", result.label, status, elapsed_ms));
            PeriodResult { label: result.label, volume: period.total_volume(), status, elapsed_ms, error, report }
        })
        .collect()
}

fn log_period_summary(summary: &PeriodSummary) {
    logging::log("SIMULATOR", "=== Time Period Summary ===");
    logging::log("SIMULATOR", &format!("Periods: {}", summary.period_count));
    logging::log("SIMULATOR", &format!("Total volume: {}", summary.total_volume));
    logging::log(
        "SIMULATOR",
        &format!("Average volume per period: {:.1}", summary.average_volume_per_period),
    );
    for peak in &summary.peak_periods {
        logging::log("SIMULATOR", &format!("Peak period {}: {} vehicles", peak.label, peak.volume));
    }
    if let Some(busiest) = &summary.busiest_period {
        logging::log("SIMULATOR", &format!("Busiest period: {} ({} vehicles)", busiest.label, busiest.volume));
    }
    logging::log("SIMULATOR", "===========================");
}
