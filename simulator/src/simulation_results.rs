use chrono::{DateTime, Local};
use intersim::provider::RuleProposal;
use intersim::utils::logging;
use intersim::ComparisonReport;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::SimulatorError;

/// Root of every scenario's output
pub const RESULTS_ROOT: &str = "simulator/results";

/// Id of one run, e.g. `sim_mass_ave_magazine_20240315_073000`
pub fn simulation_id(intersection_id: &str, at: &DateTime<Local>) -> String {
    format!("sim_{}_{}", intersection_id, at.format("%Y%m%d_%H%M%S"))
}

/// `simulator/results/<scenario>/data`
pub fn data_dir(scenario: &str) -> PathBuf {
    Path::new(RESULTS_ROOT).join(scenario).join("data")
}

/// Writes `value` as pretty JSON to `<dir>/<file_name>`, creating the directory first
pub fn save_json<T: Serialize>(dir: &Path, file_name: &str, value: &T) -> Result<PathBuf, SimulatorError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    fs::write(&path, serde_json::to_string_pretty(value)?)?;
    logging::log("SIMULATOR", &format!("Saved results to {}", path.display()));
    Ok(path)
}

/// Outcome of one provider-driven comparison
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResults {
    pub sim_id: String,
    /// Local wall-clock start, `YYYY-mm-dd HH:MM:SS`
    pub started_at: String,
    pub provider: String,
    pub horizon_seconds: i64,
    pub elapsed_ms: u64,
    pub proposal: RuleProposal,
    pub report: ComparisonReport,
}

impl SimulationResults {
    pub fn new(
        started: &DateTime<Local>,
        provider: impl Into<String>,
        horizon_seconds: i64,
        elapsed: Duration,
        proposal: RuleProposal,
        report: ComparisonReport,
    ) -> Self {
        Self {
            sim_id: simulation_id(&report.intersection_id, started),
            started_at: started.format("%Y-%m-%d %H:%M:%S").to_string(),
            provider: provider.into(),
            horizon_seconds,
            elapsed_ms: elapsed.as_millis() as u64,
            proposal,
            report,
        }
    }

    /// Logs the headline numbers of the comparison
    pub fn log_summary(&self) {
        let comparison = &self.report.comparison;
        let improvements = &comparison.improvements;
        logging::log("SIMULATOR", "=== Simulation Statistics ===");
        logging::log("SIMULATOR", &format!("Simulation: {}", self.sim_id));
        logging::log("SIMULATOR", &format!("Seed: {}", self.report.seed));
        logging::log(
            "SIMULATOR",
            &format!(
                "Average delay: {:.2} s -> {:.2} s ({:.1}% reduction)",
                comparison.current.average_delay, comparison.optimized.average_delay, improvements.delay_reduction_percent
            ),
        );
        logging::log(
            "SIMULATOR",
            &format!(
                "Throughput: {:.1} vph -> {:.1} vph ({:.1}% increase)",
                comparison.current.total_throughput,
                comparison.optimized.total_throughput,
                improvements.throughput_increase_percent
            ),
        );
        logging::log(
            "SIMULATOR",
            &format!(
                "Level of service: {}",
                improvements
                    .los_transition
                    .describe(comparison.current.level_of_service, comparison.optimized.level_of_service)
            ),
        );
        for warning in &self.report.warnings {
            logging::log("SIMULATOR", &format!("Warning: {}", warning));
        }
        for recommendation in &comparison.recommendations {
            logging::log("SIMULATOR", &format!("Recommendation: {}", recommendation));
        }
        logging::log("SIMULATOR", "===========================");
    }

    /// Saves `<sim_id>.json` under the scenario's data directory
    pub fn save(&self, scenario: &str) -> Result<PathBuf, SimulatorError> {
        save_json(&data_dir(scenario), &format!("{}.json", self.sim_id), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_simulation_id_format() {
        let at = Local.with_ymd_and_hms(2024, 3, 15, 7, 30, 5).unwrap();
        assert_eq!(simulation_id("mass_ave_magazine", &at), "sim_mass_ave_magazine_20240315_073005");
        assert_eq!(data_dir("sim_simple"), Path::new("simulator/results/sim_simple/data"));
    }
}
