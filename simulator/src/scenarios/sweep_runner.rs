use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use intersim::types::IntersectionPerformance;
use intersim::utils::logging;
use intersim::{CancellationFlag, Comparator, ComparisonReport, ComparisonRequest};
use serde::Serialize;
use std::fmt::Debug;
use std::path::PathBuf;

use crate::simulation_results::{data_dir, save_json, simulation_id};
use crate::SimulatorError;

/// Generic sweep runner shared by the sweep scenarios.
///
/// Each parameter value is turned into one comparison request; the requests run
/// one after another and every report is kept next to the value that produced it.
pub struct SweepRunner<T> {
    sweep_name: String,
    results_dir: String,
    parameter_name: String,
    parameter_values: Vec<T>,
}

/// One point of a finished sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint<T> {
    pub value: T,
    pub report: ComparisonReport,
}

impl<T: Debug + Clone + Serialize> SweepRunner<T> {
    pub fn new(sweep_name: &str, results_dir: &str, parameter_name: &str, parameter_values: Vec<T>) -> Self {
        Self {
            sweep_name: sweep_name.to_string(),
            results_dir: results_dir.to_string(),
            parameter_name: parameter_name.to_string(),
            parameter_values,
        }
    }

    pub fn parameter_values(&self) -> &[T] {
        &self.parameter_values
    }

    /// Runs the complete sweep, saving each report under `data/sim_<index>.json`
    pub async fn run<F>(&self, comparator: &Comparator, request_for: F) -> Result<Vec<SweepPoint<T>>, SimulatorError>
    where
        F: Fn(&T) -> Result<ComparisonRequest, SimulatorError>,
    {
        let num_simulations = self.parameter_values.len();
        self.log_sweep_start();
        println!("Running Sweep: {}", self.sweep_name);

        let progress_bar = self.create_progress_bar(num_simulations);
        let mut points = Vec::with_capacity(num_simulations);

        for (sim_index, value) in self.parameter_values.iter().enumerate() {
            logging::log(
                "SIMULATOR",
                &format!("Running simulation {}/{} with {}: {:?}", sim_index + 1, num_simulations, self.parameter_name, value),
            );

            let request = request_for(value)?;
            let report = comparator.compare_and_record(request, CancellationFlag::new()).await.map_err(|e| {
                logging::log(
                    "SIMULATOR",
                    &format!(
                        "Sweep '{}' failed during simulation {}/{} with {}: {:?}. Error: {}",
                        self.sweep_name,
                        sim_index + 1,
                        num_simulations,
                        self.parameter_name,
                        value,
                        e
                    ),
                );
                e
            })?;

            save_json(&data_dir(&self.results_dir), &format!("sim_{}.json", sim_index), &report)?;
            points.push(SweepPoint { value: value.clone(), report });

            progress_bar.inc(1);
            progress_bar.set_message(self.format_progress_message(sim_index, num_simulations, value));
        }

        progress_bar.finish();
        println!("Sweep simulation complete");

        logging::log("SIMULATOR", "=== Sweep Simulation Complete ===");
        logging::log("SIMULATOR", &format!("Total simulations completed: {}", points.len()));
        Ok(points)
    }

    fn create_progress_bar(&self, num_simulations: usize) -> ProgressBar {
        let progress_bar = ProgressBar::new(num_simulations as u64);
        let style = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("+>-");
        progress_bar.set_style(style);
        progress_bar
    }

    fn log_sweep_start(&self) {
        logging::log("SIMULATOR", &format!("=== Sweep {} Simulation ===", self.sweep_name));
        logging::log("SIMULATOR", &format!("Start Time: {}", Local::now().format("%Y-%m-%d %H:%M:%S")));
        logging::log("SIMULATOR", &format!("Number of simulations: {}", self.parameter_values.len()));
        logging::log("SIMULATOR", &format!("{} values: {:?}", self.parameter_name, self.parameter_values));
        logging::log("SIMULATOR", "================================");
    }

    fn format_progress_message(&self, sim_index: usize, total_sims: usize, value: &T) -> String {
        format!("Simulation {}/{} with {}: {:?}", sim_index + 1, total_sims, self.parameter_name, value)
    }

    /// Saves the combined `sweep_results.json` of a finished sweep
    pub fn save_sweep_results(&self, intersection_id: &str, points: &[SweepPoint<T>]) -> Result<PathBuf, SimulatorError> {
        let combined = sweep_results_json(&self.parameter_name, intersection_id, points);
        save_json(&data_dir(&self.results_dir), "sweep_results.json", &combined)
    }
}

fn optimized<T>(point: &SweepPoint<T>) -> &IntersectionPerformance {
    &point.report.comparison.optimized
}

/// Combined view of a sweep: one array per metric in the summary plus one object per run
pub fn sweep_results_json<T: Serialize>(
    parameter_name: &str,
    intersection_id: &str,
    points: &[SweepPoint<T>],
) -> serde_json::Value {
    serde_json::json!({
        "sweep_summary": {
            "sim_id": simulation_id(intersection_id, &Local::now()),
            "num_simulations": points.len(),
            (format!("{}s", parameter_name)): points.iter().map(|p| &p.value).collect::<Vec<_>>(),
            "seeds": points.iter().map(|p| p.report.seed).collect::<Vec<_>>(),
            "current_average_delay": points.first().map(|p| p.report.comparison.current.average_delay),
            "average_delays": points.iter().map(|p| optimized(p).average_delay).collect::<Vec<_>>(),
            "total_throughputs": points.iter().map(|p| optimized(p).total_throughput).collect::<Vec<_>>(),
            "efficiencies": points.iter().map(|p| optimized(p).efficiency).collect::<Vec<_>>(),
            "levels_of_service": points.iter().map(|p| optimized(p).level_of_service).collect::<Vec<_>>(),
        },
        "individual_results": points.iter().map(|p| {
            let mut entry = serde_json::Map::new();
            entry.insert(parameter_name.to_string(), serde_json::json!(p.value));
            entry.insert("improvements".to_string(), serde_json::json!(p.report.comparison.improvements));
            entry.insert("recommendations".to_string(), serde_json::json!(p.report.comparison.recommendations));
            entry.insert("warnings".to_string(), serde_json::json!(p.report.warnings));
            serde_json::Value::Object(entry)
        }).collect::<Vec<_>>(),
    })
}
