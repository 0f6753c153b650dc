use intersim::utils::logging;
use simulator::interface::{SimulationType, SimulatorInterface};
use simulator::simulation_results::RESULTS_ROOT;
use simulator::SimulatorError;
use std::env;
use std::fs;
use std::path::Path;

// ------------------------------------------------------------------------------------------------
// Main
// ------------------------------------------------------------------------------------------------

/// Runs the scenario named on the command line, or asks for one
#[tokio::main]
async fn main() -> Result<(), SimulatorError> {
    fs::create_dir_all(RESULTS_ROOT)?;
    setup_logging();

    let interface = SimulatorInterface::new();
    match env::args().nth(1) {
        Some(arg) => match SimulationType::from_input(&arg) {
            Some(simulation_type) => interface.run(simulation_type).await,
            None => {
                eprintln!("Unknown simulation type: {}", arg);
                eprintln!("{}", interface.get_menu_text());
                std::process::exit(2);
            }
        },
        None => interface.run_interactive().await,
    }
}

/// Sets up logging if ENABLE_LOGS environment variable is set
fn setup_logging() {
    if env::var("ENABLE_LOGS").is_ok() {
        // Start every run with a fresh log file
        let log_path = Path::new(RESULTS_ROOT).join("simulation.log");
        if let Err(e) = fs::remove_file(&log_path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                eprintln!("Error deleting log file: {}", e);
            }
        }

        env::set_var("INTERSIM_LOGGING", "true");
        env::set_var("INTERSIM_LOG_FILE", &log_path);
    }
    logging::init_logging();
}
