use std::io::{self, Write};

use crate::SimulatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationType {
    Simple,
    SweepGreenTime,
    TimePeriods,
    RunAllTests,
    Exit,
}

impl SimulationType {
    /// Accepts the menu number or the scenario name given on the command line
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim() {
            "1" | "simple" => Some(SimulationType::Simple),
            "2" | "sweep_green_time" => Some(SimulationType::SweepGreenTime),
            "3" | "time_periods" => Some(SimulationType::TimePeriods),
            "4" | "all" => Some(SimulationType::RunAllTests),
            "0" | "exit" => Some(SimulationType::Exit),
            _ => None,
        }
    }
}

pub struct SimulatorInterface;

impl Default for SimulatorInterface {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatorInterface {
    pub fn new() -> Self {
        Self
    }

    pub fn get_menu_text(&self) -> &'static str {
        "Available simulation types:\n  1. Simple comparison\n  2. Sweep green time\n  3. Time periods\n  4. Run All Tests\n  0. Exit"
    }

    pub fn show_menu(&self) {
        println!("=== Intersection Simulator ===");
        println!("{}", self.get_menu_text());
    }

    pub fn get_user_choice(&self) -> Option<SimulationType> {
        print!("\nSelect simulation type (0-4): ");
        let _ = io::stdout().flush();

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            // closed stdin
            Ok(0) | Err(_) => Some(SimulationType::Exit),
            Ok(_) => SimulationType::from_input(&input),
        }
    }

    /// Runs one scenario
    pub async fn run(&self, simulation_type: SimulationType) -> Result<(), SimulatorError> {
        match simulation_type {
            SimulationType::Simple => {
                crate::run_simple_simulation().await?;
                println!("Simple simulation completed successfully!");
            }
            SimulationType::SweepGreenTime => {
                crate::run_sweep_green_time_simulation().await?;
                println!("Sweep green time simulation completed successfully!");
            }
            SimulationType::TimePeriods => {
                crate::run_time_periods_simulation().await?;
                println!("Time period simulation completed successfully!");
            }
            SimulationType::RunAllTests => crate::run_all_tests().await?,
            SimulationType::Exit => println!("Exiting..."),
        }
        Ok(())
    }

    /// Shows the menu until a valid choice is made, then runs it
    pub async fn run_interactive(&self) -> Result<(), SimulatorError> {
        self.show_menu();
        loop {
            match self.get_user_choice() {
                Some(simulation_type) => return self.run(simulation_type).await,
                None => {
                    println!("Invalid choice. Please enter 1, 2, 3, 4, or 0 to exit.");
                    println!("{}", self.get_menu_text());
                }
            }
        }
    }
}
