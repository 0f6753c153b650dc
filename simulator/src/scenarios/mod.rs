pub mod sim_simple;
pub mod sim_sweep_green_time;
pub mod sim_time_periods;
pub mod sweep_runner;
