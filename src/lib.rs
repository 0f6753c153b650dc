//! Discrete-time intersection signal-timing simulator and rule-set comparator.
//!
//! Movement counts and signal rules go in; per-approach queue simulations are
//! folded into volume-weighted intersection snapshots and a baseline rule set is
//! compared against a candidate.

pub mod aggregator;
pub mod analyzer;
pub mod comparator;
pub mod provider;
pub mod queue;
pub mod scheduler;
pub mod store;
pub mod types;
pub mod utils;

pub use comparator::{Comparator, ComparisonError, ComparisonReport, ComparisonRequest};
pub use provider::{ActionTextRuleProvider, HeuristicRuleProvider, RuleProvider, StaticRuleProvider};
pub use queue::{CancellationFlag, QueueSimulator, SimulationParams};
pub use scheduler::{ComparisonJob, ComparisonScheduler, JobOutcome, SchedulerConfig};
pub use store::{ResultStore, SimulationCache};
