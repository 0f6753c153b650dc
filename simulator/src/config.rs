//! Configuration loader and validator for the intersection simulator.
//! Handles parsing, validation, and access to scenario configuration files.

use intersim::provider::{ActionTextRuleProvider, HeuristicRuleProvider, RuleProvider, StaticRuleProvider};
use intersim::types::constants::DEFAULT_HORIZON_SECONDS;
use intersim::types::{Approach, ApproachKey, Direction, RuleSet, SignalRule, TimePeriod};
use intersim::{ComparisonRequest, SchedulerConfig};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_SIMPLE_PATH: &str = "simulator/src/scenarios/config_simple.toml";
pub const CONFIG_SWEEP_GREEN_TIME_PATH: &str = "simulator/src/scenarios/config_sweep_green_time.toml";
pub const CONFIG_TIME_PERIODS_PATH: &str = "simulator/src/scenarios/config_time_periods.toml";

// ------------------------------------------------------------------------------------------------
// Main Configuration Structs
// ------------------------------------------------------------------------------------------------

/// Configuration of a single baseline-versus-candidate comparison.
///
/// It is also the shape the other scenarios extend: every scenario names an
/// intersection and its current signal plan.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Intersection identity, counts and run settings
    pub intersection: IntersectionConfig,
    /// Signal plan in operation today
    pub current_rules: RuleSet,
    /// Where the candidate plan comes from
    pub candidate: CandidateConfig,
}

/// The intersection under study.
#[derive(Debug, Deserialize, Clone)]
pub struct IntersectionConfig {
    /// Identifier used in result files and the history cache
    pub id: String,
    /// Simulated seconds per run
    #[serde(default = "default_horizon")]
    pub horizon_seconds: i64,
    /// Fixed seed for reproducible runs; drawn at random when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Hourly movement counts per approach (unused by the time-period scenario)
    #[serde(default)]
    pub approaches: Vec<Approach>,
}

fn default_horizon() -> i64 {
    DEFAULT_HORIZON_SECONDS as i64
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CandidateSource {
    /// A fixed plan, given inline or the built-in Mass Ave / Magazine St plan
    Static,
    /// The local counts-based heuristic
    Heuristic,
    /// Free-text timing actions such as "Extend green time for Mass Ave Southbound to 60 seconds"
    Actions,
}

/// Configuration of the candidate rule provider.
#[derive(Debug, Deserialize, Clone)]
pub struct CandidateConfig {
    pub source: CandidateSource,
    /// Action lines, used with `source = "actions"`
    #[serde(default)]
    pub actions: Vec<String>,
    /// Inline plan, used with `source = "static"`
    #[serde(default)]
    pub rules: RuleSet,
}

impl CandidateConfig {
    pub fn provider(&self) -> Result<Box<dyn RuleProvider>, ConfigError> {
        let provider: Box<dyn RuleProvider> = match self.source {
            CandidateSource::Static if self.rules.is_empty() => Box::new(
                StaticRuleProvider::mass_ave_magazine().map_err(|e| ConfigError::ValidationError(e.to_string()))?,
            ),
            CandidateSource::Static => Box::new(StaticRuleProvider::new(self.rules.clone())),
            CandidateSource::Heuristic => Box::new(HeuristicRuleProvider::default()),
            CandidateSource::Actions => Box::new(ActionTextRuleProvider::new(self.actions.clone())),
        };
        Ok(provider)
    }
}

// ------------------------------------------------------------------------------------------------
// Sweep Configuration Structs
// ------------------------------------------------------------------------------------------------

/// Green times to try on one approach.
///
/// Run `i` uses `green_start + i * green_step` seconds; every other rule stays
/// at its current value.
#[derive(Debug, Deserialize, Clone)]
pub struct SweepParameters {
    pub street_name: String,
    pub direction: Direction,
    pub green_start: u32,
    pub green_step: u32,
    pub num_simulations: usize,
}

impl SweepParameters {
    pub fn approach_key(&self) -> ApproachKey {
        ApproachKey::new(self.street_name.clone(), self.direction)
    }

    pub fn green_times(&self) -> Vec<u32> {
        (0..self.num_simulations)
            .map(|i| self.green_start + i as u32 * self.green_step)
            .collect()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SweepGreenTimeConfig {
    pub intersection: IntersectionConfig,
    pub current_rules: RuleSet,
    pub sweep: SweepParameters,
}

// ------------------------------------------------------------------------------------------------
// Time Period Configuration Structs
// ------------------------------------------------------------------------------------------------

/// Worker pool limits for batch scenarios
#[derive(Debug, Deserialize, Clone)]
pub struct SchedulerSettings {
    pub max_concurrent: usize,
    /// Per-comparison limit in milliseconds; unlimited when absent
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl SchedulerSettings {
    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            max_concurrent: self.max_concurrent,
            timeout: self.timeout_ms.map(Duration::from_millis),
        }
    }
}

/// One comparison per count window, run through the scheduler.
#[derive(Debug, Deserialize, Clone)]
pub struct TimePeriodsConfig {
    pub intersection: IntersectionConfig,
    pub current_rules: RuleSet,
    pub candidate: CandidateConfig,
    pub scheduler: SchedulerSettings,
    pub periods: Vec<TimePeriod>,
}

// ------------------------------------------------------------------------------------------------
// Error Types and Validation
// ------------------------------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// Trait for common validation functionality
pub trait ValidateConfig {
    fn validate_common(&self) -> Result<(), ConfigError>;
    fn validate_scenario_specific(&self) -> Result<(), ConfigError>;

    fn validate(&self) -> Result<(), ConfigError> {
        self.validate_common()?;
        self.validate_scenario_specific()?;
        Ok(())
    }
}

// Common validation logic
pub fn validate_common_fields(
    intersection: &IntersectionConfig,
    current_rules: &RuleSet,
    approaches: &[Approach],
) -> Result<(), ConfigError> {
    if intersection.horizon_seconds <= 0 {
        return Err(ConfigError::ValidationError("Horizon seconds must be positive".into()));
    }
    if current_rules.is_empty() {
        return Err(ConfigError::ValidationError("Current rules must not be empty".into()));
    }
    if approaches.is_empty() {
        return Err(ConfigError::ValidationError("At least one approach is required".into()));
    }
    // id, approach names and duplicate approaches are checked by the request itself
    ComparisonRequest::new(intersection.id.clone(), approaches.to_vec(), current_rules.clone(), current_rules.clone())
        .validate()
        .map_err(|e| ConfigError::ValidationError(e.to_string()))
}

fn validate_candidate(candidate: &CandidateConfig) -> Result<(), ConfigError> {
    if candidate.source == CandidateSource::Actions && candidate.actions.is_empty() {
        return Err(ConfigError::ValidationError("Candidate source 'actions' needs at least one action".into()));
    }
    Ok(())
}

impl ValidateConfig for Config {
    fn validate_common(&self) -> Result<(), ConfigError> {
        validate_common_fields(&self.intersection, &self.current_rules, &self.intersection.approaches)
    }

    fn validate_scenario_specific(&self) -> Result<(), ConfigError> {
        validate_candidate(&self.candidate)
    }
}

impl ValidateConfig for SweepGreenTimeConfig {
    fn validate_common(&self) -> Result<(), ConfigError> {
        validate_common_fields(&self.intersection, &self.current_rules, &self.intersection.approaches)
    }

    fn validate_scenario_specific(&self) -> Result<(), ConfigError> {
        let sweep = &self.sweep;
        if sweep.num_simulations == 0 {
            return Err(ConfigError::ValidationError("Number of simulations must be positive".into()));
        }
        if sweep.green_start == 0 || sweep.green_step == 0 {
            return Err(ConfigError::ValidationError("Green start and green step must be positive".into()));
        }
        let key = sweep.approach_key();
        if !self.intersection.approaches.iter().any(|a| a.key() == key) {
            return Err(ConfigError::ValidationError(format!("Swept approach {} is not among the approaches", key)));
        }
        let rule = self
            .current_rules
            .get(&key)
            .ok_or_else(|| ConfigError::ValidationError(format!("Swept approach {} has no current rule", key)))?;
        let last_green = sweep.green_start as u64 + (sweep.num_simulations as u64 - 1) * sweep.green_step as u64;
        if last_green > rule.cycle_length as u64 {
            return Err(ConfigError::ValidationError(format!(
                "Last swept green time ({} s) exceeds the cycle length ({} s)",
                last_green, rule.cycle_length
            )));
        }
        Ok(())
    }
}

impl ValidateConfig for TimePeriodsConfig {
    fn validate_common(&self) -> Result<(), ConfigError> {
        if self.periods.is_empty() {
            return Err(ConfigError::ValidationError("At least one time period is required".into()));
        }
        for period in &self.periods {
            if period.label.trim().is_empty() {
                return Err(ConfigError::ValidationError("Time period labels must not be empty".into()));
            }
            validate_common_fields(&self.intersection, &self.current_rules, &period.approaches)
                .map_err(|e| ConfigError::ValidationError(format!("Period '{}': {}", period.label, e)))?;
        }
        Ok(())
    }

    fn validate_scenario_specific(&self) -> Result<(), ConfigError> {
        if self.scheduler.max_concurrent == 0 {
            return Err(ConfigError::ValidationError("Max concurrent comparisons must be positive".into()));
        }
        if self.scheduler.timeout_ms == Some(0) {
            return Err(ConfigError::ValidationError("Timeout must be positive when set".into()));
        }
        validate_candidate(&self.candidate)
    }
}

// ------------------------------------------------------------------------------------------------
// Configuration Implementation Methods
// ------------------------------------------------------------------------------------------------

/// Parses and validates a scenario file's contents
pub fn parse_config<T: DeserializeOwned + ValidateConfig>(text: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

fn load_config<T: DeserializeOwned + ValidateConfig>(path: &str) -> Result<T, ConfigError> {
    let config_str = fs::read_to_string(path)?;
    parse_config(&config_str)
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        load_config(CONFIG_SIMPLE_PATH)
    }

    pub fn load_sweep_green_time() -> Result<SweepGreenTimeConfig, ConfigError> {
        load_config(CONFIG_SWEEP_GREEN_TIME_PATH)
    }

    pub fn load_time_periods() -> Result<TimePeriodsConfig, ConfigError> {
        load_config(CONFIG_TIME_PERIODS_PATH)
    }

    /// Comparison request with the current plan on both sides; the provider fills in the candidate
    pub fn request(&self) -> ComparisonRequest {
        self.intersection.request(self.intersection.approaches.clone(), &self.current_rules, None)
    }
}

impl IntersectionConfig {
    /// Builds a request for `approaches`, comparing `current_rules` with `candidate_rules`
    /// (or with themselves when no candidate is given yet)
    pub fn request(
        &self,
        approaches: Vec<Approach>,
        current_rules: &RuleSet,
        candidate_rules: Option<RuleSet>,
    ) -> ComparisonRequest {
        let candidate = candidate_rules.unwrap_or_else(|| current_rules.clone());
        let request = ComparisonRequest::new(self.id.clone(), approaches, current_rules.clone(), candidate)
            .with_horizon(self.horizon_seconds);
        match self.seed {
            Some(seed) => request.with_seed(seed),
            None => request,
        }
    }
}

impl SweepGreenTimeConfig {
    /// Candidate plan for one sweep point: the current plan with the swept approach retimed
    pub fn candidate_rules(&self, green_time: u32) -> Result<RuleSet, ConfigError> {
        let key = self.sweep.approach_key();
        let rule: &SignalRule = self
            .current_rules
            .get(&key)
            .ok_or_else(|| ConfigError::ValidationError(format!("Swept approach {} has no current rule", key)))?;
        let retimed = rule
            .with_green_time(green_time as i64)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        let mut rules = self.current_rules.clone();
        rules.upsert(retimed);
        Ok(rules)
    }
}
