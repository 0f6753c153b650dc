use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

use crate::analyzer::IntersectionAnalysis;
use crate::provider::ProviderError;
use crate::queue::SimulationError;
use crate::store::StoreError;
use crate::types::constants::DEFAULT_HORIZON_SECONDS;
use crate::types::{Approach, ApproachKey, RuleSet, SimulationComparison, ValidationError};

pub mod improvements;
pub mod node;

pub use improvements::{improvements_between, recommendations_for};
pub use node::{Comparator, ProposedComparison};

#[cfg(test)]
mod tests;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ComparisonError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("No rule in the {0} rule set matches an approach with traffic")]
    NoApplicableRules(RuleSetLabel),
    #[error("Comparison cancelled")]
    Cancelled,
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SimulationError> for ComparisonError {
    fn from(err: SimulationError) -> Self {
        match err {
            SimulationError::Cancelled => ComparisonError::Cancelled,
            other => ComparisonError::Internal(other.to_string()),
        }
    }
}

/// Which side of a comparison a rule set belongs to
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSetLabel {
    Current,
    Candidate,
}

impl fmt::Display for RuleSetLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSetLabel::Current => write!(f, "current"),
            RuleSetLabel::Candidate => write!(f, "candidate"),
        }
    }
}

fn default_horizon() -> i64 {
    DEFAULT_HORIZON_SECONDS as i64
}

/// Everything needed to compare two rule sets on one intersection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    pub intersection_id: String,
    pub approaches: Vec<Approach>,
    pub current_rules: RuleSet,
    pub candidate_rules: RuleSet,
    #[serde(default = "default_horizon")]
    pub horizon_seconds: i64,
    /// Fixed seed for reproducible runs; a fresh one is drawn when absent
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl ComparisonRequest {
    pub fn new(
        intersection_id: impl Into<String>,
        approaches: Vec<Approach>,
        current_rules: RuleSet,
        candidate_rules: RuleSet,
    ) -> Self {
        Self {
            intersection_id: intersection_id.into(),
            approaches,
            current_rules,
            candidate_rules,
            horizon_seconds: default_horizon(),
            rng_seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_horizon(mut self, horizon_seconds: i64) -> Self {
        self.horizon_seconds = horizon_seconds;
        self
    }

    /// Checks the id, each approach and approach uniqueness.
    ///
    /// The horizon is checked when it is merged into the simulation parameters.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.intersection_id.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "intersection_id" });
        }
        let mut seen = BTreeSet::new();
        for approach in &self.approaches {
            approach.validate()?;
            let key = approach.key();
            if !seen.insert(key.clone()) {
                return Err(ValidationError::DuplicateApproach(key));
            }
        }
        Ok(())
    }

    pub fn total_volume(&self) -> u64 {
        self.approaches.iter().map(Approach::total_volume).sum()
    }
}

/// An approach with traffic that a rule set does not cover.
///
/// The approach is left out of that rule set's aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingRuleWarning {
    pub rule_set: RuleSetLabel,
    pub approach: ApproachKey,
    pub total_volume: u64,
}

impl fmt::Display for MissingRuleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "No {} rule for {} ({} vehicles); excluded from the aggregate",
            self.rule_set, self.approach, self.total_volume
        )
    }
}

/// Result envelope of one comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub intersection_id: String,
    /// Seed actually used; replaying the request with it reproduces the comparison
    pub seed: u64,
    pub analysis: IntersectionAnalysis,
    pub comparison: SimulationComparison,
    pub warnings: Vec<MissingRuleWarning>,
}
