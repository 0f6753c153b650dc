use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Approach, RuleSet, ValidationError};

pub mod action_text;
pub mod heuristic;
pub mod fixed;

pub use action_text::ActionTextRuleProvider;
pub use fixed::StaticRuleProvider;
pub use heuristic::HeuristicRuleProvider;

#[cfg(test)]
mod tests;

/// Cycle used for rules a provider creates from scratch
pub const DEFAULT_CYCLE_LENGTH: u32 = 90;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Invalid proposed rule: {0}")]
    Validation(#[from] ValidationError),
    #[error("No usable action in {0} lines")]
    NoUsableActions(usize),
    #[error("Provider unavailable: {0}")]
    Unavailable(String),
}

/// One numbered step of a proposal, as shown to an operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalStep {
    pub step: u32,
    pub action: String,
    pub reasoning: String,
    pub impact: String,
}

/// Candidate rule set plus the steps that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleProposal {
    pub rules: RuleSet,
    pub steps: Vec<ProposalStep>,
}

/// Source of candidate rule sets.
///
/// Implementations may be a fixed table, a local heuristic or an external
/// recommender; the comparator only sees the resulting [`RuleSet`].
#[async_trait]
pub trait RuleProvider: Send + Sync {
    /// Short name used in logs and result files
    fn name(&self) -> &str;

    /// Propose a candidate rule set for the given counts and baseline rules
    async fn propose(
        &self,
        intersection_id: &str,
        approaches: &[Approach],
        current_rules: &RuleSet,
    ) -> Result<RuleProposal, ProviderError>;
}
