use async_trait::async_trait;

use super::{ProposalStep, ProviderError, RuleProposal, RuleProvider, DEFAULT_CYCLE_LENGTH};
use crate::types::{Approach, Direction, RuleSet, SignalRule, ValidationError};

/// Returns the same rule set for every request
pub struct StaticRuleProvider {
    rules: RuleSet,
}

impl StaticRuleProvider {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Timing plan of the Mass Ave / Magazine St intersection on a 90 s cycle
    pub fn mass_ave_magazine() -> Result<Self, ValidationError> {
        Ok(Self::new(mass_ave_magazine_rules()?))
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

/// Mass Ave NB 30 s, SB 45 s, Magazine St EB 15 s, Driveway WB 5 s
pub fn mass_ave_magazine_rules() -> Result<RuleSet, ValidationError> {
    let cycle = DEFAULT_CYCLE_LENGTH as i64;
    RuleSet::from_rules(vec![
        SignalRule::new("Mass Ave", Direction::Northbound, 30, cycle, 30)?,
        SignalRule::new("Mass Ave", Direction::Southbound, 45, cycle, 45)?,
        SignalRule::new("Magazine St", Direction::Eastbound, 15, cycle, 15)?,
        SignalRule::new("Driveway", Direction::Westbound, 5, cycle, 5)?,
    ])
}

#[async_trait]
impl RuleProvider for StaticRuleProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn propose(
        &self,
        _intersection_id: &str,
        _approaches: &[Approach],
        _current_rules: &RuleSet,
    ) -> Result<RuleProposal, ProviderError> {
        Ok(RuleProposal {
            rules: self.rules.clone(),
            steps: vec![ProposalStep {
                step: 1,
                action: format!("Apply fixed timing plan with {} rules", self.rules.len()),
                reasoning: "Timing plan configured ahead of time".to_string(),
                impact: "Unchanged across traffic conditions".to_string(),
            }],
        })
    }
}
