use async_trait::async_trait;

use super::{ProposalStep, ProviderError, RuleProposal, RuleProvider, DEFAULT_CYCLE_LENGTH};
use crate::types::{Approach, RuleSet, SignalRule};

/// Local rule generator working from the raw counts.
///
/// Starting from the current rules it:
/// 1. extends green on the busiest approach when it carries more than `extend_threshold` vehicles,
///    leaving a longer existing green alone
/// 2. cuts every empty approach down to `minimum_green`
/// 3. gives approaches with more than `left_turn_threshold` left turns a protected phase
pub struct HeuristicRuleProvider {
    /// Green given to the busiest approach
    pub extended_green: u32,
    /// Busiest approach must exceed this volume to be extended
    pub extend_threshold: u64,
    /// Green left to approaches without traffic
    pub minimum_green: u32,
    /// Left-turn count above which a protected phase is added
    pub left_turn_threshold: u32,
    /// Seconds added to green and phase for a protected left turn
    pub left_turn_extension: u32,
    /// Cycle of rules created for approaches the baseline does not cover
    pub default_cycle: u32,
}

impl Default for HeuristicRuleProvider {
    fn default() -> Self {
        Self {
            extended_green: 60,
            extend_threshold: 50,
            minimum_green: 5,
            left_turn_threshold: 20,
            left_turn_extension: 10,
            default_cycle: DEFAULT_CYCLE_LENGTH,
        }
    }
}

impl HeuristicRuleProvider {
    /// Rule for `approach` with a new green (and phase), keeping the existing cycle
    fn retimed(&self, rules: &RuleSet, approach: &Approach, green: u32) -> Result<SignalRule, ProviderError> {
        let cycle = rules
            .rule_for(approach)
            .map(|rule| rule.cycle_length)
            .unwrap_or(self.default_cycle);
        let green = green.min(cycle) as i64;
        Ok(SignalRule::new(approach.name.clone(), approach.direction, green, cycle as i64, green)?)
    }

    /// Rule giving `approach` at least `extended_green`, or `None` when its green already reaches it.
    ///
    /// Green and phase only ever grow, both bounded by the cycle.
    fn extended(&self, rules: &RuleSet, approach: &Approach) -> Result<Option<SignalRule>, ProviderError> {
        let Some(current) = rules.rule_for(approach) else {
            return self.retimed(rules, approach, self.extended_green).map(Some);
        };
        let cycle = current.cycle_length;
        let green = current.green_time.max(self.extended_green).min(cycle);
        let phase = current.phase_duration.max(green).min(cycle);
        if green == current.green_time && phase == current.phase_duration {
            return Ok(None);
        }
        Ok(Some(SignalRule::new(
            current.street_name.clone(),
            current.direction,
            green as i64,
            cycle as i64,
            phase as i64,
        )?))
    }
}

#[async_trait]
impl RuleProvider for HeuristicRuleProvider {
    fn name(&self) -> &str {
        "heuristic"
    }

    async fn propose(
        &self,
        intersection_id: &str,
        approaches: &[Approach],
        current_rules: &RuleSet,
    ) -> Result<RuleProposal, ProviderError> {
        let mut rules = current_rules.clone();
        let mut steps: Vec<ProposalStep> = Vec::new();

        let mut busiest: Option<&Approach> = None;
        for approach in approaches {
            if busiest.map_or(true, |b| approach.total_volume() > b.total_volume()) {
                busiest = Some(approach);
            }
        }
        let extension = match busiest.filter(|a| a.total_volume() > self.extend_threshold) {
            Some(approach) => self.extended(&rules, approach)?.map(|rule| (approach, rule)),
            None => None,
        };
        if let Some((approach, rule)) = extension {
            steps.push(ProposalStep {
                step: steps.len() as u32 + 1,
                action: format!("Extend green time for {} to {} seconds", approach.key().label(), rule.green_time),
                reasoning: format!(
                    "This approach has the highest volume ({} vehicles) and needs priority to prevent congestion",
                    approach.total_volume()
                ),
                impact: "Prioritizes the highest volume movement".to_string(),
            });
            rules.upsert(rule);
        }

        for approach in approaches.iter().filter(|a| a.total_volume() == 0) {
            let rule = self.retimed(&rules, approach, self.minimum_green)?;
            let label = approach.key().label();
            steps.push(ProposalStep {
                step: steps.len() as u32 + 1,
                action: format!("Minimize signal time for {} to {} seconds", label, rule.green_time),
                reasoning: format!("{} has zero traffic and is wasting signal cycle time", label),
                impact: "Returns cycle time to the active approaches".to_string(),
            });
            rules.upsert(rule);
        }

        let heavy_left: Vec<&Approach> = approaches
            .iter()
            .filter(|a| a.movement_counts.left > self.left_turn_threshold)
            .collect();
        let mut protected = Vec::new();
        for approach in &heavy_left {
            // Only approaches with a rule can get a protected phase
            let Some(rule) = rules.rule_for(approach).cloned() else {
                continue;
            };
            let cycle = rule.cycle_length;
            let green = (rule.green_time + self.left_turn_extension).min(cycle);
            let phase = (rule.phase_duration + self.left_turn_extension).min(cycle);
            rules.upsert(SignalRule::new(
                rule.street_name.clone(),
                rule.direction,
                green as i64,
                cycle as i64,
                phase as i64,
            )?);
            protected.push(approach);
        }
        if !protected.is_empty() {
            let labels: Vec<String> = protected.iter().map(|a| a.key().label()).collect();
            let left_total: u64 = protected.iter().map(|a| a.movement_counts.left as u64).sum();
            steps.push(ProposalStep {
                step: steps.len() as u32 + 1,
                action: format!("Add protected left-turn phase for {}", labels.join(", ")),
                reasoning: format!("High left-turn volumes ({} vehicles) need dedicated time", left_total),
                impact: "Eliminates left-turn conflicts".to_string(),
            });
        }

        tracing::debug!(intersection_id, steps = steps.len(), "heuristic proposal ready");
        Ok(RuleProposal { rules, steps })
    }
}
