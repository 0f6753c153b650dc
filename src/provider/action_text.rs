use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;

use super::{ProposalStep, ProviderError, RuleProposal, RuleProvider, DEFAULT_CYCLE_LENGTH};
use crate::types::{Approach, ApproachKey, Direction, RuleSet, SignalRule};

lazy_static! {
    // Expected formats, case-insensitive:
    // Extend green time for <street> <direction> to <n> seconds
    // Minimize signal time for <street> <direction> to <n> seconds
    pub static ref TIMING_ACTION_PATTERN: Regex = Regex::new(
        r"(?i)^\s*(?P<verb>extend green time|minimize signal time)\s+for\s+(?P<street>.+?)\s+(?P<direction>northbound|southbound|eastbound|westbound)\s+to\s+(?P<seconds>\d+)\s*seconds?\b"
    )
    .expect("timing action pattern is valid");
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TimingActionKind {
    ExtendGreen,
    MinimizeSignal,
}

/// A green-time override extracted from one line of text
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TimingAction {
    pub kind: TimingActionKind,
    pub approach: ApproachKey,
    pub seconds: u32,
}

impl TimingAction {
    /// Parses one action line; anything that is not a timing action yields `None`
    pub fn parse(text: &str) -> Option<Self> {
        let captures = TIMING_ACTION_PATTERN.captures(text)?;
        let kind = if captures["verb"].to_ascii_lowercase().starts_with("extend") {
            TimingActionKind::ExtendGreen
        } else {
            TimingActionKind::MinimizeSignal
        };
        let direction: Direction = captures["direction"].parse().ok()?;
        let seconds: u32 = captures["seconds"].parse().ok()?;
        Some(Self {
            kind,
            approach: ApproachKey::new(captures["street"].trim(), direction),
            seconds,
        })
    }
}

/// Turns free-text actions from an external recommender into green-time
/// overrides on top of the current rules.
///
/// Lines that are not timing actions (coordination advice and the like) are skipped.
/// Street names must match the approach names exactly.
pub struct ActionTextRuleProvider {
    actions: Vec<String>,
    default_cycle: u32,
}

impl ActionTextRuleProvider {
    pub fn new(actions: Vec<String>) -> Self {
        Self { actions, default_cycle: DEFAULT_CYCLE_LENGTH }
    }

    pub fn with_default_cycle(mut self, default_cycle: u32) -> Self {
        self.default_cycle = default_cycle;
        self
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }
}

#[async_trait]
impl RuleProvider for ActionTextRuleProvider {
    fn name(&self) -> &str {
        "actions"
    }

    async fn propose(
        &self,
        intersection_id: &str,
        _approaches: &[Approach],
        current_rules: &RuleSet,
    ) -> Result<RuleProposal, ProviderError> {
        let mut rules = current_rules.clone();
        let mut steps = Vec::new();

        for line in &self.actions {
            let Some(action) = TimingAction::parse(line) else {
                tracing::debug!(intersection_id, line = line.as_str(), "skipping non-timing action");
                continue;
            };
            let cycle = rules
                .get(&action.approach)
                .map(|rule| rule.cycle_length)
                .unwrap_or(self.default_cycle);
            let seconds = action.seconds as i64;
            let rule = SignalRule::new(
                action.approach.street_name.clone(),
                action.approach.direction,
                seconds,
                cycle as i64,
                seconds,
            )?;
            steps.push(ProposalStep {
                step: steps.len() as u32 + 1,
                action: line.trim().to_string(),
                reasoning: match action.kind {
                    TimingActionKind::ExtendGreen => "Recommended priority for a busy approach".to_string(),
                    TimingActionKind::MinimizeSignal => "Recommended cut for an idle approach".to_string(),
                },
                impact: format!("Green time of {} set to {} of {} seconds", action.approach, seconds, cycle),
            });
            rules.upsert(rule);
        }

        if steps.is_empty() {
            return Err(ProviderError::NoUsableActions(self.actions.len()));
        }
        Ok(RuleProposal { rules, steps })
    }
}
