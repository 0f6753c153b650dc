use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::convert::TryFrom;

use super::{Approach, ApproachKey, Direction, ValidationError};

/// Signal timing for one approach.
///
/// Invariant: all durations are positive and `green_time <= cycle_length`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSignalRule")]
pub struct SignalRule {
    /// Street the rule applies to
    pub street_name: String,
    /// Direction the rule applies to
    pub direction: Direction,
    /// Seconds of green per cycle
    pub green_time: u32,
    /// Seconds of one full red+green cycle
    pub cycle_length: u32,
    /// Seconds of the phase this approach is served in
    pub phase_duration: u32,
}

/// Unvalidated signal rule. `signal_timing` is accepted as an alias for `green_time`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSignalRule {
    pub street_name: String,
    pub direction: Direction,
    #[serde(alias = "signal_timing")]
    pub green_time: i64,
    pub cycle_length: i64,
    pub phase_duration: i64,
}

impl SignalRule {
    pub fn new(
        street_name: impl Into<String>,
        direction: Direction,
        green_time: i64,
        cycle_length: i64,
        phase_duration: i64,
    ) -> Result<Self, ValidationError> {
        let street_name = street_name.into();
        if street_name.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "street_name" });
        }
        let green_time = positive_field("green_time", green_time)?;
        let cycle_length = positive_field("cycle_length", cycle_length)?;
        let phase_duration = positive_field("phase_duration", phase_duration)?;
        if green_time > cycle_length {
            return Err(ValidationError::GreenExceedsCycle { green_time, cycle_length });
        }
        Ok(Self { street_name, direction, green_time, cycle_length, phase_duration })
    }

    pub fn key(&self) -> ApproachKey {
        ApproachKey::new(self.street_name.clone(), self.direction)
    }

    /// Fraction of the cycle that is green
    pub fn green_ratio(&self) -> f64 {
        self.green_time as f64 / self.cycle_length as f64
    }

    pub fn red_time(&self) -> u32 {
        self.cycle_length - self.green_time
    }

    /// Whether the signal shows green at simulated second `t`
    pub fn is_green(&self, t: u64) -> bool {
        t % (self.cycle_length as u64) < self.green_time as u64
    }

    /// Returns a copy with a new green time, keeping the other fields.
    ///
    /// The result is validated again, so a green time beyond the cycle is rejected.
    pub fn with_green_time(&self, green_time: i64) -> Result<Self, ValidationError> {
        SignalRule::new(
            self.street_name.clone(),
            self.direction,
            green_time,
            self.cycle_length as i64,
            self.phase_duration as i64,
        )
    }
}

impl TryFrom<RawSignalRule> for SignalRule {
    type Error = ValidationError;

    fn try_from(raw: RawSignalRule) -> Result<Self, Self::Error> {
        SignalRule::new(raw.street_name, raw.direction, raw.green_time, raw.cycle_length, raw.phase_duration)
    }
}

fn positive_field(field: &'static str, value: i64) -> Result<u32, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NonPositive { field, value });
    }
    u32::try_from(value).map_err(|_| ValidationError::OutOfRange { field, value })
}

/// The complete signal configuration of one intersection under one scenario.
///
/// Serialized as a plain list of rules; at most one rule per approach.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SignalRule>", into = "Vec<SignalRule>")]
pub struct RuleSet {
    rules: BTreeMap<ApproachKey, SignalRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a rule set, rejecting two rules for the same approach
    pub fn from_rules(rules: Vec<SignalRule>) -> Result<Self, ValidationError> {
        let mut set = BTreeMap::new();
        for rule in rules {
            let key = rule.key();
            if set.contains_key(&key) {
                return Err(ValidationError::DuplicateRule(key));
            }
            set.insert(key, rule);
        }
        Ok(Self { rules: set })
    }

    /// Inserts or replaces the rule for the rule's approach, returning the previous one
    pub fn upsert(&mut self, rule: SignalRule) -> Option<SignalRule> {
        self.rules.insert(rule.key(), rule)
    }

    pub fn get(&self, key: &ApproachKey) -> Option<&SignalRule> {
        self.rules.get(key)
    }

    pub fn rule_for(&self, approach: &Approach) -> Option<&SignalRule> {
        self.rules.get(&approach.key())
    }

    pub fn iter(&self) -> impl Iterator<Item = &SignalRule> {
        self.rules.values()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl TryFrom<Vec<SignalRule>> for RuleSet {
    type Error = ValidationError;

    fn try_from(rules: Vec<SignalRule>) -> Result<Self, Self::Error> {
        RuleSet::from_rules(rules)
    }
}

impl From<RuleSet> for Vec<SignalRule> {
    fn from(set: RuleSet) -> Self {
        set.rules.into_values().collect()
    }
}
