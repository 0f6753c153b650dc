use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{
    improvements_between, recommendations_for, ComparisonError, ComparisonReport, ComparisonRequest,
    MissingRuleWarning, RuleSetLabel,
};
use crate::aggregator::aggregate;
use crate::analyzer::analyze_intersection;
use crate::provider::{RuleProposal, RuleProvider};
use crate::queue::{ArrivalTrace, CancellationFlag, QueueSimulator, SimulationParams};
use crate::store::ResultStore;
use crate::types::{IntersectionPerformance, RuleSet, SimulationComparison};

/// Comparison whose candidate rules came from a [`RuleProvider`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedComparison {
    /// Name of the provider that produced the candidate
    pub provider: String,
    pub proposal: RuleProposal,
    pub report: ComparisonReport,
}

/// Runs a baseline and a candidate rule set over the same arrivals and diffs the results.
///
/// Arrival traces are drawn once per approach, in request order, from a `ChaCha8Rng`
/// seeded with the request seed. Both rule sets replay the same traces, so comparing
/// a rule set with itself yields zero improvement.
#[derive(Clone, Default)]
pub struct Comparator {
    /// Base simulation parameters; the request horizon overrides the horizon
    params: SimulationParams,
    /// Optional destination for finished reports
    store: Option<Arc<dyn ResultStore>>,
}

impl Comparator {
    pub fn new(params: SimulationParams) -> Self {
        Self { params, store: None }
    }

    pub fn with_store(mut self, store: Arc<dyn ResultStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Synchronous comparison; CPU bound, so async callers should use
    /// [`Comparator::compare_and_record`] or the scheduler instead
    pub fn compare(
        &self,
        request: &ComparisonRequest,
        cancel: &CancellationFlag,
    ) -> Result<ComparisonReport, ComparisonError> {
        request.validate()?;
        self.params.validate()?;
        let params = self.params.with_horizon(request.horizon_seconds)?;
        let simulator = QueueSimulator::new(params);

        let seed = request.rng_seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        tracing::debug!(intersection_id = %request.intersection_id, seed, horizon = params.horizon_seconds, "starting comparison");

        let analysis = analyze_intersection(&request.intersection_id, &request.approaches);

        let mut traces = Vec::with_capacity(request.approaches.len());
        for approach in &request.approaches {
            traces.push(ArrivalTrace::sample(approach.total_volume(), params.horizon_seconds, &mut rng, cancel)?);
        }

        let mut warnings = Vec::new();
        let current = run_rule_set(
            &simulator,
            request,
            &traces,
            RuleSetLabel::Current,
            &request.current_rules,
            cancel,
            &mut warnings,
        )?;
        let optimized = run_rule_set(
            &simulator,
            request,
            &traces,
            RuleSetLabel::Candidate,
            &request.candidate_rules,
            cancel,
            &mut warnings,
        )?;

        let improvements = improvements_between(&current, &optimized);
        let recommendations = recommendations_for(&improvements);
        tracing::info!(
            intersection_id = %request.intersection_id,
            seed,
            current_delay = current.average_delay,
            optimized_delay = optimized.average_delay,
            los = %improvements.los_transition.describe(current.level_of_service, optimized.level_of_service),
            warnings = warnings.len(),
            "comparison finished"
        );

        Ok(ComparisonReport {
            intersection_id: request.intersection_id.clone(),
            seed,
            analysis,
            comparison: SimulationComparison { current, optimized, improvements, recommendations },
            warnings,
        })
    }

    /// Runs the comparison on the blocking pool and records the report in the store, if any
    pub async fn compare_and_record(
        &self,
        request: ComparisonRequest,
        cancel: CancellationFlag,
    ) -> Result<ComparisonReport, ComparisonError> {
        let comparator = self.clone();
        let report = tokio::task::spawn_blocking(move || comparator.compare(&request, &cancel))
            .await
            .map_err(|e| ComparisonError::Internal(format!("Comparison worker failed: {}", e)))??;

        self.record(&report).await?;
        Ok(report)
    }

    /// Stores a report when a store is attached; a no-op otherwise
    pub async fn record(&self, report: &ComparisonReport) -> Result<(), ComparisonError> {
        if let Some(store) = &self.store {
            store.record(report.clone()).await?;
        }
        Ok(())
    }

    /// Asks `provider` for the candidate rules, replacing `request.candidate_rules`, then compares
    pub async fn compare_with_provider(
        &self,
        mut request: ComparisonRequest,
        provider: &dyn RuleProvider,
        cancel: CancellationFlag,
    ) -> Result<ProposedComparison, ComparisonError> {
        let proposal = provider
            .propose(&request.intersection_id, &request.approaches, &request.current_rules)
            .await?;
        tracing::debug!(
            intersection_id = %request.intersection_id,
            provider = provider.name(),
            steps = proposal.steps.len(),
            "candidate rules proposed"
        );
        request.candidate_rules = proposal.rules.clone();

        let report = self.compare_and_record(request, cancel).await?;
        Ok(ProposedComparison { provider: provider.name().to_string(), proposal, report })
    }

    /// Recorded reports of an intersection; empty without a store
    pub async fn history(&self, intersection_id: &str) -> Result<Vec<ComparisonReport>, ComparisonError> {
        match &self.store {
            Some(store) => Ok(store.history(intersection_id).await?),
            None => Ok(Vec::new()),
        }
    }
}

/// Simulates every covered approach under one rule set and aggregates.
///
/// Approaches with traffic but no rule become warnings. If traffic exists and no
/// approach with traffic is covered at all, the rule set does not apply.
fn run_rule_set(
    simulator: &QueueSimulator,
    request: &ComparisonRequest,
    traces: &[ArrivalTrace],
    label: RuleSetLabel,
    rules: &RuleSet,
    cancel: &CancellationFlag,
    warnings: &mut Vec<MissingRuleWarning>,
) -> Result<IntersectionPerformance, ComparisonError> {
    let mut records = Vec::with_capacity(request.approaches.len());
    let mut active = 0;
    let mut covered = 0;

    for (approach, trace) in request.approaches.iter().zip(traces) {
        let volume = approach.total_volume();
        if volume > 0 {
            active += 1;
        }
        match rules.rule_for(approach) {
            Some(rule) => {
                let record = simulator.simulate_trace(approach, rule, trace, cancel)?;
                tracing::debug!(
                    rule_set = %label,
                    approach = %record.approach,
                    delay = record.average_delay_seconds,
                    throughput = record.throughput_vph,
                    "approach simulated"
                );
                if volume > 0 {
                    covered += 1;
                }
                records.push(record);
            }
            None if volume > 0 => {
                tracing::warn!(rule_set = %label, approach = %approach.key(), volume, "approach has traffic but no rule");
                warnings.push(MissingRuleWarning { rule_set: label, approach: approach.key(), total_volume: volume });
            }
            None => {}
        }
    }

    if active > 0 && covered == 0 {
        return Err(ComparisonError::NoApplicableRules(label));
    }
    Ok(aggregate(&records, request.total_volume()))
}
