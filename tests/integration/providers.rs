use intersim::provider::action_text::TimingAction;
use intersim::types::{ApproachKey, Direction};
use intersim::{
    ActionTextRuleProvider, CancellationFlag, Comparator, ComparisonError, HeuristicRuleProvider,
    RuleProvider, StaticRuleProvider,
};

use crate::common;

/// Tests the heuristic provider feeding the comparator
#[tokio::test]
async fn test_heuristic_candidate() {
    let comparator = Comparator::default();
    let proposed = comparator
        .compare_with_provider(
            common::request(intersim::types::RuleSet::new(), 5),
            &HeuristicRuleProvider::default(),
            CancellationFlag::new(),
        )
        .await
        .unwrap();

    assert_eq!(proposed.provider, "heuristic");
    assert_eq!(proposed.proposal.rules, common::rules_with_green([40, 60, 25, 5]));
    let comparison = &proposed.report.comparison;
    assert!(comparison.optimized.total_throughput > comparison.current.total_throughput);
}

/// Tests that recommender text becomes the candidate rules
#[tokio::test]
async fn test_action_text_candidate() {
    let lines = vec![
        "Extend green time for Mass Ave Southbound to 60 seconds".to_string(),
        "Minimize signal time for Driveway Westbound to 5 seconds".to_string(),
        "Implement coordinated signal progression with 90-second cycle".to_string(),
        "Implement adaptive signal timing based on real-time traffic".to_string(),
    ];
    assert_eq!(lines.iter().filter_map(|l| TimingAction::parse(l)).count(), 2);

    let provider = ActionTextRuleProvider::new(lines);
    let proposed = Comparator::default()
        .compare_with_provider(
            common::request(intersim::types::RuleSet::new(), 5),
            &provider,
            CancellationFlag::new(),
        )
        .await
        .unwrap();
    let southbound = proposed
        .proposal
        .rules
        .get(&ApproachKey::new("Mass Ave", Direction::Southbound))
        .unwrap();
    assert_eq!(southbound.green_time, 60);
    assert_eq!(proposed.proposal.rules, common::rules_with_green([30, 60, 15, 5]));
}

/// Tests that a provider error reaches the caller as a comparison error
#[tokio::test]
async fn test_provider_failure_is_reported() {
    let provider = ActionTextRuleProvider::new(vec!["Retime everything".to_string()]);
    let result = Comparator::default()
        .compare_with_provider(
            common::request(intersim::types::RuleSet::new(), 5),
            &provider,
            CancellationFlag::new(),
        )
        .await;
    assert!(matches!(result, Err(ComparisonError::Provider(_))));
}

#[tokio::test]
async fn test_providers_behind_trait_objects() {
    let providers: Vec<Box<dyn RuleProvider>> = vec![
        Box::new(StaticRuleProvider::mass_ave_magazine().unwrap()),
        Box::new(HeuristicRuleProvider::default()),
    ];
    for provider in &providers {
        let proposal = provider
            .propose(common::INTERSECTION_ID, &common::mass_ave_approaches(), &common::current_rules())
            .await
            .unwrap();
        assert_eq!(proposal.rules.len(), 4, "{}", provider.name());
    }
}
