use crate::types::constants::{
    DELAY_REDUCTION_THRESHOLD, EFFICIENCY_IMPROVEMENT_THRESHOLD, EMISSION_REDUCTION_FACTOR,
    EMISSION_REDUCTION_THRESHOLD, FUEL_SAVINGS_FACTOR, FUEL_SAVINGS_THRESHOLD,
    THROUGHPUT_INCREASE_THRESHOLD,
};
use crate::types::{Improvements, IntersectionPerformance, LosTransition};

/// Non-negative deltas from `current` to `optimized`
pub fn improvements_between(current: &IntersectionPerformance, optimized: &IntersectionPerformance) -> Improvements {
    let delay_reduction_percent = if current.average_delay > 0.0 {
        ((current.average_delay - optimized.average_delay) / current.average_delay * 100.0).max(0.0)
    } else {
        0.0
    };
    let throughput_increase_percent = if current.total_throughput > 0.0 {
        ((optimized.total_throughput - current.total_throughput) / current.total_throughput * 100.0).max(0.0)
    } else {
        0.0
    };

    Improvements {
        delay_reduction_percent,
        throughput_increase_percent,
        efficiency_improvement: (optimized.efficiency - current.efficiency).max(0.0),
        fuel_savings_percent: FUEL_SAVINGS_FACTOR * delay_reduction_percent,
        emission_reduction_percent: EMISSION_REDUCTION_FACTOR * delay_reduction_percent,
        los_transition: LosTransition::between(current.level_of_service, optimized.level_of_service),
    }
}

pub fn recommendations_for(improvements: &Improvements) -> Vec<String> {
    let mut recommendations = Vec::new();
    if improvements.delay_reduction_percent > DELAY_REDUCTION_THRESHOLD {
        recommendations.push(format!(
            "Significant delay reduction of {:.1}% achieved",
            improvements.delay_reduction_percent
        ));
    }
    if improvements.throughput_increase_percent > THROUGHPUT_INCREASE_THRESHOLD {
        recommendations.push(format!("Throughput increased by {:.1}%", improvements.throughput_increase_percent));
    }
    if improvements.efficiency_improvement > EFFICIENCY_IMPROVEMENT_THRESHOLD {
        recommendations.push(format!("Efficiency improved by {:.1} points", improvements.efficiency_improvement));
    }
    if improvements.fuel_savings_percent > FUEL_SAVINGS_THRESHOLD {
        recommendations.push(format!("Fuel consumption reduced by {:.1}%", improvements.fuel_savings_percent));
    }
    if improvements.emission_reduction_percent > EMISSION_REDUCTION_THRESHOLD {
        recommendations.push(format!("Emissions reduced by {:.1}%", improvements.emission_reduction_percent));
    }
    if recommendations.is_empty() {
        recommendations.push("Optimization shows marginal improvements - consider additional analysis".to_string());
    }
    recommendations
}
