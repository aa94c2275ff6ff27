use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use crate::analysis::RequirementStatement;
use crate::registry::{DomainCategory, StrategyLevel};
use crate::utils::round2;

/// Minimum confidence every plan demands of its validations.
const MINIMUM_CONFIDENCE: f64 = 0.8;

/// Validation phases every plan runs through, in order.
const VALIDATION_PHASES: [&str; 3] = [
    "component_validation",
    "integration_validation",
    "end_to_end_validation",
];

/// One category's validation checks.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationType {
    pub category: DomainCategory,
    pub description: String,
    /// Distinct component ids used in this category.
    pub components: Vec<String>,
    pub confidence_threshold: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessCriteria {
    pub minimum_confidence: f64,
    pub required_validations: usize,
    /// Partial success is tolerable only for projects whose aggregate
    /// complexity level is basic.
    pub allow_partial_success: bool,
}

/// The derived checks and thresholds used to judge whether an implementation
/// satisfies the plan.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationStrategy {
    pub validation_types: Vec<ValidationType>,
    /// Comprehensive when more than two validation types are in play.
    pub overall_strategy: StrategyLevel,
    /// Most common per-requirement strategy; ties resolve toward the more
    /// thorough level.
    pub primary_strategy: StrategyLevel,
    pub strategy_distribution: BTreeMap<String, usize>,
    pub average_complexity: f64,
    pub validation_phases: Vec<String>,
    pub success_criteria: SuccessCriteria,
}

/// Derives the validation strategy for a full requirement set.
pub struct ValidationStrategyBuilder;

impl ValidationStrategyBuilder {
    pub fn build(
        requirements: &[RequirementStatement],
        aggregate_level: StrategyLevel,
    ) -> ValidationStrategy {
        let mut validation_types = Vec::new();
        for category in DomainCategory::TIE_BREAK_ORDER {
            // The system category contributes no standalone validation type.
            let Some(threshold) = category.validation_threshold() else {
                continue;
            };
            let members: Vec<&RequirementStatement> = requirements
                .iter()
                .filter(|r| r.category == category)
                .collect();
            if members.is_empty() {
                continue;
            }

            let mut components: Vec<String> = Vec::new();
            for req in &members {
                for id in &req.components_needed {
                    if !components.contains(id) {
                        components.push(id.clone());
                    }
                }
            }

            validation_types.push(ValidationType {
                category,
                description: category.validation_description().to_string(),
                components,
                confidence_threshold: threshold,
            });
        }

        let overall_strategy = if validation_types.len() > 2 {
            StrategyLevel::Comprehensive
        } else {
            StrategyLevel::Standard
        };

        let mut strategy_distribution: BTreeMap<String, usize> = BTreeMap::new();
        for req in requirements {
            *strategy_distribution
                .entry(req.validation_strategy.as_str().to_string())
                .or_insert(0) += 1;
        }
        let primary_strategy = primary_strategy(&strategy_distribution);

        let average_complexity = if requirements.is_empty() {
            0.0
        } else {
            round2(
                requirements.iter().map(|r| r.complexity).sum::<f64>()
                    / requirements.len() as f64,
            )
        };

        let strategy = ValidationStrategy {
            success_criteria: SuccessCriteria {
                minimum_confidence: MINIMUM_CONFIDENCE,
                required_validations: validation_types.len(),
                allow_partial_success: aggregate_level == StrategyLevel::Basic,
            },
            overall_strategy,
            primary_strategy,
            strategy_distribution,
            average_complexity,
            validation_phases: VALIDATION_PHASES.iter().map(|s| s.to_string()).collect(),
            validation_types,
        };
        info!(
            types = strategy.validation_types.len(),
            overall = %strategy.overall_strategy,
            "Built validation strategy"
        );
        strategy
    }
}

/// Highest count wins; equal counts resolve toward the more thorough level so
/// the summary never understates the rigor required.
fn primary_strategy(distribution: &BTreeMap<String, usize>) -> StrategyLevel {
    let mut best = StrategyLevel::Standard;
    let mut best_count = 0usize;
    for level in [
        StrategyLevel::Basic,
        StrategyLevel::Standard,
        StrategyLevel::Comprehensive,
    ] {
        let count = distribution.get(level.as_str()).copied().unwrap_or(0);
        if count > 0 && count >= best_count {
            best = level;
            best_count = count;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Priority;

    fn requirement(
        id: &str,
        category: DomainCategory,
        complexity: f64,
        strategy: StrategyLevel,
        components: &[&str],
    ) -> RequirementStatement {
        RequirementStatement {
            id: id.to_string(),
            category,
            priority: Priority::Medium,
            complexity,
            components_needed: components.iter().map(|s| s.to_string()).collect(),
            validation_strategy: strategy,
            estimated_duration: 300,
            description: String::new(),
            summary: String::new(),
            matched_patterns: Vec::new(),
        }
    }

    #[test]
    fn test_thresholds_per_category() {
        let reqs = vec![
            requirement("req_1", DomainCategory::Ui, 0.5, StrategyLevel::Standard, &["rpabrowser"]),
            requirement("req_2", DomainCategory::Api, 0.5, StrategyLevel::Standard, &["rpanetwork"]),
        ];
        let strategy = ValidationStrategyBuilder::build(&reqs, StrategyLevel::Standard);
        assert_eq!(strategy.validation_types.len(), 2);
        assert_eq!(strategy.validation_types[0].category, DomainCategory::Ui);
        assert_eq!(strategy.validation_types[0].confidence_threshold, 0.8);
        assert_eq!(strategy.validation_types[1].confidence_threshold, 0.9);
    }

    #[test]
    fn test_system_contributes_no_type() {
        let reqs = vec![requirement(
            "req_1",
            DomainCategory::System,
            0.5,
            StrategyLevel::Standard,
            &["rpasystem"],
        )];
        let strategy = ValidationStrategyBuilder::build(&reqs, StrategyLevel::Standard);
        assert!(strategy.validation_types.is_empty());
        assert_eq!(strategy.success_criteria.required_validations, 0);
    }

    #[test]
    fn test_overall_strategy_threshold() {
        let two = vec![
            requirement("req_1", DomainCategory::Ui, 0.5, StrategyLevel::Standard, &[]),
            requirement("req_2", DomainCategory::Api, 0.5, StrategyLevel::Standard, &[]),
        ];
        let strategy = ValidationStrategyBuilder::build(&two, StrategyLevel::Standard);
        assert_eq!(strategy.overall_strategy, StrategyLevel::Standard);

        let three = vec![
            requirement("req_1", DomainCategory::Ui, 0.5, StrategyLevel::Standard, &[]),
            requirement("req_2", DomainCategory::Api, 0.5, StrategyLevel::Standard, &[]),
            requirement("req_3", DomainCategory::Data, 0.5, StrategyLevel::Standard, &[]),
        ];
        let strategy = ValidationStrategyBuilder::build(&three, StrategyLevel::Standard);
        assert_eq!(strategy.overall_strategy, StrategyLevel::Comprehensive);
    }

    #[test]
    fn test_allow_partial_success_only_basic() {
        let reqs = vec![requirement(
            "req_1",
            DomainCategory::Ui,
            0.2,
            StrategyLevel::Basic,
            &[],
        )];
        let basic = ValidationStrategyBuilder::build(&reqs, StrategyLevel::Basic);
        assert!(basic.success_criteria.allow_partial_success);

        let standard = ValidationStrategyBuilder::build(&reqs, StrategyLevel::Standard);
        assert!(!standard.success_criteria.allow_partial_success);
    }

    #[test]
    fn test_primary_strategy_tie_prefers_thorough() {
        let reqs = vec![
            requirement("req_1", DomainCategory::Ui, 0.3, StrategyLevel::Basic, &[]),
            requirement("req_2", DomainCategory::Api, 0.9, StrategyLevel::Comprehensive, &[]),
        ];
        let strategy = ValidationStrategyBuilder::build(&reqs, StrategyLevel::Standard);
        assert_eq!(strategy.primary_strategy, StrategyLevel::Comprehensive);
        assert_eq!(strategy.average_complexity, 0.6);
    }

    #[test]
    fn test_components_deduplicated_across_requirements() {
        let reqs = vec![
            requirement("req_1", DomainCategory::Data, 0.5, StrategyLevel::Standard, &["rpadatabase", "rpaexcel"]),
            requirement("req_2", DomainCategory::Data, 0.5, StrategyLevel::Standard, &["rpadatabase"]),
        ];
        let strategy = ValidationStrategyBuilder::build(&reqs, StrategyLevel::Standard);
        assert_eq!(strategy.validation_types[0].components, vec!["rpadatabase", "rpaexcel"]);
    }

    #[test]
    fn test_empty_requirements() {
        let strategy = ValidationStrategyBuilder::build(&[], StrategyLevel::Basic);
        assert!(strategy.validation_types.is_empty());
        assert_eq!(strategy.average_complexity, 0.0);
        assert_eq!(strategy.primary_strategy, StrategyLevel::Standard);
    }
}
