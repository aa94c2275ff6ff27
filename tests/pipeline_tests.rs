//! End-to-end pipeline tests over the library API.

use planpilot::analysis::Priority;
use planpilot::config::ProjectConfig;
use planpilot::planner::{Planner, ProjectPlan};
use planpilot::registry::{ComponentRegistry, DomainCategory, StrategyLevel};

const MULTI_CATEGORY_PRD: &str = "\
Requirement: the system must provide secure infrastructure monitoring.
Requirement: nightly SQL database backup.
Requirement: expose a REST API endpoint.
Requirement: responsive frontend form layout.
Requirement: intelligent AI analysis of results.";

fn plan(document: &str) -> ProjectPlan {
    Planner::with_defaults(ProjectConfig::default())
        .unwrap()
        .plan(document)
        .unwrap()
}

#[test]
fn identical_input_produces_identical_output() {
    let a = serde_json::to_string(&plan(MULTI_CATEGORY_PRD)).unwrap();
    let b = serde_json::to_string(&plan(MULTI_CATEGORY_PRD)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn every_requirement_gets_a_category_and_bounded_complexity() {
    let plan = plan(MULTI_CATEGORY_PRD);
    assert_eq!(plan.requirements.len(), 5);
    for req in &plan.requirements {
        assert!(DomainCategory::TIE_BREAK_ORDER.contains(&req.category));
        assert!((0.0..=1.0).contains(&req.complexity), "{}", req.id);
        // Two decimal places.
        let scaled = req.complexity * 100.0;
        assert!((scaled - scaled.round()).abs() < 1e-9, "{}", req.id);
    }
}

#[test]
fn components_stay_within_their_requirement_category() {
    let registry = ComponentRegistry::default();
    let plan = plan(MULTI_CATEGORY_PRD);
    for req in &plan.requirements {
        for id in &req.components_needed {
            let comp = registry.get(id).expect("selected component exists");
            assert_eq!(comp.category, req.category, "{} in {}", id, req.id);
        }
    }
}

#[test]
fn durations_follow_the_category_base_formula() {
    let plan = plan(MULTI_CATEGORY_PRD);
    for req in &plan.requirements {
        let expected =
            (req.category.base_duration_secs() as f64 * (1.0 + req.complexity)).round() as u64;
        assert_eq!(req.estimated_duration, expected, "{}", req.id);
    }
    let sum: u64 = plan.requirements.iter().map(|r| r.estimated_duration).sum();
    assert_eq!(plan.estimated_total_duration, sum);
}

#[test]
fn phases_form_a_linear_chain_in_fixed_order() {
    let plan = plan(MULTI_CATEGORY_PRD);
    let categories: Vec<DomainCategory> =
        plan.execution_plan.phases.iter().map(|p| p.category).collect();
    assert_eq!(categories, DomainCategory::PHASE_ORDER.to_vec());

    for (i, phase) in plan.execution_plan.phases.iter().enumerate() {
        assert_eq!(phase.index, i);
        if i == 0 {
            assert!(phase.dependencies.is_empty());
        } else {
            assert_eq!(phase.dependencies, vec![i - 1]);
        }
    }
    assert!(plan.execution_plan.parallel_execution_possible);
}

#[test]
fn execution_order_puts_high_priority_first() {
    let plan = plan(MULTI_CATEGORY_PRD);
    // Only the first requirement says "must".
    assert_eq!(plan.execution_plan.execution_order[0], "req_1");
    assert_eq!(plan.execution_plan.priority_groups.high, vec!["req_1"]);
    assert_eq!(
        plan.execution_plan.priority_groups.medium,
        vec!["req_2", "req_3", "req_4", "req_5"]
    );
}

#[test]
fn four_validation_types_mean_comprehensive_overall() {
    let plan = plan(MULTI_CATEGORY_PRD);
    // system contributes no validation type; ui/api/data/ai do.
    assert_eq!(plan.validation_strategy.validation_types.len(), 4);
    assert_eq!(
        plan.validation_strategy.overall_strategy,
        StrategyLevel::Comprehensive
    );
    assert_eq!(
        plan.validation_strategy.success_criteria.required_validations,
        4
    );
    assert_eq!(
        plan.validation_strategy.validation_phases,
        vec![
            "component_validation",
            "integration_validation",
            "end_to_end_validation"
        ]
    );
}

#[test]
fn login_form_is_ui_and_high_priority() {
    let plan = plan("Users must login. The form must validate email and password.");
    assert_eq!(plan.requirements.len(), 1);
    let req = &plan.requirements[0];
    assert_eq!(req.category, DomainCategory::Ui);
    assert_eq!(req.priority, Priority::High);
    assert_eq!(req.components_needed, vec!["rpabrowser", "rpawindow"]);
}

#[test]
fn empty_document_degrades_to_general_system_requirement() {
    let plan = plan("");
    assert_eq!(plan.requirements.len(), 1);
    let req = &plan.requirements[0];
    assert_eq!(req.id, "req_general");
    assert_eq!(req.category, DomainCategory::System);
    assert_eq!(req.priority, Priority::Medium);
    assert_eq!(
        req.components_needed,
        vec!["rpasystem", "rpaencrypt", "rpaemail", "rpaenterprise"]
    );
    // system-only plans still get a (single) phase but no validation types.
    assert_eq!(plan.execution_plan.total_phases, 1);
    assert!(plan.validation_strategy.validation_types.is_empty());
}

#[test]
fn workflow_mappings_cover_every_requirement() {
    let plan = plan(MULTI_CATEGORY_PRD);
    assert_eq!(plan.workflow_mappings.len(), plan.requirements.len());
    for req in &plan.requirements {
        let mapping = plan.workflow_mappings.get(&req.id).unwrap();
        assert_eq!(mapping.component_category, req.category);
        assert_eq!(
            mapping.workflow_config.workflow_type,
            format!("{}_validation", req.category)
        );
        assert_eq!(mapping.workflow_config.parameters.timeout, req.estimated_duration);
    }
}

#[test]
fn serialized_requirement_uses_type_field_and_omits_internals() {
    let plan = plan("The service must expose a REST API endpoint.");
    let value = serde_json::to_value(&plan).unwrap();
    let req = &value["requirements"][0];
    assert_eq!(req["type"], "api");
    assert!(req.get("description").is_none());
    assert!(req.get("matched_patterns").is_none());
    for key in [
        "requirements",
        "workflow_mappings",
        "execution_plan",
        "validation_strategy",
        "estimated_total_duration",
    ] {
        assert!(value.get(key).is_some(), "missing {}", key);
    }
}

#[tokio::test]
async fn concurrent_plan_is_byte_identical_to_sequential() {
    let planner = Planner::with_defaults(ProjectConfig::default()).unwrap();
    let sequential = planner.plan(MULTI_CATEGORY_PRD).unwrap();
    let concurrent = planner.plan_concurrent(MULTI_CATEGORY_PRD).await.unwrap();
    assert_eq!(
        serde_json::to_string(&sequential).unwrap(),
        serde_json::to_string(&concurrent).unwrap()
    );
}
