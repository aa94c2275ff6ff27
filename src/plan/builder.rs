use serde::Serialize;
use tracing::info;

use crate::analysis::{Priority, RequirementStatement};
use crate::registry::DomainCategory;

/// Minutes of phase time budgeted per distinct component.
const MINUTES_PER_COMPONENT: u64 = 15;

/// One step of the execution plan: one domain category's selected components.
#[derive(Debug, Clone, Serialize)]
pub struct Phase {
    pub index: usize,
    pub category: DomainCategory,
    /// Distinct component ids selected in this category, first-seen order.
    pub components: Vec<String>,
    /// Requirements whose work lands in this phase, extraction order.
    pub requirements: Vec<String>,
    pub estimated_duration_minutes: u64,
    /// Indices of phases this one waits on. Always empty for the first phase
    /// and exactly [index - 1] after it: a strict linear chain by
    /// construction, regardless of whether the categories are logically
    /// independent.
    pub dependencies: Vec<usize>,
}

/// Requirement ids bucketed by priority, extraction order within a bucket.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PriorityGroups {
    pub high: Vec<String>,
    pub medium: Vec<String>,
    pub low: Vec<String>,
}

/// Ordered phases plus the scheduling summary consumed by the orchestration
/// layer.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionPlan {
    pub phases: Vec<Phase>,
    pub total_phases: usize,
    pub estimated_total_duration_minutes: u64,
    pub parallel_execution_possible: bool,
    pub total_requirements: usize,
    /// High-priority requirement ids first, then medium, then low.
    pub execution_order: Vec<String>,
    /// Requirement ids grouped by category; requirements in the same group
    /// may run concurrently.
    pub parallel_groups: Vec<Vec<String>>,
    pub priority_groups: PriorityGroups,
    /// Wall-clock estimate under full parallelism: the largest group's summed
    /// duration, seconds.
    pub estimated_duration: u64,
    pub parallelization_factor: usize,
}

/// Arranges selected categories into ordered phases with a fixed dependency
/// chain, in the fixed emission order system → data → api → ui → ai.
pub struct ExecutionPlanBuilder;

impl ExecutionPlanBuilder {
    pub fn build(requirements: &[RequirementStatement]) -> ExecutionPlan {
        let mut phases: Vec<Phase> = Vec::new();

        for category in DomainCategory::PHASE_ORDER {
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

            let index = phases.len();
            phases.push(Phase {
                index,
                category,
                estimated_duration_minutes: components.len() as u64 * MINUTES_PER_COMPONENT,
                components,
                requirements: members.iter().map(|r| r.id.clone()).collect(),
                dependencies: if index == 0 { Vec::new() } else { vec![index - 1] },
            });
        }

        let total_minutes: u64 = phases.iter().map(|p| p.estimated_duration_minutes).sum();

        let mut priority_groups = PriorityGroups::default();
        for req in requirements {
            let bucket = match req.priority {
                Priority::High => &mut priority_groups.high,
                Priority::Medium => &mut priority_groups.medium,
                Priority::Low => &mut priority_groups.low,
            };
            bucket.push(req.id.clone());
        }

        let mut execution_order =
            Vec::with_capacity(requirements.len());
        execution_order.extend(priority_groups.high.iter().cloned());
        execution_order.extend(priority_groups.medium.iter().cloned());
        execution_order.extend(priority_groups.low.iter().cloned());

        // Category groups in first-seen extraction order, so output is
        // reproducible for identical input.
        let mut group_categories: Vec<DomainCategory> = Vec::new();
        for req in requirements {
            if !group_categories.contains(&req.category) {
                group_categories.push(req.category);
            }
        }
        let parallel_groups: Vec<Vec<String>> = group_categories
            .iter()
            .map(|&cat| {
                requirements
                    .iter()
                    .filter(|r| r.category == cat)
                    .map(|r| r.id.clone())
                    .collect()
            })
            .collect();

        let estimated_duration = group_categories
            .iter()
            .map(|&cat| {
                requirements
                    .iter()
                    .filter(|r| r.category == cat)
                    .map(|r| r.estimated_duration)
                    .sum::<u64>()
            })
            .max()
            .unwrap_or(0);

        let plan = ExecutionPlan {
            total_phases: phases.len(),
            parallel_execution_possible: phases.len() > 1,
            estimated_total_duration_minutes: total_minutes,
            total_requirements: requirements.len(),
            execution_order,
            parallelization_factor: parallel_groups.len(),
            parallel_groups,
            priority_groups,
            estimated_duration,
            phases,
        };
        info!(
            phases = plan.total_phases,
            minutes = plan.estimated_total_duration_minutes,
            "Built execution plan"
        );
        plan
    }
}
