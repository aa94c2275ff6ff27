//! The planning context object: owns the immutable configuration and
//! registry, runs the full pipeline, and assembles the project plan.
//!
//! The planner is stateless aside from that immutable configuration; callers
//! construct one explicitly rather than reaching for a global service.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::analysis::{
    ComplexityEstimator, ComponentSelector, Priority, RequirementBlock, RequirementClassifier,
    RequirementExtractor, RequirementStatement,
};
use crate::config::{PatternConfig, ProjectConfig};
use crate::error::{PlanError, Result};
use crate::plan::{ExecutionPlan, ExecutionPlanBuilder, ValidationStrategy, ValidationStrategyBuilder};
use crate::registry::{ComponentRegistry, DomainCategory, StrategyLevel, StrategyProfile};

/// Parameters handed to the orchestration layer for one workflow dispatch.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowParameters {
    pub validation_strategy: StrategyLevel,
    pub complexity_level: f64,
    pub priority: Priority,
    /// Seconds; the requirement's estimated duration.
    pub timeout: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowConfig {
    /// "<category>_validation"
    pub workflow_type: String,
    pub parameters: WorkflowParameters,
    pub validation_rules: Vec<String>,
}

/// One requirement's workflow mapping, keyed by requirement id in the plan.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowMapping {
    pub component_category: DomainCategory,
    pub components: Vec<String>,
    pub workflow_config: WorkflowConfig,
}

/// The complete plan handed to the (external) orchestration layer.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectPlan {
    pub requirements: Vec<RequirementStatement>,
    /// Ordered map so serialization is byte-identical across runs.
    pub workflow_mappings: BTreeMap<String, WorkflowMapping>,
    pub execution_plan: ExecutionPlan,
    pub validation_strategy: ValidationStrategy,
    /// Σ requirement durations, seconds.
    pub estimated_total_duration: u64,
    /// Caller configuration echoed for the plan consumer.
    pub config: ProjectConfig,
}

/// Runs the requirement → category → component → plan pipeline.
pub struct Planner {
    config: ProjectConfig,
    patterns: Arc<PatternConfig>,
    registry: Arc<ComponentRegistry>,
    estimator: Arc<ComplexityEstimator>,
}

impl Planner {
    /// Build a planner, failing fast on inconsistent configuration or an
    /// inconsistent registry.
    pub fn new(
        config: ProjectConfig,
        patterns: PatternConfig,
        registry: ComponentRegistry,
    ) -> Result<Self> {
        config.validate()?;
        patterns.validate()?;
        registry.validate()?;
        let estimator = ComplexityEstimator::new(&patterns)?;
        Ok(Self {
            config,
            patterns: Arc::new(patterns),
            registry: Arc::new(registry),
            estimator: Arc::new(estimator),
        })
    }

    /// Planner over the built-in pattern tables and component catalog.
    pub fn with_defaults(config: ProjectConfig) -> Result<Self> {
        Self::new(config, PatternConfig::default(), ComponentRegistry::default())
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Run the full pipeline synchronously.
    pub fn plan(&self, document: &str) -> Result<ProjectPlan> {
        let profile = self.estimator.document_profile(document);
        let blocks = RequirementExtractor::new(&self.patterns).extract(document);

        let statements: Vec<RequirementStatement> = blocks
            .into_iter()
            .map(|block| {
                Self::analyze(
                    &self.patterns,
                    &self.estimator,
                    &self.registry,
                    profile.level.profile(),
                    block,
                )
            })
            .collect();

        self.assemble(statements, profile.level)
    }

    /// Run the pipeline with per-requirement analysis fanned out across a
    /// bounded worker pool. Results are merged back in extraction order, so
    /// output is byte-identical to [`Planner::plan`].
    pub async fn plan_concurrent(&self, document: &str) -> Result<ProjectPlan> {
        let profile = self.estimator.document_profile(document);
        let blocks = RequirementExtractor::new(&self.patterns).extract(document);
        let strategy_profile = profile.level.profile();

        let semaphore = Arc::new(Semaphore::new(self.config.max_parallel_workers));
        let handles: Vec<_> = blocks
            .into_iter()
            .enumerate()
            .map(|(index, block)| {
                let semaphore = Arc::clone(&semaphore);
                let patterns = Arc::clone(&self.patterns);
                let estimator = Arc::clone(&self.estimator);
                let registry = Arc::clone(&self.registry);
                tokio::spawn(async move {
                    let _permit = semaphore
                        .acquire()
                        .await
                        .map_err(|_| PlanError::Other("analysis pool closed".to_string()))?;
                    debug!(index, "Analyzing requirement block");
                    Ok::<_, PlanError>((
                        index,
                        Self::analyze(&patterns, &estimator, &registry, strategy_profile, block),
                    ))
                })
            })
            .collect();

        let mut indexed = Vec::with_capacity(handles.len());
        for joined in join_all(handles).await {
            let result =
                joined.map_err(|e| PlanError::Other(format!("analysis task failed: {}", e)))?;
            indexed.push(result?);
        }
        // The join point: merge back into extraction order before any
        // whole-set construction.
        indexed.sort_by_key(|(index, _)| *index);
        let statements = indexed.into_iter().map(|(_, s)| s).collect();

        self.assemble(statements, profile.level)
    }

    /// Classify, score and select for one extracted block. Pure and
    /// independent per block.
    fn analyze(
        patterns: &PatternConfig,
        estimator: &ComplexityEstimator,
        registry: &ComponentRegistry,
        strategy_profile: StrategyProfile,
        block: RequirementBlock,
    ) -> RequirementStatement {
        let classification = RequirementClassifier::new(patterns).classify(&block.description);
        let complexity = estimator.estimate(&block.description, block.priority);
        let selection = ComponentSelector::new(registry).select(
            classification.category,
            complexity,
            &classification.matched,
            strategy_profile,
        );
        RequirementStatement::assemble(block, classification, complexity, selection)
    }

    fn assemble(
        &self,
        statements: Vec<RequirementStatement>,
        aggregate_level: StrategyLevel,
    ) -> Result<ProjectPlan> {
        self.check_registry_purity(&statements)?;

        let workflow_mappings = self.build_workflow_mappings(&statements);
        let execution_plan = ExecutionPlanBuilder::build(&statements);
        let validation_strategy = ValidationStrategyBuilder::build(&statements, aggregate_level);
        let estimated_total_duration = statements.iter().map(|r| r.estimated_duration).sum();

        info!(
            requirements = statements.len(),
            phases = execution_plan.total_phases,
            total_duration_secs = estimated_total_duration,
            "Plan assembled"
        );

        Ok(ProjectPlan {
            requirements: statements,
            workflow_mappings,
            execution_plan,
            validation_strategy,
            estimated_total_duration,
            config: self.config.clone(),
        })
    }

    /// Every selected component must exist in the registry under the
    /// requirement's own category. A violation is a configuration
    /// inconsistency: fail fast rather than emit a plan that cannot run.
    fn check_registry_purity(&self, statements: &[RequirementStatement]) -> Result<()> {
        for req in statements {
            for id in &req.components_needed {
                match self.registry.get(id) {
                    Some(comp) if comp.category == req.category => {}
                    _ => {
                        return Err(PlanError::RegistryMismatch {
                            component: id.clone(),
                            category: req.category.as_str().to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn build_workflow_mappings(
        &self,
        statements: &[RequirementStatement],
    ) -> BTreeMap<String, WorkflowMapping> {
        statements
            .iter()
            .map(|req| {
                let mut validation_rules: Vec<String> = req
                    .category
                    .base_validation_rules()
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
                validation_rules.extend(
                    req.validation_strategy
                        .extra_validation_rules()
                        .iter()
                        .map(|s| s.to_string()),
                );

                let mapping = WorkflowMapping {
                    component_category: req.category,
                    components: req.components_needed.clone(),
                    workflow_config: WorkflowConfig {
                        workflow_type: format!("{}_validation", req.category),
                        parameters: WorkflowParameters {
                            validation_strategy: req.validation_strategy,
                            complexity_level: req.complexity,
                            priority: req.priority,
                            timeout: req.estimated_duration,
                        },
                        validation_rules,
                    },
                };
                (req.id.clone(), mapping)
            })
            .collect()
    }
}
