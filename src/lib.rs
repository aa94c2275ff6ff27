pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod plan;
pub mod planner;
pub mod registry;
pub mod utils;

pub use analysis::{
    Classification, ComplexityEstimator, ComplexityProfile, ComponentSelector, PatternMatch,
    Priority, RequirementClassifier, RequirementExtractor, RequirementStatement,
};
pub use config::{PatternConfig, ProjectConfig};
pub use error::{PlanError, Result};
pub use plan::{ExecutionPlan, ExecutionPlanBuilder, ValidationStrategy, ValidationStrategyBuilder};
pub use planner::{Planner, ProjectPlan, WorkflowMapping};
pub use registry::{ComponentDescriptor, ComponentRegistry, DomainCategory, StrategyLevel};
