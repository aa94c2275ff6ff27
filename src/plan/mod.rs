//! Plan construction: phase ordering and validation strategy derivation.
//!
//! Both builders run only after every per-requirement result is available
//! (the pipeline's join point), since phase membership and validation
//! coverage are computed over the full requirement set.

mod builder;
mod validation;

pub use builder::{ExecutionPlan, ExecutionPlanBuilder, Phase, PriorityGroups};
pub use validation::{
    SuccessCriteria, ValidationStrategy, ValidationStrategyBuilder, ValidationType,
};
