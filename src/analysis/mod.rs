//! Per-requirement analysis: extraction, classification, complexity scoring
//! and component selection.
//!
//! Stages run strictly left to right; no stage reads state from a later one.
//! Each requirement's classification, complexity score and component
//! selection are independent of every other requirement, so they can be
//! fanned out across workers and merged back in extraction order.

mod classifier;
mod complexity;
mod extractor;
mod selector;

pub use classifier::{Classification, PatternMatch, RequirementClassifier};
pub use complexity::{ComplexityEstimator, ComplexityProfile};
pub use extractor::{RequirementBlock, RequirementExtractor};
pub use selector::{ComponentSelector, Selection};

use serde::Serialize;

use crate::registry::{DomainCategory, StrategyLevel};

/// Priority tag assigned at extraction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Contribution to the complexity score.
    pub fn complexity_weight(&self) -> f64 {
        match self {
            Self::High => 0.8,
            Self::Medium => 0.5,
            Self::Low => 0.3,
        }
    }
}

/// One fully analyzed requirement. Created by the extractor, filled in by the
/// later stages, immutable once the plan is built.
#[derive(Debug, Clone, Serialize)]
pub struct RequirementStatement {
    pub id: String,
    #[serde(rename = "type")]
    pub category: DomainCategory,
    pub priority: Priority,
    /// Normalized difficulty, always within [0, 1].
    pub complexity: f64,
    pub components_needed: Vec<String>,
    pub validation_strategy: StrategyLevel,
    /// Estimated execution time, seconds.
    pub estimated_duration: u64,
    /// Untruncated source text; analysis always runs over this.
    #[serde(skip_serializing)]
    pub description: String,
    /// Display copy, truncated to at most 500 characters.
    #[serde(skip_serializing)]
    pub summary: String,
    /// Pattern tokens that matched during classification, with confidence.
    #[serde(skip_serializing)]
    pub matched_patterns: Vec<PatternMatch>,
}

impl RequirementStatement {
    /// Assemble a statement from the stage outputs, clamping complexity into
    /// [0, 1] so an illegal score cannot be constructed.
    pub fn assemble(
        block: RequirementBlock,
        classification: Classification,
        complexity: f64,
        selection: Selection,
    ) -> Self {
        Self {
            id: block.id,
            category: classification.category,
            priority: block.priority,
            complexity: complexity.clamp(0.0, 1.0),
            components_needed: selection.components,
            validation_strategy: selection.validation_strategy,
            estimated_duration: selection.estimated_duration,
            description: block.description,
            summary: block.summary,
            matched_patterns: classification.matched,
        }
    }
}
