//! Static component registry: the catalog of automation components the
//! planner can select from, partitioned into five fixed domain categories.
//!
//! The registry is immutable configuration. It is loaded once (defaults in
//! code, optional TOML override) and shared read-only across workers.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};

/// Fixed domain categories. Every component belongs to exactly one category,
/// and a requirement may only select components from its assigned category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainCategory {
    Ui,
    Api,
    Data,
    Ai,
    System,
}

impl DomainCategory {
    /// Classification tie-break order: the first category in this order
    /// attaining the maximum score wins. Fixed deliberately; do not rely on
    /// map iteration order here.
    pub const TIE_BREAK_ORDER: [DomainCategory; 5] = [
        DomainCategory::Ui,
        DomainCategory::Api,
        DomainCategory::Data,
        DomainCategory::Ai,
        DomainCategory::System,
    ];

    /// Phase emission order: infrastructure first, analysis last.
    pub const PHASE_ORDER: [DomainCategory; 5] = [
        DomainCategory::System,
        DomainCategory::Data,
        DomainCategory::Api,
        DomainCategory::Ui,
        DomainCategory::Ai,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ui => "ui",
            Self::Api => "api",
            Self::Data => "data",
            Self::Ai => "ai",
            Self::System => "system",
        }
    }

    /// Base execution duration in seconds, scaled by complexity when
    /// estimating a requirement's duration.
    pub fn base_duration_secs(&self) -> u64 {
        match self {
            Self::Ui => 240,
            Self::Api => 180,
            Self::Data => 300,
            Self::Ai => 420,
            Self::System => 360,
        }
    }

    /// Confidence threshold for this category's validation checks.
    /// The system category contributes no standalone validation type.
    pub fn validation_threshold(&self) -> Option<f64> {
        match self {
            Self::Ui => Some(0.8),
            Self::Api => Some(0.9),
            Self::Data => Some(0.85),
            Self::Ai => Some(0.75),
            Self::System => None,
        }
    }

    pub fn validation_description(&self) -> &'static str {
        match self {
            Self::Ui => "Validate user interface functionality and responsiveness",
            Self::Api => "Validate API endpoints and data contracts",
            Self::Data => "Validate data processing and file operations",
            Self::Ai => "Validate AI-powered analysis and decision making",
            Self::System => "Validate system availability and security operations",
        }
    }

    /// Base validation rules attached to workflow configs for this category.
    pub fn base_validation_rules(&self) -> &'static [&'static str] {
        match self {
            Self::Ui => &["element_presence", "functionality", "responsiveness"],
            Self::Api => &["response_validation", "status_codes", "performance"],
            Self::Data => &["data_integrity", "consistency", "backup_validation"],
            Self::Ai => &["accuracy", "performance", "edge_cases"],
            Self::System => &["availability", "performance", "security"],
        }
    }
}

impl fmt::Display for DomainCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thoroughness level shared by per-requirement validation strategies,
/// the project-wide complexity level, and selection profiles.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum StrategyLevel {
    Basic,
    #[default]
    Standard,
    Comprehensive,
}

impl StrategyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Standard => "standard",
            Self::Comprehensive => "comprehensive",
        }
    }

    /// Selection profile active at this level.
    pub fn profile(&self) -> StrategyProfile {
        match self {
            Self::Basic => StrategyProfile {
                max_components: 5,
                complexity_threshold: 5,
            },
            Self::Standard => StrategyProfile {
                max_components: 10,
                complexity_threshold: 7,
            },
            Self::Comprehensive => StrategyProfile {
                max_components: 15,
                complexity_threshold: 10,
            },
        }
    }

    /// Extra validation rules appended to the per-category base rules.
    pub fn extra_validation_rules(&self) -> &'static [&'static str] {
        match self {
            Self::Basic => &[],
            Self::Standard => &["performance_checks"],
            Self::Comprehensive => &["stress_testing", "edge_case_validation", "security_checks"],
        }
    }
}

impl fmt::Display for StrategyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Component-count and complexity bounds for one selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyProfile {
    /// Upper bound on candidates considered; the selector keeps the top
    /// floor(max_components / 2) scored components.
    pub max_components: usize,
    /// Components at or below this complexity score earn a reliability bonus.
    pub complexity_threshold: u8,
}

/// One automation capability unit. Static and read-only; never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    pub id: String,
    pub category: DomainCategory,
    /// Capability keywords matched against a requirement's pattern tokens.
    pub keywords: Vec<String>,
    /// 1-10; higher means harder to operate.
    pub complexity_score: u8,
    /// 1-10; higher means more dependable.
    pub reliability_score: u8,
}

impl ComponentDescriptor {
    fn new(
        id: &str,
        category: DomainCategory,
        keywords: &[&str],
        complexity_score: u8,
        reliability_score: u8,
    ) -> Self {
        Self {
            id: id.to_string(),
            category,
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            complexity_score,
            reliability_score,
        }
    }

    pub fn has_keyword(&self, token: &str) -> bool {
        self.keywords.iter().any(|k| k == token)
    }
}

/// The static component catalog. Declaration order is significant: it is the
/// tie-break order for equally scored components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentRegistry {
    pub components: Vec<ComponentDescriptor>,
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        use DomainCategory::*;
        Self {
            components: vec![
                // UI
                ComponentDescriptor::new(
                    "rpabrowser",
                    Ui,
                    &["browser", "web", "click", "navigate", "form", "ui", "frontend"],
                    3,
                    9,
                ),
                ComponentDescriptor::new(
                    "rpacv",
                    Ui,
                    &["image", "vision", "ocr", "screenshot", "visual", "recognition"],
                    7,
                    8,
                ),
                ComponentDescriptor::new(
                    "rpawindow",
                    Ui,
                    &["desktop", "window", "application", "keyboard", "mouse", "native"],
                    5,
                    8,
                ),
                // API
                ComponentDescriptor::new(
                    "rpanetwork",
                    Api,
                    &["api", "http", "rest", "request", "response", "network", "endpoint"],
                    4,
                    9,
                ),
                ComponentDescriptor::new(
                    "rpaopenapi",
                    Api,
                    &["openapi", "swagger", "specification", "contract", "schema", "validation"],
                    6,
                    9,
                ),
                // Data
                ComponentDescriptor::new(
                    "rpadatabase",
                    Data,
                    &["database", "sql", "query", "data", "table", "record", "crud"],
                    5,
                    9,
                ),
                ComponentDescriptor::new(
                    "rpaexcel",
                    Data,
                    &["excel", "spreadsheet", "csv", "data", "calculation", "chart"],
                    4,
                    8,
                ),
                ComponentDescriptor::new(
                    "rpapdf",
                    Data,
                    &["pdf", "document", "text", "extract", "merge", "split"],
                    6,
                    7,
                ),
                ComponentDescriptor::new(
                    "rpadocx",
                    Data,
                    &["word", "document", "template", "text", "format", "report"],
                    5,
                    8,
                ),
                // AI
                ComponentDescriptor::new(
                    "rpaai",
                    Ai,
                    &["ai", "analysis", "decision", "intelligent", "nlp", "classification"],
                    8,
                    7,
                ),
                ComponentDescriptor::new(
                    "rpaverifycode",
                    Ai,
                    &["code", "verification", "quality", "security", "analysis", "review"],
                    7,
                    8,
                ),
                // System
                ComponentDescriptor::new(
                    "rpasystem",
                    System,
                    &["system", "process", "file", "service", "management", "automation"],
                    6,
                    8,
                ),
                ComponentDescriptor::new(
                    "rpaencrypt",
                    System,
                    &["encrypt", "security", "hash", "sign", "crypto", "protection"],
                    7,
                    9,
                ),
                ComponentDescriptor::new(
                    "rpaemail",
                    System,
                    &["email", "mail", "send", "receive", "notification", "communication"],
                    4,
                    8,
                ),
                ComponentDescriptor::new(
                    "rpaenterprise",
                    System,
                    &["enterprise", "workflow", "integration", "approval", "audit"],
                    8,
                    7,
                ),
            ],
        }
    }
}

impl ComponentRegistry {
    /// Load a registry override from a TOML file, falling back to the
    /// built-in catalog when no path is given.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let registry = match path {
            Some(p) => {
                let content = tokio::fs::read_to_string(p).await?;
                toml::from_str(&content)?
            }
            None => Self::default(),
        };
        registry.validate()?;
        Ok(registry)
    }

    /// Components belonging to a category, in declaration order.
    pub fn in_category(&self, category: DomainCategory) -> Vec<&ComponentDescriptor> {
        self.components
            .iter()
            .filter(|c| c.category == category)
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&ComponentDescriptor> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Check registry consistency. Collects all problems before failing so a
    /// bad external catalog reports every defect at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        let mut seen = HashSet::new();
        for comp in &self.components {
            if comp.id.is_empty() {
                errors.push("component id must not be empty".to_string());
            }
            if !seen.insert(comp.id.as_str()) {
                errors.push(format!("duplicate component id: {}", comp.id));
            }
            if comp.keywords.is_empty() {
                errors.push(format!("component {} has no capability keywords", comp.id));
            }
            if !(1..=10).contains(&comp.complexity_score) {
                errors.push(format!(
                    "component {} complexity_score must be in 1..=10",
                    comp.id
                ));
            }
            if !(1..=10).contains(&comp.reliability_score) {
                errors.push(format!(
                    "component {} reliability_score must be in 1..=10",
                    comp.id
                ));
            }
        }

        for category in DomainCategory::TIE_BREAK_ORDER {
            if self.in_category(category).is_empty() {
                errors.push(format!("category {} has no components", category));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PlanError::Config(errors.join("; ")))
        }
    }
}
