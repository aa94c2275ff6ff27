use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::{PlanError, Result};
use crate::registry::DomainCategory;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Ordered match-pattern tokens for one domain category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPatterns {
    pub tokens: Vec<String>,
}

/// One named complexity-indicator group: occurrence counts of its tokens
/// contribute to the document's aggregate complexity level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexityIndicator {
    pub name: String,
    pub tokens: Vec<String>,
}

/// The keyword knowledge tables driving extraction, classification and
/// complexity scoring. Externally versioned configuration; the defaults are
/// the reference tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// A line containing any of these (case-insensitively) opens a new
    /// requirement block.
    pub opener_keywords: Vec<String>,
    /// Block text containing any of these tags the requirement high priority.
    pub high_priority_keywords: Vec<String>,
    /// Block text containing any of these (and none of the high list) tags it
    /// low priority.
    pub low_priority_keywords: Vec<String>,
    /// Whole-word technical terms feeding the complexity estimator.
    pub technical_terms: Vec<String>,
    pub ui: CategoryPatterns,
    pub api: CategoryPatterns,
    pub data: CategoryPatterns,
    pub ai: CategoryPatterns,
    pub system: CategoryPatterns,
    /// Document-wide indicator groups for the aggregate complexity level.
    pub complexity_indicators: Vec<ComplexityIndicator>,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            opener_keywords: strings(&[
                "requirement",
                "feature",
                "functionality",
                "must",
                "should",
            ]),
            high_priority_keywords: strings(&["critical", "urgent", "high", "must"]),
            low_priority_keywords: strings(&["low", "nice", "optional"]),
            technical_terms: strings(&[
                "api",
                "database",
                "integration",
                "security",
                "performance",
            ]),
            ui: CategoryPatterns {
                tokens: strings(&[
                    "user interface",
                    "ui",
                    "frontend",
                    "web page",
                    "form",
                    "button",
                    "navigation",
                    "layout",
                    "responsive",
                    "visual",
                ]),
            },
            api: CategoryPatterns {
                tokens: strings(&[
                    "api",
                    "endpoint",
                    "service",
                    "rest",
                    "graphql",
                    "microservice",
                    "integration",
                    "webhook",
                    "http",
                ]),
            },
            data: CategoryPatterns {
                tokens: strings(&[
                    "database",
                    "data",
                    "storage",
                    "persistence",
                    "sql",
                    "nosql",
                    "migration",
                    "backup",
                    "report",
                    "analytics",
                ]),
            },
            ai: CategoryPatterns {
                tokens: strings(&[
                    "artificial intelligence",
                    "ai",
                    "machine learning",
                    "ml",
                    "intelligent",
                    "smart",
                    "prediction",
                    "analysis",
                    "nlp",
                ]),
            },
            system: CategoryPatterns {
                tokens: strings(&[
                    "system",
                    "infrastructure",
                    "deployment",
                    "monitoring",
                    "security",
                    "performance",
                    "scalability",
                    "availability",
                ]),
            },
            complexity_indicators: vec![
                ComplexityIndicator {
                    name: "authentication".to_string(),
                    tokens: strings(&["auth", "login", "user", "permission"]),
                },
                ComplexityIndicator {
                    name: "database_operations".to_string(),
                    tokens: strings(&["database", "sql", "data", "crud"]),
                },
                ComplexityIndicator {
                    name: "api_integration".to_string(),
                    tokens: strings(&["api", "endpoint", "integration"]),
                },
                ComplexityIndicator {
                    name: "ui_complexity".to_string(),
                    tokens: strings(&["form", "page", "component", "interface"]),
                },
                ComplexityIndicator {
                    name: "business_logic".to_string(),
                    tokens: strings(&["business", "logic", "rule", "workflow"]),
                },
            ],
        }
    }
}

impl PatternConfig {
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Category pattern tables in the fixed tie-break order.
    pub fn category_tables(&self) -> [(DomainCategory, &CategoryPatterns); 5] {
        [
            (DomainCategory::Ui, &self.ui),
            (DomainCategory::Api, &self.api),
            (DomainCategory::Data, &self.data),
            (DomainCategory::Ai, &self.ai),
            (DomainCategory::System, &self.system),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.opener_keywords.is_empty() {
            errors.push("opener_keywords must not be empty".to_string());
        }
        if self.high_priority_keywords.is_empty() {
            errors.push("high_priority_keywords must not be empty".to_string());
        }
        if self.technical_terms.is_empty() {
            errors.push("technical_terms must not be empty".to_string());
        }
        for (category, table) in self.category_tables() {
            if table.tokens.is_empty() {
                errors.push(format!("category {} has no match patterns", category));
            }
            if table.tokens.iter().any(|t| t.is_empty()) {
                errors.push(format!("category {} contains an empty pattern", category));
            }
        }
        if self.complexity_indicators.is_empty() {
            errors.push("complexity_indicators must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PlanError::Config(errors.join("; ")))
        }
    }
}
