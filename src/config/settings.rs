use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::{PlanError, Result};
use crate::registry::StrategyLevel;

/// Caller-supplied project configuration. Carried through to the plan
/// consumer; does not alter core scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Target environment label (e.g. "development", "production").
    pub environment: String,
    /// Requested validation thoroughness, echoed to the orchestration layer.
    pub validation_level: StrategyLevel,
    /// Whether the consumer may execute independent phases in parallel.
    pub parallel_execution: bool,
    /// Per-workflow dispatch timeout, seconds. Enforced by the orchestration
    /// layer, not by this core.
    pub timeout_secs: u64,
    /// Bound on the per-requirement analysis worker pool.
    pub max_parallel_workers: usize,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            validation_level: StrategyLevel::Standard,
            parallel_execution: true,
            timeout_secs: 300,
            max_parallel_workers: 4,
        }
    }
}

impl ProjectConfig {
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values, collecting all errors before failing.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.environment.is_empty() {
            errors.push("environment must not be empty");
        }
        if self.timeout_secs == 0 {
            errors.push("timeout_secs must be greater than 0");
        }
        if self.max_parallel_workers == 0 {
            errors.push("max_parallel_workers must be greater than 0");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PlanError::Config(errors.join("; ")))
        }
    }
}
