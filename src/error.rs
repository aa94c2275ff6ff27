use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    /// A selected component id is absent from the static registry, or belongs
    /// to a different category than the requirement that selected it. This is
    /// a registry/category inconsistency, not a data quality issue: refuse to
    /// produce a plan.
    #[error("Registry mismatch: component '{component}' is not registered under category '{category}'")]
    RegistryMismatch { component: String, category: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PlanError>;
