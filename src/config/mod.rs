//! Configuration layer: runtime settings and the keyword pattern tables.
//!
//! Pattern tables are the subsystem's main tunable knowledge artifact, so
//! they live here as externally versioned configuration rather than inline
//! constants. Defaults mirror the reference tables.

mod patterns;
mod settings;

pub use patterns::{CategoryPatterns, ComplexityIndicator, PatternConfig};
pub use settings::ProjectConfig;
