use regex::Regex;
use tracing::debug;

use crate::config::PatternConfig;
use crate::error::{PlanError, Result};
use crate::utils::round2;

use super::Priority;

const LENGTH_WEIGHT: f64 = 0.3;
const TECHNICAL_WEIGHT: f64 = 0.4;
const PRIORITY_WEIGHT: f64 = 0.3;

/// Length saturates at this many characters.
const LENGTH_CEILING: f64 = 1000.0;
/// Technical-term count saturates at this many whole-word matches.
const TECHNICAL_CEILING: f64 = 10.0;

/// Document-wide complexity profile: the aggregate level picks the active
/// selection strategy profile and drives partial-success criteria.
#[derive(Debug, Clone)]
pub struct ComplexityProfile {
    pub level: crate::registry::StrategyLevel,
    /// (indicator name, occurrence count) in configuration order.
    pub indicator_counts: Vec<(String, usize)>,
    pub total_score: usize,
}

/// Computes normalized difficulty per requirement and the aggregate
/// document-level complexity profile.
pub struct ComplexityEstimator {
    technical_terms: Regex,
    indicators: Vec<(String, Regex)>,
}

impl ComplexityEstimator {
    pub fn new(patterns: &PatternConfig) -> Result<Self> {
        let technical_terms = word_alternation(&patterns.technical_terms)?;
        let indicators = patterns
            .complexity_indicators
            .iter()
            .map(|ind| Ok((ind.name.clone(), alternation(&ind.tokens)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            technical_terms,
            indicators,
        })
    }

    /// complexity = 0.3·length + 0.4·technical + 0.3·priority, rounded to two
    /// decimals. Always within [0, 1].
    pub fn estimate(&self, description: &str, priority: Priority) -> f64 {
        let length_score = (description.chars().count() as f64 / LENGTH_CEILING).min(1.0);
        let technical_count = self.technical_terms.find_iter(description).count();
        let technical_score = (technical_count as f64 / TECHNICAL_CEILING).min(1.0);
        let priority_score = priority.complexity_weight();

        let complexity = round2(
            length_score * LENGTH_WEIGHT
                + technical_score * TECHNICAL_WEIGHT
                + priority_score * PRIORITY_WEIGHT,
        );
        complexity.clamp(0.0, 1.0)
    }

    /// Aggregate complexity over the whole document from the configured
    /// indicator groups: total < 10 ⇒ basic, < 25 ⇒ standard, else
    /// comprehensive.
    pub fn document_profile(&self, document: &str) -> ComplexityProfile {
        use crate::registry::StrategyLevel;

        let lower = document.to_lowercase();
        let indicator_counts: Vec<(String, usize)> = self
            .indicators
            .iter()
            .map(|(name, re)| (name.clone(), re.find_iter(&lower).count()))
            .collect();
        let total_score: usize = indicator_counts.iter().map(|(_, c)| c).sum();

        let level = if total_score < 10 {
            StrategyLevel::Basic
        } else if total_score < 25 {
            StrategyLevel::Standard
        } else {
            StrategyLevel::Comprehensive
        };
        debug!(total_score, level = %level, "Document complexity profile");

        ComplexityProfile {
            level,
            indicator_counts,
            total_score,
        }
    }
}

/// Case-insensitive alternation over literal tokens, preferring earlier
/// tokens at the same position.
fn alternation(tokens: &[String]) -> Result<Regex> {
    build(tokens, false)
}

/// Like [`alternation`] but anchored at word boundaries.
fn word_alternation(tokens: &[String]) -> Result<Regex> {
    build(tokens, true)
}

fn build(tokens: &[String], whole_word: bool) -> Result<Regex> {
    let escaped: Vec<String> = tokens.iter().map(|t| regex::escape(t)).collect();
    let body = escaped.join("|");
    let pattern = if whole_word {
        format!(r"(?i)\b(?:{})\b", body)
    } else {
        format!("(?i)(?:{})", body)
    };
    Regex::new(&pattern).map_err(|e| PlanError::Config(format!("bad pattern table: {}", e)))
}
