use serde::Serialize;
use tracing::debug;

use crate::config::PatternConfig;
use crate::registry::DomainCategory;

/// A pattern token that matched a requirement description, with the
/// occurrence-derived confidence the selector scores against.
#[derive(Debug, Clone, Serialize)]
pub struct PatternMatch {
    pub token: String,
    pub count: usize,
    /// min(count * 0.2, 1.0)
    pub confidence: f64,
}

/// Classification outcome: winning category plus the tokens of that
/// category's table that matched.
#[derive(Debug, Clone)]
pub struct Classification {
    pub category: DomainCategory,
    pub matched: Vec<PatternMatch>,
}

/// Assigns each requirement to one of the five fixed domain categories by
/// keyword-frequency scoring.
///
/// Score(category) is the total case-insensitive occurrence count of that
/// category's pattern tokens in the description. The winner is the argmax
/// under the fixed tie-break order ui → api → data → ai → system; all-zero
/// scores default to system. The tie-break is a documented rule, not an
/// iteration-order accident — tests pin it.
pub struct RequirementClassifier<'a> {
    patterns: &'a PatternConfig,
}

impl<'a> RequirementClassifier<'a> {
    pub fn new(patterns: &'a PatternConfig) -> Self {
        Self { patterns }
    }

    pub fn classify(&self, description: &str) -> Classification {
        let lower = description.to_lowercase();

        let mut best: Option<(DomainCategory, usize, Vec<PatternMatch>)> = None;
        for (category, table) in self.patterns.category_tables() {
            let matched = match_tokens(&lower, &table.tokens);
            let score: usize = matched.iter().map(|m| m.count).sum();
            debug!(category = %category, score, "Category score");
            // Strictly-greater keeps the earlier category on ties.
            let better = match &best {
                Some((_, best_score, _)) => score > *best_score,
                None => true,
            };
            if better {
                best = Some((category, score, matched));
            }
        }

        // category_tables() is never empty, and ends with system.
        let (category, score, matched) = best.expect("at least one category table");
        if score == 0 {
            return Classification {
                category: DomainCategory::System,
                matched: Vec::new(),
            };
        }
        Classification { category, matched }
    }
}

fn match_tokens(lower_description: &str, tokens: &[String]) -> Vec<PatternMatch> {
    tokens
        .iter()
        .filter_map(|token| {
            let count = lower_description.matches(token.as_str()).count();
            if count == 0 {
                return None;
            }
            Some(PatternMatch {
                token: token.clone(),
                count,
                confidence: (count as f64 * 0.2).min(1.0),
            })
        })
        .collect()
}
