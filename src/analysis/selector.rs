use std::cmp::Ordering;

use tracing::debug;

use crate::registry::{ComponentRegistry, DomainCategory, StrategyLevel, StrategyProfile};

use super::classifier::PatternMatch;

/// Selector output for one requirement.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Component ids, highest score first. Only components of the
    /// requirement's own category ever appear here.
    pub components: Vec<String>,
    pub validation_strategy: StrategyLevel,
    /// Estimated execution time, seconds.
    pub estimated_duration: u64,
}

/// Maps category + complexity to a ranked subset of the component registry,
/// a validation-strategy label and a duration estimate.
pub struct ComponentSelector<'a> {
    registry: &'a ComponentRegistry,
}

impl<'a> ComponentSelector<'a> {
    pub fn new(registry: &'a ComponentRegistry) -> Self {
        Self { registry }
    }

    pub fn select(
        &self,
        category: DomainCategory,
        complexity: f64,
        matched: &[PatternMatch],
        profile: StrategyProfile,
    ) -> Selection {
        Selection {
            components: self.rank_components(category, matched, profile),
            validation_strategy: validation_strategy_for(complexity),
            estimated_duration: estimated_duration(category, complexity),
        }
    }

    /// Score every registry component in the requirement's category:
    /// confidence×2 per capability keyword overlapping the matched pattern
    /// tokens, plus a reliability×0.1 bonus when the component sits at or
    /// below the active profile's complexity threshold. Ties keep registry
    /// declaration order; the top floor(max_components/2) survive.
    ///
    /// A requirement with no matched tokens at all (the synthetic fallback of
    /// an empty document, or a zero-match classification) cannot be scored
    /// meaningfully and selects the full category list in declaration order.
    fn rank_components(
        &self,
        category: DomainCategory,
        matched: &[PatternMatch],
        profile: StrategyProfile,
    ) -> Vec<String> {
        let candidates = self.registry.in_category(category);

        if matched.is_empty() {
            debug!(category = %category, "No matched tokens; selecting full category");
            return candidates.iter().map(|c| c.id.clone()).collect();
        }

        let mut scored: Vec<(f64, &str)> = Vec::new();
        for comp in &candidates {
            let mut score = 0.0;
            for m in matched {
                if comp.has_keyword(&m.token) {
                    score += m.confidence * 2.0;
                }
            }
            if comp.complexity_score <= profile.complexity_threshold {
                score += f64::from(comp.reliability_score) * 0.1;
            }
            if score > 0.0 {
                scored.push((score, comp.id.as_str()));
            }
        }

        // Stable sort: equal scores retain declaration order.
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        let keep = scored.len().min(profile.max_components / 2);
        scored
            .into_iter()
            .take(keep)
            .map(|(_, id)| id.to_string())
            .collect()
    }
}

fn validation_strategy_for(complexity: f64) -> StrategyLevel {
    if complexity > 0.7 {
        StrategyLevel::Comprehensive
    } else if complexity > 0.4 {
        StrategyLevel::Standard
    } else {
        StrategyLevel::Basic
    }
}

/// round(base_duration[category] × (1 + complexity)) seconds.
fn estimated_duration(category: DomainCategory, complexity: f64) -> u64 {
    (category.base_duration_secs() as f64 * (1.0 + complexity)).round() as u64
}
