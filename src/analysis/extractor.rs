use tracing::{debug, warn};

use crate::config::PatternConfig;
use crate::utils::truncate_chars;

use super::Priority;

/// Display summaries are capped at this many characters.
const SUMMARY_MAX_CHARS: usize = 500;

/// A discrete requirement statement split out of the document, before
/// classification.
#[derive(Debug, Clone)]
pub struct RequirementBlock {
    /// Stable, order-derived id: `req_1`, `req_2`, ... (`req_general` for the
    /// synthetic fallback).
    pub id: String,
    /// Full untruncated block text.
    pub description: String,
    /// Truncated display copy.
    pub summary: String,
    pub priority: Priority,
    /// True when the document had no opening line and the whole text was
    /// wrapped into a single fallback requirement.
    pub synthetic: bool,
}

/// Splits raw document text into discrete requirement blocks.
///
/// A line containing any opener keyword (case-insensitively) opens a new
/// block; following non-empty lines are appended to its description until the
/// next opening line. A document with no opening line degrades to exactly one
/// synthetic requirement covering the full text.
pub struct RequirementExtractor<'a> {
    patterns: &'a PatternConfig,
}

impl<'a> RequirementExtractor<'a> {
    pub fn new(patterns: &'a PatternConfig) -> Self {
        Self { patterns }
    }

    pub fn extract(&self, document: &str) -> Vec<RequirementBlock> {
        let mut blocks: Vec<RequirementBlock> = Vec::new();
        let mut current: Option<String> = None;

        for raw_line in document.lines() {
            let line = raw_line.trim();
            if self.is_opener(line) {
                if let Some(description) = current.take() {
                    blocks.push(self.finish_block(blocks.len() + 1, description));
                }
                current = Some(line.to_string());
            } else if !line.is_empty() {
                if let Some(description) = current.as_mut() {
                    description.push(' ');
                    description.push_str(line);
                }
                // Lines before the first opener are not requirement text.
            }
        }
        if let Some(description) = current.take() {
            blocks.push(self.finish_block(blocks.len() + 1, description));
        }

        if blocks.is_empty() {
            warn!("No requirement openers found; emitting synthetic general requirement");
            return vec![self.synthetic_block(document)];
        }

        debug!(count = blocks.len(), "Extracted requirement blocks");
        blocks
    }

    fn is_opener(&self, line: &str) -> bool {
        if line.is_empty() {
            return false;
        }
        let lower = line.to_lowercase();
        self.patterns
            .opener_keywords
            .iter()
            .any(|k| lower.contains(k.as_str()))
    }

    fn finish_block(&self, index: usize, description: String) -> RequirementBlock {
        let priority = self.extract_priority(&description);
        RequirementBlock {
            id: format!("req_{}", index),
            summary: truncate_chars(&description, SUMMARY_MAX_CHARS),
            description,
            priority,
            synthetic: false,
        }
    }

    /// The synthetic fallback keeps the untruncated text for classification;
    /// only the display summary is truncated.
    fn synthetic_block(&self, document: &str) -> RequirementBlock {
        RequirementBlock {
            id: "req_general".to_string(),
            description: document.to_string(),
            summary: truncate_chars(document, SUMMARY_MAX_CHARS),
            priority: Priority::Medium,
            synthetic: true,
        }
    }

    fn extract_priority(&self, text: &str) -> Priority {
        let lower = text.to_lowercase();
        if self
            .patterns
            .high_priority_keywords
            .iter()
            .any(|k| lower.contains(k.as_str()))
        {
            Priority::High
        } else if self
            .patterns
            .low_priority_keywords
            .iter()
            .any(|k| lower.contains(k.as_str()))
        {
            Priority::Low
        } else {
            Priority::Medium
        }
    }
}
