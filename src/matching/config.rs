use crate::constants::{DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TOP_K};
use crate::rules::OverrideRules;
use crate::text::AbbreviationTable;

use super::error::MatchError;

/// Everything the engine needs besides the catalog and the ranker.
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Minimum similarity for accepting the best candidate. Default: `0.8`.
    pub threshold: f32,
    /// Maximum number of suggestions. Default: `3`.
    pub top_k: usize,
    pub abbreviations: AbbreviationTable,
    /// Checked in order before similarity ranking.
    pub rules: OverrideRules,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            top_k: DEFAULT_TOP_K,
            abbreviations: AbbreviationTable::default(),
            rules: OverrideRules::default(),
        }
    }
}

impl MatcherConfig {
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_abbreviations(mut self, abbreviations: AbbreviationTable) -> Self {
        self.abbreviations = abbreviations;
        self
    }

    pub fn with_rules(mut self, rules: OverrideRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(MatchError::InvalidConfig {
                reason: format!("threshold must be in [0, 1], got {}", self.threshold),
            });
        }
        if self.top_k == 0 {
            return Err(MatchError::InvalidConfig {
                reason: "top_k must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
