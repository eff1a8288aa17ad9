use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::index::EmbeddingIndex;
use crate::rules::OverrideRules;
use crate::text::{TokenExpander, normalize};

use super::config::MatcherConfig;
use super::error::MatchError;
use super::lexical::lexical_suggestions;
use super::ranker::{NoRanker, SimilarityRanker};
use super::types::MatchResult;

/// Maps raw receipt fragments onto catalog names.
///
/// Immutable after construction; share it behind an `Arc` across threads.
pub struct MatchEngine {
    catalog: Arc<Catalog>,
    ranker: Arc<dyn SimilarityRanker>,
    expander: TokenExpander,
    rules: OverrideRules,
    threshold: f32,
    top_k: usize,
}

impl std::fmt::Debug for MatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchEngine")
            .field("catalog", &self.catalog.len())
            .field("ranker", &self.ranker.is_available())
            .field("rules", &self.rules.len())
            .field("threshold", &self.threshold)
            .field("top_k", &self.top_k)
            .finish()
    }
}

impl MatchEngine {
    /// Rules whose target is not in `catalog` are disabled here.
    pub fn new(
        catalog: Arc<Catalog>,
        ranker: Arc<dyn SimilarityRanker>,
        config: MatcherConfig,
    ) -> Result<Self, MatchError> {
        config.validate()?;

        let (rules, disabled) = config
            .rules
            .partition_by_target(|target| catalog.contains(target));
        for rule in &disabled {
            warn!(
                rule = %rule.name,
                target = %rule.target,
                "Override rule disabled: target not in catalog"
            );
        }

        info!(
            catalog = catalog.len(),
            rules = rules.len(),
            abbreviations = config.abbreviations.len(),
            similarity = ranker.is_available(),
            threshold = config.threshold,
            top_k = config.top_k,
            "Match engine ready"
        );

        Ok(Self {
            catalog,
            ranker,
            expander: TokenExpander::new(config.abbreviations),
            rules,
            threshold: config.threshold,
            top_k: config.top_k,
        })
    }

    /// Engine with the absent provider; every non-override match is lexical.
    pub fn lexical_only(catalog: Arc<Catalog>, config: MatcherConfig) -> Result<Self, MatchError> {
        Self::new(catalog, Arc::new(NoRanker), config)
    }

    /// Engine ranking over `index`, which must be built from `catalog.names()`.
    ///
    /// Any other name set is rejected so a match always names a catalog item.
    pub fn with_index(
        catalog: Arc<Catalog>,
        index: EmbeddingIndex,
        config: MatcherConfig,
    ) -> Result<Self, MatchError> {
        if !index.names().eq(catalog.names().iter().map(String::as_str)) {
            return Err(MatchError::InvalidConfig {
                reason: format!(
                    "index holds {} names that differ from the {} catalog names",
                    index.len(),
                    catalog.len()
                ),
            });
        }
        Self::new(catalog, Arc::new(index), config)
    }

    /// Normalizes then expands `raw`; the text every later stage sees.
    pub fn prepare(&self, raw: &str) -> String {
        self.expander.expand(&normalize(raw))
    }

    /// Runs the full decision for one fragment, surfacing encode failures.
    pub fn try_match(&self, raw: &str) -> Result<MatchResult, MatchError> {
        let expanded = self.prepare(raw);

        if let Some(rule) = self.rules.try_override(&expanded) {
            debug!(rule = %rule.name, target = %rule.target, "Override rule matched");
            return Ok(MatchResult::matched(rule.target.clone()));
        }

        if !self.ranker.is_available() || self.catalog.is_empty() {
            debug!("No similarity provider, using lexical suggestions");
            return Ok(self.lexical(&expanded));
        }

        let results = self.ranker.top_k(&expanded, self.top_k)?;
        let Some(best) = results.first() else {
            debug!("Similarity ranking returned nothing, using lexical suggestions");
            return Ok(self.lexical(&expanded));
        };

        if best.score >= self.threshold {
            debug!(
                name = %best.name,
                score = best.score,
                threshold = self.threshold,
                "Similarity match accepted"
            );
            return Ok(MatchResult::matched(best.name.clone()));
        }

        debug!(
            score = best.score,
            threshold = self.threshold,
            "Best candidate below threshold"
        );
        Ok(MatchResult::unmatched(
            results.into_iter().map(|r| r.name).collect(),
        ))
    }

    /// Like [`try_match`](Self::try_match), but an encode failure degrades to
    /// lexical suggestions instead of an error.
    pub fn match_item(&self, raw: &str) -> MatchResult {
        match self.try_match(raw) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Similarity ranking failed, falling back to lexical");
                self.lexical(&self.prepare(raw))
            }
        }
    }

    fn lexical(&self, expanded: &str) -> MatchResult {
        MatchResult::unmatched(lexical_suggestions(
            expanded,
            self.catalog.names(),
            self.top_k,
        ))
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Rules still active after catalog filtering.
    pub fn rules(&self) -> &OverrideRules {
        &self.rules
    }

    pub fn expander(&self) -> &TokenExpander {
        &self.expander
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn has_similarity(&self) -> bool {
        self.ranker.is_available()
    }
}
