use crate::index::{EmbeddingIndex, EncodeError, ScoredName};

/// Similarity ranking capability the engine depends on.
///
/// Implementations must rank over the same catalog the engine was built with.
pub trait SimilarityRanker: Send + Sync {
    /// `false` forces the lexical path.
    fn is_available(&self) -> bool {
        true
    }

    /// At most `k` names, best first, ties in catalog order.
    fn top_k(&self, query: &str, k: usize) -> Result<Vec<ScoredName>, EncodeError>;
}

impl SimilarityRanker for EmbeddingIndex {
    fn is_available(&self) -> bool {
        !self.is_empty()
    }

    fn top_k(&self, query: &str, k: usize) -> Result<Vec<ScoredName>, EncodeError> {
        EmbeddingIndex::top_k(self, query, k)
    }
}

/// Absent provider (lexical-only deployments).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRanker;

impl SimilarityRanker for NoRanker {
    fn is_available(&self) -> bool {
        false
    }

    fn top_k(&self, _query: &str, _k: usize) -> Result<Vec<ScoredName>, EncodeError> {
        Ok(Vec::new())
    }
}
