//! In-memory embedding index over the canonical catalog.
//!
//! Built once at startup and read-only afterwards. Every stored vector and every
//! query vector is L2-normalized, so the dot product is the cosine similarity.

mod error;

#[cfg(test)]
mod tests;

pub use error::{EncodeError, IndexBuildError};

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use moka::sync::Cache;
use tracing::{debug, info};

use crate::constants::validate_embedding_dim;
use crate::embedding::encoder::normalize;
use crate::embedding::{EmbeddingError, Encoder, EncoderConfig, TextEncoder};

/// Catalog items are encoded in chunks of this size.
const BUILD_BATCH_SIZE: usize = 64;

/// A canonical name and its unit-length embedding.
#[derive(Debug, Clone)]
pub struct CanonicalItem {
    pub name: String,
    pub embedding: Vec<f32>,
}

/// A catalog name with its similarity to a query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredName {
    pub name: String,
    pub score: f32,
}

/// Catalog vectors plus the encoder used to embed queries.
pub struct EmbeddingIndex {
    items: Vec<CanonicalItem>,
    encoder: Arc<dyn Encoder>,
    query_cache: Option<Cache<String, Arc<Vec<f32>>>>,
}

impl std::fmt::Debug for EmbeddingIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingIndex")
            .field("items", &self.items.len())
            .field("dim", &self.encoder.dim())
            .field("query_cache", &self.query_cache.is_some())
            .finish()
    }
}

impl EmbeddingIndex {
    /// Deduplicates `names` (first occurrence wins) and encodes each one.
    pub fn build<I, S>(names: I, encoder: Arc<dyn Encoder>) -> Result<Self, IndexBuildError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let names: Vec<String> = names
            .into_iter()
            .map(Into::into)
            .filter(|name: &String| seen.insert(name.clone()))
            .collect();

        let dim = encoder.dim();
        let mut items = Vec::with_capacity(names.len());

        for chunk in names.chunks(BUILD_BATCH_SIZE) {
            let texts: Vec<&str> = chunk.iter().map(String::as_str).collect();
            let vectors = encoder
                .encode_batch(&texts)
                .map_err(|source| IndexBuildError::Encoding { source })?;

            if vectors.len() != chunk.len() {
                return Err(IndexBuildError::Encoding {
                    source: EmbeddingError::InferenceFailed {
                        reason: format!(
                            "encoder returned {} vectors for {} names",
                            vectors.len(),
                            chunk.len()
                        ),
                    },
                });
            }

            for (name, vector) in chunk.iter().zip(vectors) {
                validate_embedding_dim(vector.len(), dim).map_err(|source| {
                    IndexBuildError::Dimension {
                        name: name.clone(),
                        source,
                    }
                })?;
                items.push(CanonicalItem {
                    name: name.clone(),
                    embedding: normalize(vector),
                });
            }
        }

        info!(items = items.len(), dim, "Embedding index built");

        Ok(Self {
            items,
            encoder,
            query_cache: None,
        })
    }

    /// Loads a [`TextEncoder`] from `config` and builds the index with it.
    pub fn build_with_config<I, S>(
        names: I,
        config: EncoderConfig,
    ) -> Result<Self, IndexBuildError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let encoder =
            TextEncoder::load(config).map_err(|source| IndexBuildError::ModelLoad { source })?;
        Self::build(names, Arc::new(encoder))
    }

    /// Memoizes query vectors (LRU, `capacity` entries). `0` disables the cache.
    pub fn with_query_cache(mut self, capacity: u64) -> Self {
        self.query_cache = (capacity > 0).then(|| Cache::builder().max_capacity(capacity).build());
        self
    }

    /// Encodes `query` and returns the `k` most similar catalog names, best first.
    ///
    /// Ties keep catalog order. An empty index yields an empty result without
    /// encoding anything.
    pub fn top_k(&self, query: &str, k: usize) -> Result<Vec<ScoredName>, EncodeError> {
        if self.items.is_empty() || k == 0 {
            return Ok(vec![]);
        }

        let query_vec = self.encode_query(query)?;

        let mut scored: Vec<(usize, f32)> = self
            .items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let score = dot(&query_vec, &item.embedding);
                (idx, if score.is_nan() { f32::NEG_INFINITY } else { score })
            })
            .collect();

        // Stable: equal scores stay in insertion order.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(k);

        debug!(
            query_len = query.len(),
            k,
            top_score = scored.first().map(|(_, s)| *s),
            "Ranked catalog by similarity"
        );

        Ok(scored
            .into_iter()
            .map(|(idx, score)| ScoredName {
                name: self.items[idx].name.clone(),
                score,
            })
            .collect())
    }

    fn encode_query(&self, query: &str) -> Result<Arc<Vec<f32>>, EncodeError> {
        if let Some(cache) = &self.query_cache
            && let Some(hit) = cache.get(query)
        {
            return Ok(hit);
        }

        let vector = self.encoder.encode(query)?;
        validate_embedding_dim(vector.len(), self.encoder.dim()).map_err(|e| {
            EncodeError::from(EmbeddingError::InferenceFailed {
                reason: e.to_string(),
            })
        })?;
        let vector = Arc::new(normalize(vector));

        if let Some(cache) = &self.query_cache {
            cache.insert(query.to_string(), Arc::clone(&vector));
        }
        Ok(vector)
    }

    /// Catalog items in insertion order.
    pub fn items(&self) -> &[CanonicalItem] {
        &self.items
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.name.as_str())
    }

    pub fn dim(&self) -> usize {
        self.encoder.dim()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
