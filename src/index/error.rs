use thiserror::Error;

use crate::constants::DimValidationError;
use crate::embedding::EmbeddingError;

/// Startup failure while building the embedding index. Not retried.
#[derive(Debug, Error)]
pub enum IndexBuildError {
    #[error("failed to load encoder model: {source}")]
    ModelLoad {
        #[source]
        source: EmbeddingError,
    },

    #[error("failed to encode catalog: {source}")]
    Encoding {
        #[source]
        source: EmbeddingError,
    },

    #[error("invalid vector for catalog item {name:?}: {source}")]
    Dimension {
        name: String,
        #[source]
        source: DimValidationError,
    },
}

/// Per-query encoding failure. Recoverable by the caller.
#[derive(Debug, Error)]
#[error("failed to encode query: {source}")]
pub struct EncodeError {
    #[source]
    pub source: EmbeddingError,
}

impl From<EmbeddingError> for EncodeError {
    fn from(source: EmbeddingError) -> Self {
        Self { source }
    }
}
