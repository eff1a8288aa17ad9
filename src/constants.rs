//! Cross-cutting, shared constants.
//!
//! Matching defaults live here so the config layer, the engine and the binary agree
//! on them. The embedding dimension is a default for the stub encoder only; a loaded
//! model reports its own hidden size.

/// Minimum cosine similarity for accepting the best embedding hit as a match.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.8;

/// Maximum number of suggestions returned for an unmatched fragment.
pub const DEFAULT_TOP_K: usize = 3;

/// Output dimension of the stub encoder (matches small BERT-family sentence models).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Max tokens fed to the encoder per text. Receipt lines are far shorter.
pub const DEFAULT_MAX_SEQ_LEN: usize = 512;

/// Default capacity of the per-process query-vector cache.
pub const DEFAULT_ENCODE_CACHE_CAPACITY: u64 = 1024;

/// Error returned when a vector does not have the dimension the index was built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimValidationError {
    /// Embedding dimension cannot be zero.
    ZeroDimension,
    /// Runtime dimension does not match expected dimension.
    DimensionMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for DimValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "embedding dimension cannot be zero"),
            Self::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "dimension mismatch: expected {}, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for DimValidationError {}

/// Validates that a runtime embedding dimension matches the expected dimension.
///
/// # Example
///
/// ```
/// use larder::constants::{validate_embedding_dim, DEFAULT_EMBEDDING_DIM};
///
/// validate_embedding_dim(384, DEFAULT_EMBEDDING_DIM).unwrap();
/// assert!(validate_embedding_dim(768, DEFAULT_EMBEDDING_DIM).is_err());
/// ```
pub fn validate_embedding_dim(actual: usize, expected: usize) -> Result<(), DimValidationError> {
    if expected == 0 {
        return Err(DimValidationError::ZeroDimension);
    }
    if actual != expected {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
