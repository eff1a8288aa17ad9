use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::encoder::Encoder;
use super::error::EmbeddingError;

/// Table-driven encoder for tests.
///
/// Known texts return their registered vector; anything else returns the zero vector.
/// Texts registered with [`MockEncoder::fail_on`] return `InferenceFailed`.
#[derive(Debug, Default)]
pub struct MockEncoder {
    dim: usize,
    vectors: HashMap<String, Vec<f32>>,
    failing: HashSet<String>,
    fail_all: bool,
    calls: AtomicUsize,
}

impl MockEncoder {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            ..Self::default()
        }
    }

    /// Registers the vector returned for `text`.
    pub fn with_vector(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.into(), vector);
        self
    }

    pub fn fail_on(mut self, text: impl Into<String>) -> Self {
        self.failing.insert(text.into());
        self
    }

    /// Every call fails, including catalog encoding.
    pub fn failing(dim: usize) -> Self {
        Self {
            fail_all: true,
            ..Self::new(dim)
        }
    }

    /// Number of texts encoded so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Encoder for MockEncoder {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        if self.fail_all || self.failing.contains(text) {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("mock failure for {text:?}"),
            });
        }

        Ok(self
            .vectors
            .get(text)
            .cloned()
            .unwrap_or_else(|| vec![0.0; self.dim]))
    }

    fn dim(&self) -> usize {
        self.dim
    }
}
