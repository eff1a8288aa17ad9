//! Text encoder (BERT sentence model + tokenizer).
//!
//! Use [`EncoderConfig::stub`] for tests/examples without model files.

/// Encoder configuration.
pub mod config;

#[cfg(test)]
mod tests;

pub use config::{ENCODER_EMBEDDING_DIM, ENCODER_MAX_SEQ_LEN, EncoderConfig};

use std::hash::{DefaultHasher, Hash, Hasher};

use candle_core::{Device, Tensor};
use parking_lot::Mutex;
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use crate::embedding::bert::BertSentenceModel;
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::load_tokenizer;

/// Anything that turns text into a fixed-length, unit-length vector.
///
/// Implementations must be deterministic: the same input always yields the same vector.
pub trait Encoder: Send + Sync {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|text| self.encode(text)).collect()
    }

    /// Length of every vector this encoder produces.
    fn dim(&self) -> usize;
}

enum EncoderBackend {
    Model {
        // Forward passes are serialized; GPU backends are not guaranteed reentrant.
        model: Mutex<BertSentenceModel>,
        tokenizer: Tokenizer,
        device: Device,
        dim: usize,
    },
    Stub {
        dim: usize,
    },
}

/// Sentence encoder backed by a local BERT-family model (supports stub mode).
pub struct TextEncoder {
    backend: EncoderBackend,
    config: EncoderConfig,
}

impl std::fmt::Debug for TextEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEncoder")
            .field(
                "backend",
                &match &self.backend {
                    EncoderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EncoderBackend::Stub { .. } => "Stub".to_string(),
                },
            )
            .field("dim", &self.dim())
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl TextEncoder {
    /// Loads the encoder from a config (stub mode is supported).
    pub fn load(config: EncoderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!("Encoder running in STUB mode (testing only)");
            return Ok(Self {
                backend: EncoderBackend::Stub {
                    dim: config.embedding_dim,
                },
                config,
            });
        }

        if !config.model_available() {
            return Err(EmbeddingError::ModelLoadFailed {
                reason: format!(
                    "expected config.json, tokenizer.json and model.safetensors in {}",
                    config.model_dir.display()
                ),
            });
        }

        let device = select_device();
        debug!(?device, "Selected compute device for encoder");

        let tokenizer = load_tokenizer(&config.model_dir, config.max_seq_len).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        let model = BertSentenceModel::load(&config, &device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT model: {}", e),
            }
        })?;
        let dim = model.hidden_size();

        info!(
            model_dir = %config.model_dir.display(),
            dim,
            max_seq_len = config.max_seq_len,
            "Encoder model loaded successfully"
        );

        Ok(Self {
            backend: EncoderBackend::Model {
                model: Mutex::new(model),
                tokenizer,
                device,
                dim,
            },
            config,
        })
    }

    /// Convenience for `TextEncoder::load(EncoderConfig::stub())`.
    pub fn stub() -> Result<Self, EmbeddingError> {
        Self::load(EncoderConfig::stub())
    }

    fn encode_with_model(
        &self,
        texts: &[&str],
        model: &Mutex<BertSentenceModel>,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let encodings = tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| EmbeddingError::TokenizationFailed {
                reason: e.to_string(),
            })?;

        let max_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0)
            .max(1);

        let batch = texts.len();
        let mut ids = Vec::with_capacity(batch * max_len);
        let mut type_ids = Vec::with_capacity(batch * max_len);
        let mut mask = Vec::with_capacity(batch * max_len);

        for encoding in &encodings {
            let len = encoding.get_ids().len();
            ids.extend_from_slice(encoding.get_ids());
            type_ids.extend_from_slice(encoding.get_type_ids());
            mask.extend_from_slice(encoding.get_attention_mask());
            ids.resize(ids.len() + max_len - len, 0);
            type_ids.resize(type_ids.len() + max_len - len, 0);
            mask.resize(mask.len() + max_len - len, 0);
        }

        debug!(batch, max_len, "Encoding batch (transformer forward pass)");

        let input_ids = Tensor::from_vec(ids, (batch, max_len), device)?;
        let token_type_ids = Tensor::from_vec(type_ids, (batch, max_len), device)?;
        let attention_mask = Tensor::from_vec(mask, (batch, max_len), device)?;

        let pooled = model
            .lock()
            .forward(&input_ids, &token_type_ids, &attention_mask)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Transformer forward pass failed: {}", e),
            })?;

        Ok(pooled.to_vec2::<f32>()?)
    }

    /// Hashed bag of word and character-trigram features.
    ///
    /// Inputs that share tokens or spelling fragments get positive cosine similarity,
    /// which keeps stub-mode ranking meaningful for receipt text.
    fn encode_stub(&self, text: &str, dim: usize) -> Vec<f32> {
        let mut embedding = vec![0.0f32; dim];
        let lowered = text.to_lowercase();

        for word in lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            embedding[feature_slot("w", word, dim)] += 1.0;

            let padded: Vec<char> = format!(" {word} ").chars().collect();
            for gram in padded.windows(3) {
                let gram: String = gram.iter().collect();
                embedding[feature_slot("g", &gram, dim)] += 0.5;
            }
        }

        normalize(embedding)
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EncoderBackend::Stub { .. })
    }

    /// Returns the encoder configuration.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }
}

impl Encoder for TextEncoder {
    fn encode(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut vectors = self.encode_batch(&[text])?;
        vectors.pop().ok_or_else(|| EmbeddingError::InferenceFailed {
            reason: "encoder returned no vector".to_string(),
        })
    }

    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        match &self.backend {
            EncoderBackend::Model {
                model,
                tokenizer,
                device,
                ..
            } => self.encode_with_model(texts, model, tokenizer, device),
            EncoderBackend::Stub { dim } => Ok(texts
                .iter()
                .map(|text| self.encode_stub(text, *dim))
                .collect()),
        }
    }

    fn dim(&self) -> usize {
        match &self.backend {
            EncoderBackend::Model { dim, .. } | EncoderBackend::Stub { dim } => *dim,
        }
    }
}

fn feature_slot(kind: &str, feature: &str, dim: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    kind.hash(&mut hasher);
    feature.hash(&mut hasher);
    (hasher.finish() % dim as u64) as usize
}

/// Scales `v` to unit length; the zero vector is returned unchanged.
pub fn normalize(mut v: Vec<f32>) -> Vec<f32> {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in &mut v {
            *x /= norm;
        }
    }
    v
}
