//! Embedding + model utilities.
//!
//! - [`encoder`] turns text into unit-length vectors (BERT model or stub).
//! - [`bert`] holds the sentence model and pooling helpers.

/// BERT sentence model with mean pooling.
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
/// Text encoder and the [`Encoder`] seam.
pub mod encoder;
mod error;
/// Table-driven encoder for tests.
#[cfg(any(test, feature = "mock"))]
pub mod mock;
/// Tokenizer loading helpers.
pub mod utils;

pub use encoder::{
    ENCODER_EMBEDDING_DIM, ENCODER_MAX_SEQ_LEN, Encoder, EncoderConfig, TextEncoder,
};
pub use error::EmbeddingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEncoder;
