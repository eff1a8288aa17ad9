//! Larder library crate (used by the CLI and integration tests).
//!
//! Maps noisy grocery-receipt lines onto a fixed catalog of canonical food items.
//!
//! # Pipeline
//!
//! Each fragment goes through [`normalize`] (drop quantities and trailing prices),
//! [`TokenExpander`] (receipt shorthand to words), [`OverrideRules`] (hand-written
//! keyword matches), then similarity ranking against an [`EmbeddingIndex`]. Without an
//! embedding model the engine falls back to token-overlap suggestions.
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`MatchEngine`], [`MatchResult`], [`MatcherConfig`] - Per-fragment decisions
//! - [`ReceiptProcessor`], [`ReceiptResponse`] - Whole-receipt processing
//! - [`Catalog`], [`ShelfLife`] - Canonical items and storage durations
//! - [`Config`], [`ConfigError`] - Environment configuration
//!
//! ## Embedding & Ranking
//! - [`TextEncoder`], [`EncoderConfig`], [`Encoder`] - Sentence embeddings
//! - [`EmbeddingIndex`] - Cosine ranking over the catalog
//! - [`SimilarityRanker`], [`NoRanker`] - Ranking capability seen by the engine
//!
//! ## Test/Mock Support
//! [`MockEncoder`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod index;
pub mod matching;
pub mod receipt;
pub mod rules;
pub mod startup;
pub mod text;

pub use catalog::{Catalog, CatalogError, ShelfLife};
pub use config::{Config, ConfigError};
pub use constants::{DimValidationError, validate_embedding_dim};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEncoder;
pub use embedding::{
    ENCODER_EMBEDDING_DIM, ENCODER_MAX_SEQ_LEN, EmbeddingError, Encoder, EncoderConfig,
    TextEncoder,
};
pub use index::{CanonicalItem, EmbeddingIndex, EncodeError, IndexBuildError, ScoredName};
pub use matching::{
    LexicalScore, MatchEngine, MatchError, MatchResult, MatcherConfig, NoRanker,
    SimilarityRanker, lexical_suggestions,
};
pub use receipt::{ItemResult, ReceiptProcessor, ReceiptResponse, split_fragments};
pub use rules::{OverrideRule, OverrideRules, RulePredicate, RulesError};
pub use startup::{StartupError, build_engine, build_processor};
pub use text::{AbbreviationTable, TextError, TokenExpander, normalize};
