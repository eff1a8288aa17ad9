//! Builds a ready [`ReceiptProcessor`] from [`Config`].

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::config::{Config, ConfigError};
use crate::embedding::EncoderConfig;
use crate::index::{EmbeddingIndex, IndexBuildError};
use crate::matching::{MatchEngine, MatchError, MatcherConfig, NoRanker, SimilarityRanker};
use crate::receipt::ReceiptProcessor;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Raised only when `lexical_on_index_failure` is off.
    #[error(transparent)]
    IndexBuild(#[from] IndexBuildError),

    #[error(transparent)]
    Match(#[from] MatchError),
}

/// Loads the catalog and tables, builds the index if a model is configured, and
/// wires the engine.
pub fn build_processor(config: &Config) -> Result<ReceiptProcessor, StartupError> {
    config.validate()?;

    let catalog = Arc::new(config.load_catalog()?);
    let matcher = config.matcher_config()?;
    let encoder = config.encoder_config();

    let engine = build_engine(catalog, encoder, matcher, config)?;
    Ok(ReceiptProcessor::new(Arc::new(engine)))
}

/// Like [`build_processor`], with the encoder chosen by the caller.
///
/// `None` selects lexical-only matching.
pub fn build_engine(
    catalog: Arc<Catalog>,
    encoder: Option<EncoderConfig>,
    matcher: MatcherConfig,
    config: &Config,
) -> Result<MatchEngine, StartupError> {
    let ranker: Arc<dyn SimilarityRanker> = match encoder {
        None => {
            info!("No embedding model configured, lexical-only matching");
            Arc::new(NoRanker)
        }
        Some(encoder) => {
            let model_dir = encoder.model_dir.clone();
            match EmbeddingIndex::build_with_config(catalog.names().iter().cloned(), encoder) {
                Ok(index) => Arc::new(index.with_query_cache(config.encode_cache_capacity)),
                Err(e) if config.lexical_on_index_failure => {
                    warn!(
                        error = %e,
                        model_dir = %model_dir.display(),
                        "Embedding index unavailable, continuing with lexical-only matching"
                    );
                    Arc::new(NoRanker)
                }
                Err(e) => return Err(e.into()),
            }
        }
    };

    Ok(MatchEngine::new(catalog, ranker, matcher)?)
}
