//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `LARDER_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::catalog::Catalog;
use crate::constants::{DEFAULT_ENCODE_CACHE_CAPACITY, DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TOP_K};
use crate::embedding::EncoderConfig;
use crate::matching::MatcherConfig;
use crate::rules::OverrideRules;
use crate::text::AbbreviationTable;

/// Matcher configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `LARDER_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Similarity cutoff for accepting a match. Default: `0.8`.
    pub threshold: f32,

    /// Maximum number of suggestions. Default: `3`.
    pub top_k: usize,

    /// Embedding model directory. `None` means lexical-only matching.
    pub model_path: Option<PathBuf>,

    /// Catalog JSON file. `None` uses the built-in catalog.
    pub catalog_path: Option<PathBuf>,

    /// Extra abbreviations (JSON object), merged over the defaults.
    pub abbreviations_path: Option<PathBuf>,

    /// Override rules (JSON array), replacing the defaults.
    pub rules_path: Option<PathBuf>,

    /// Continue in lexical-only mode when the index cannot be built. Default: `false`.
    pub lexical_on_index_failure: bool,

    /// Query vectors kept in memory. `0` disables the cache. Default: `1024`.
    pub encode_cache_capacity: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
            top_k: DEFAULT_TOP_K,
            model_path: None,
            catalog_path: None,
            abbreviations_path: None,
            rules_path: None,
            lexical_on_index_failure: false,
            encode_cache_capacity: DEFAULT_ENCODE_CACHE_CAPACITY,
        }
    }
}

impl Config {
    pub const ENV_THRESHOLD: &'static str = "LARDER_THRESHOLD";
    pub const ENV_TOP_K: &'static str = "LARDER_TOP_K";
    pub const ENV_MODEL_PATH: &'static str = EncoderConfig::ENV_MODEL_PATH;
    pub const ENV_CATALOG_PATH: &'static str = "LARDER_CATALOG_PATH";
    pub const ENV_ABBREVIATIONS_PATH: &'static str = "LARDER_ABBREVIATIONS_PATH";
    pub const ENV_RULES_PATH: &'static str = "LARDER_RULES_PATH";
    pub const ENV_LEXICAL_ON_INDEX_FAILURE: &'static str = "LARDER_LEXICAL_ON_INDEX_FAILURE";
    pub const ENV_ENCODE_CACHE_CAPACITY: &'static str = "LARDER_ENCODE_CACHE_CAPACITY";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let threshold = Self::parse_threshold_from_env(defaults.threshold)?;
        let top_k = Self::parse_top_k_from_env(defaults.top_k)?;
        let model_path = EncoderConfig::from_env().map(|encoder| encoder.model_dir);
        let catalog_path = Self::parse_optional_path_from_env(Self::ENV_CATALOG_PATH);
        let abbreviations_path = Self::parse_optional_path_from_env(Self::ENV_ABBREVIATIONS_PATH);
        let rules_path = Self::parse_optional_path_from_env(Self::ENV_RULES_PATH);
        let lexical_on_index_failure = Self::parse_bool_from_env(
            Self::ENV_LEXICAL_ON_INDEX_FAILURE,
            defaults.lexical_on_index_failure,
        )?;
        let encode_cache_capacity = Self::parse_u64_from_env(
            Self::ENV_ENCODE_CACHE_CAPACITY,
            defaults.encode_cache_capacity,
        );

        Ok(Self {
            threshold,
            top_k,
            model_path,
            catalog_path,
            abbreviations_path,
            rules_path,
            lexical_on_index_failure,
            encode_cache_capacity,
        })
    }

    /// Validates ranges and file paths (does not read any file).
    ///
    /// The model directory is checked when the index is built, so a missing model
    /// goes through the index-failure policy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::InvalidThreshold {
                value: self.threshold.to_string(),
            });
        }

        if self.top_k == 0 {
            return Err(ConfigError::InvalidTopK {
                value: self.top_k.to_string(),
            });
        }

        for path in [
            &self.catalog_path,
            &self.abbreviations_path,
            &self.rules_path,
        ]
        .into_iter()
        .flatten()
        {
            Self::require_file(path)?;
        }

        Ok(())
    }

    /// The configured catalog, or [`Catalog::builtin`].
    pub fn load_catalog(&self) -> Result<Catalog, ConfigError> {
        match &self.catalog_path {
            Some(path) => Ok(Catalog::load(path)?),
            None => {
                info!("No catalog file configured, using built-in catalog");
                Ok(Catalog::builtin())
            }
        }
    }

    /// Threshold, top-k, abbreviations and rules with any configured files applied.
    pub fn matcher_config(&self) -> Result<MatcherConfig, ConfigError> {
        let abbreviations = match &self.abbreviations_path {
            Some(path) => AbbreviationTable::default().merge(AbbreviationTable::load(path)?),
            None => AbbreviationTable::default(),
        };

        let rules = match &self.rules_path {
            Some(path) => OverrideRules::load(path)?,
            None => OverrideRules::default(),
        };

        Ok(MatcherConfig {
            threshold: self.threshold,
            top_k: self.top_k,
            abbreviations,
            rules,
        })
    }

    /// Encoder settings for the configured model, if any.
    pub fn encoder_config(&self) -> Option<EncoderConfig> {
        self.model_path.as_ref().map(EncoderConfig::new)
    }

    fn require_file(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            return Err(ConfigError::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.is_file() {
            return Err(ConfigError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    fn parse_threshold_from_env(default: f32) -> Result<f32, ConfigError> {
        match env::var(Self::ENV_THRESHOLD) {
            Ok(value) => {
                let threshold: f32 =
                    value
                        .trim()
                        .parse()
                        .map_err(|e| ConfigError::ThresholdParseError {
                            value: value.clone(),
                            source: e,
                        })?;

                if !(0.0..=1.0).contains(&threshold) {
                    return Err(ConfigError::InvalidThreshold { value });
                }

                Ok(threshold)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_top_k_from_env(default: usize) -> Result<usize, ConfigError> {
        match env::var(Self::ENV_TOP_K) {
            Ok(value) => {
                let top_k: usize =
                    value
                        .trim()
                        .parse()
                        .map_err(|e| ConfigError::TopKParseError {
                            value: value.clone(),
                            source: e,
                        })?;

                if top_k == 0 {
                    return Err(ConfigError::InvalidTopK { value });
                }

                Ok(top_k)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bool_from_env(name: &'static str, default: bool) -> Result<bool, ConfigError> {
        match env::var(name) {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidBool { name, value }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}
