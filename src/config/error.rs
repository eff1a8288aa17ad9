//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::rules::RulesError;
use crate::text::TextError;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Threshold string could not be parsed as a number.
    #[error("failed to parse threshold '{value}': {source}")]
    ThresholdParseError {
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// Threshold is outside `[0, 1]`.
    #[error("invalid threshold '{value}': must be between 0 and 1")]
    InvalidThreshold { value: String },

    /// Top-k string could not be parsed as a number.
    #[error("failed to parse top_k '{value}': {source}")]
    TopKParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("invalid top_k '{value}': must be at least 1")]
    InvalidTopK { value: String },

    /// Boolean flag was not one of `true/false/1/0/yes/no/on/off`.
    #[error("invalid boolean for {name}: '{value}'")]
    InvalidBool { name: &'static str, value: String },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a file (when a file was expected).
    #[error("path is not a file: {path}")]
    NotAFile { path: PathBuf },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Abbreviations(#[from] TextError),

    #[error(transparent)]
    Rules(#[from] RulesError),
}
