use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextError {
    #[error("failed to read abbreviation table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse abbreviation table {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
