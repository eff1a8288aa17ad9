use thiserror::Error;

use crate::index::EncodeError;

#[derive(Debug, Error)]
pub enum MatchError {
    /// The similarity provider could not encode the query.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("invalid matcher config: {reason}")]
    InvalidConfig { reason: String },
}
