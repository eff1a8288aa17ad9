//! Matching decision engine.
//!
//! Per fragment, in one pass:
//! 1. normalize and expand the raw text
//! 2. the first override rule whose predicate holds wins
//! 3. otherwise rank by similarity and accept the best candidate at or above the threshold
//! 4. otherwise return the ranked names as suggestions
//!
//! Without a similarity provider, step 3 is replaced by token-overlap suggestions
//! (see [`lexical`]).

pub mod config;
pub mod engine;
pub mod error;
pub mod lexical;
pub mod ranker;
pub mod types;


pub use config::MatcherConfig;
pub use engine::MatchEngine;
pub use error::MatchError;
pub use lexical::{LexicalScore, lexical_suggestions};
pub use ranker::{NoRanker, SimilarityRanker};
pub use types::MatchResult;
