//! Fragment cleanup before matching.
//!
//! - [`normalize`] strips quantity/unit tokens and trailing prices.
//! - [`TokenExpander`] lowercases, tokenizes and rewrites known abbreviations
//!   using an [`AbbreviationTable`].

pub mod abbreviations;
mod error;
pub mod expand;
pub mod normalize;


pub use abbreviations::AbbreviationTable;
pub use error::TextError;
pub use expand::TokenExpander;
pub use normalize::normalize;
