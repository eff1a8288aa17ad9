//! Receipt-level orchestration: match every fragment and attach shelf life.

mod types;


pub use types::{ItemResult, ReceiptResponse};

use std::sync::Arc;

use tracing::{debug, info};

use crate::matching::lexical::alphabetic_tokens;
use crate::matching::{MatchEngine, MatchResult};

/// Lines carrying any of these words are payment or summary lines, not items.
const NON_ITEM_MARKERS: &[&str] = &[
    "total",
    "subtotal",
    "tax",
    "change",
    "visa",
    "mastercard",
    "debit",
    "credit",
];

/// Splits raw receipt text into candidate item fragments.
///
/// Blank lines and lines with a payment or summary marker are dropped.
pub fn split_fragments(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| {
            let tokens = alphabetic_tokens(line);
            !NON_ITEM_MARKERS.iter().any(|marker| tokens.contains(*marker))
        })
        .map(str::to_string)
        .collect()
}

/// Matches receipt fragments and enriches them from the catalog.
#[derive(Debug, Clone)]
pub struct ReceiptProcessor {
    engine: Arc<MatchEngine>,
}

impl ReceiptProcessor {
    pub fn new(engine: Arc<MatchEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    /// One [`ItemResult`] per non-blank fragment, in input order.
    pub fn process<I, S>(&self, fragments: I) -> ReceiptResponse
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let items: Vec<ItemResult> = fragments
            .into_iter()
            .filter(|fragment| !fragment.as_ref().trim().is_empty())
            .map(|fragment| self.process_fragment(fragment.as_ref()))
            .collect();

        let response = ReceiptResponse { items };
        info!(
            items = response.items.len(),
            matched = response.matched_count(),
            "Receipt processed"
        );
        response
    }

    /// Splits `text` with [`split_fragments`] and processes the result.
    pub fn process_text(&self, text: &str) -> ReceiptResponse {
        self.process(split_fragments(text))
    }

    fn process_fragment(&self, fragment: &str) -> ItemResult {
        let original_text = fragment.trim().to_string();

        match self.engine.match_item(&original_text) {
            MatchResult::Matched { name } => {
                let shelf_life = self
                    .engine
                    .catalog()
                    .shelf_life(&name)
                    .cloned()
                    .unwrap_or_default();
                debug!(fragment = %original_text, item = %name, "Fragment matched");
                ItemResult {
                    original_text,
                    matched_item: Some(name),
                    shelf_life: Some(shelf_life),
                    suggestions: None,
                }
            }
            MatchResult::Unmatched { suggestions } => {
                debug!(
                    fragment = %original_text,
                    suggestions = suggestions.len(),
                    "Fragment unmatched"
                );
                ItemResult {
                    original_text,
                    matched_item: None,
                    shelf_life: None,
                    suggestions: Some(suggestions),
                }
            }
        }
    }
}
