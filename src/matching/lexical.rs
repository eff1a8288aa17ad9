//! Token-overlap ranking used when no similarity provider is available.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static ALPHA_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z]+").expect("alphabetic token regex is valid"));

/// A catalog name scored by how many alphabetic tokens it shares with the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalScore {
    pub name: String,
    pub overlap: usize,
}

/// Lowercased runs of `a-z`. Digits and punctuation split tokens.
pub fn alphabetic_tokens(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    ALPHA_TOKEN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Scores every name against `query`, highest overlap first.
///
/// Ties (including the all-zero case) keep the order of `names`.
pub fn lexical_scores(query: &str, names: &[String]) -> Vec<LexicalScore> {
    let query_tokens = alphabetic_tokens(query);

    let mut scores: Vec<LexicalScore> = names
        .iter()
        .map(|name| LexicalScore {
            name: name.clone(),
            overlap: alphabetic_tokens(name).intersection(&query_tokens).count(),
        })
        .collect();

    scores.sort_by(|a, b| b.overlap.cmp(&a.overlap));
    scores
}

/// The first `top_n` names by token overlap.
///
/// With no overlap at all this is the first `top_n` names in catalog order, so a
/// non-empty catalog always yields suggestions.
pub fn lexical_suggestions(query: &str, names: &[String], top_n: usize) -> Vec<String> {
    lexical_scores(query, names)
        .into_iter()
        .take(top_n)
        .map(|score| score.name)
        .collect()
}
