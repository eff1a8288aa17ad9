//! Deterministic keyword overrides.
//!
//! Evaluated against the expanded fragment before any similarity ranking. The first
//! rule whose predicate holds wins; later rules are not evaluated.

mod error;


pub use error::RulesError;

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Condition over an expanded (lowercase, space-joined) fragment.
///
/// `contains*` variants test substrings, so `contains: "onion"` also fires on
/// `"onions"`. `token` requires a whole-token match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RulePredicate {
    Contains(String),
    ContainsAll(Vec<String>),
    ContainsAny(Vec<String>),
    Token(String),
    AllOf(Vec<RulePredicate>),
    AnyOf(Vec<RulePredicate>),
}

impl RulePredicate {
    pub fn contains(needle: &str) -> Self {
        Self::Contains(needle.to_lowercase())
    }

    pub fn contains_all<I: IntoIterator<Item = S>, S: AsRef<str>>(needles: I) -> Self {
        Self::ContainsAll(needles.into_iter().map(|s| s.as_ref().to_lowercase()).collect())
    }

    pub fn contains_any<I: IntoIterator<Item = S>, S: AsRef<str>>(needles: I) -> Self {
        Self::ContainsAny(needles.into_iter().map(|s| s.as_ref().to_lowercase()).collect())
    }

    pub fn token(token: &str) -> Self {
        Self::Token(token.to_lowercase())
    }

    /// Evaluates the predicate. `expanded` is expected to be lowercase already.
    pub fn matches(&self, expanded: &str) -> bool {
        match self {
            Self::Contains(needle) => expanded.contains(needle.as_str()),
            Self::ContainsAll(needles) => {
                !needles.is_empty() && needles.iter().all(|n| expanded.contains(n.as_str()))
            }
            Self::ContainsAny(needles) => needles.iter().any(|n| expanded.contains(n.as_str())),
            Self::Token(token) => expanded.split_whitespace().any(|t| t == token),
            Self::AllOf(preds) => !preds.is_empty() && preds.iter().all(|p| p.matches(expanded)),
            Self::AnyOf(preds) => preds.iter().any(|p| p.matches(expanded)),
        }
    }
}

/// A named predicate mapped to a canonical item name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRule {
    pub name: String,
    pub when: RulePredicate,
    pub target: String,
}

impl OverrideRule {
    pub fn new(name: impl Into<String>, when: RulePredicate, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            when,
            target: target.into(),
        }
    }
}

/// Ordered rule list; position is priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideRules {
    rules: Vec<OverrideRule>,
}

impl Default for OverrideRules {
    fn default() -> Self {
        Self::new(vec![
            OverrideRule::new("onion", RulePredicate::contains("onion"), "Onion, fresh"),
            OverrideRule::new(
                "green-bell-pepper",
                RulePredicate::contains_all(["green", "bell", "pepper"]),
                "Green Bell Pepper",
            ),
            OverrideRule::new(
                "peanut-butter",
                RulePredicate::contains_all(["peanut", "butter"]),
                "Peanut Butter",
            ),
        ])
    }
}

impl OverrideRules {
    pub fn new(rules: Vec<OverrideRule>) -> Self {
        Self { rules }
    }

    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Reads a JSON array of rules, e.g.
    /// `[{"name": "onion", "when": {"contains": "onion"}, "target": "Onion, fresh"}]`.
    pub fn load(path: &Path) -> Result<Self, RulesError> {
        let content = std::fs::read_to_string(path).map_err(|source| RulesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let rules: Vec<OverrideRule> =
            serde_json::from_str(&content).map_err(|source| RulesError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(rules))
    }

    /// Returns the first rule (in priority order) whose predicate holds.
    pub fn try_override(&self, expanded: &str) -> Option<&OverrideRule> {
        self.rules.iter().find(|rule| rule.when.matches(expanded))
    }

    /// Splits into rules whose target satisfies `is_known` and the rest, keeping order.
    pub fn partition_by_target<F>(self, is_known: F) -> (Self, Vec<OverrideRule>)
    where
        F: Fn(&str) -> bool,
    {
        let (kept, dropped): (Vec<_>, Vec<_>) = self
            .rules
            .into_iter()
            .partition(|rule| is_known(&rule.target));
        (Self::new(kept), dropped)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OverrideRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
