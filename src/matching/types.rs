use serde::Serialize;

/// Outcome of matching one receipt fragment.
///
/// `Matched` always names a catalog member. `Unmatched` carries at most `top_k`
/// distinct catalog names, best first, and may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchResult {
    Matched { name: String },
    Unmatched { suggestions: Vec<String> },
}

impl MatchResult {
    pub fn matched(name: impl Into<String>) -> Self {
        MatchResult::Matched { name: name.into() }
    }

    pub fn unmatched(suggestions: Vec<String>) -> Self {
        MatchResult::Unmatched { suggestions }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, MatchResult::Matched { .. })
    }

    /// The canonical name, if matched.
    pub fn name(&self) -> Option<&str> {
        match self {
            MatchResult::Matched { name } => Some(name),
            MatchResult::Unmatched { .. } => None,
        }
    }

    /// Suggestions for an unmatched fragment; empty when matched.
    pub fn suggestions(&self) -> &[String] {
        match self {
            MatchResult::Matched { .. } => &[],
            MatchResult::Unmatched { suggestions } => suggestions,
        }
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchResult::Matched { name } => write!(f, "MATCHED ({name})"),
            MatchResult::Unmatched { suggestions } if suggestions.is_empty() => {
                write!(f, "UNMATCHED")
            }
            MatchResult::Unmatched { suggestions } => {
                write!(f, "UNMATCHED (suggestions: {})", suggestions.join(", "))
            }
        }
    }
}
