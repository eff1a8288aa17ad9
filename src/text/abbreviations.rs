use std::collections::HashMap;
use std::path::Path;

use super::error::TextError;

/// Receipt shorthand seen on common grocery printers.
const DEFAULT_ABBREVIATIONS: &[(&str, &str)] = &[
    ("grn", "green"),
    ("grn.", "green"),
    ("ppr", "pepper"),
    ("pep", "pepper"),
    ("ylw", "yellow"),
    ("yell", "yellow"),
    ("mnch", "bunch"),
    ("blubry", "blueberry"),
    ("bluberries", "blueberries"),
    ("pnt", "peanut"),
    ("buttr", "butter"),
    ("brd", "bread"),
    ("chkn", "chicken"),
    ("tom", "tomato"),
    ("tmto", "tomato"),
    ("pot", "potato"),
    ("bnna", "banana"),
    ("crrt", "carrot"),
    ("appl", "apple"),
    ("org", "organic"),
];

/// Lowercase token → lowercase expansion.
///
/// Lookups are single-shot: an expansion is never looked up again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbbreviationTable {
    entries: HashMap<String, String>,
}

impl Default for AbbreviationTable {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_ABBREVIATIONS.iter().copied())
    }
}

impl AbbreviationTable {
    /// A table that expands nothing.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Builds a table from `(token, expansion)` pairs. Both sides are lowercased.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut table = Self::empty();
        for (token, expansion) in pairs {
            table.insert(token, expansion);
        }
        table
    }

    /// Reads a JSON object of `"token": "expansion"` pairs.
    pub fn load(path: &Path) -> Result<Self, TextError> {
        let content = std::fs::read_to_string(path).map_err(|source| TextError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: HashMap<String, String> =
            serde_json::from_str(&content).map_err(|source| TextError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::from_pairs(raw))
    }

    /// Adds or replaces a single entry.
    pub fn insert<K: AsRef<str>, V: AsRef<str>>(&mut self, token: K, expansion: V) {
        self.entries.insert(
            token.as_ref().trim().to_lowercase(),
            expansion.as_ref().trim().to_lowercase(),
        );
    }

    /// Overlays `other` on top of `self`; entries in `other` win.
    pub fn merge(mut self, other: AbbreviationTable) -> Self {
        self.entries.extend(other.entries);
        self
    }

    pub fn lookup(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
