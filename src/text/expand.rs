use super::abbreviations::AbbreviationTable;

/// Rewrites abbreviated tokens to full words.
#[derive(Debug, Clone, Default)]
pub struct TokenExpander {
    table: AbbreviationTable,
}

impl TokenExpander {
    pub fn new(table: AbbreviationTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &AbbreviationTable {
        &self.table
    }

    /// Lowercases `normalized`, splits on whitespace and `-`, `_`, `/`, and replaces
    /// each token found in the table. Unknown tokens pass through unchanged.
    pub fn expand(&self, normalized: &str) -> String {
        let lowered = normalized.to_lowercase();
        lowered
            .split(|c: char| c.is_whitespace() || matches!(c, '-' | '_' | '/'))
            .filter(|token| !token.is_empty())
            .map(|token| self.table.lookup(token).unwrap_or(token))
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }
}
