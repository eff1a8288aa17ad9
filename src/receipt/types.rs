use serde::Serialize;

use crate::catalog::ShelfLife;

/// Result for one receipt fragment.
///
/// Matched items carry `shelf_life` (empty when the catalog has no data) and no
/// suggestions. Unmatched items carry suggestions and no shelf life.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemResult {
    pub original_text: String,
    pub matched_item: Option<String>,
    pub shelf_life: Option<ShelfLife>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

impl ItemResult {
    pub fn is_matched(&self) -> bool {
        self.matched_item.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReceiptResponse {
    pub items: Vec<ItemResult>,
}

impl ReceiptResponse {
    pub fn matched_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_matched()).count()
    }
}
