//! Canonical food catalog and storage-duration lookup.
//!
//! The catalog owns the ordered, duplicate-free list of canonical names. Order is
//! significant: it is the tie-break for ranking and the order of fallback suggestions.

mod error;

#[cfg(test)]
mod tests;

pub use error::CatalogError;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Storage durations for one canonical item. Missing fields mean "no data".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfLife {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pantry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fridge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freezer: Option<String>,
}

impl ShelfLife {
    pub fn new(pantry: &str, fridge: &str, freezer: &str) -> Self {
        Self {
            pantry: Some(pantry.to_string()),
            fridge: Some(fridge.to_string()),
            freezer: Some(freezer.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pantry.is_none() && self.fridge.is_none() && self.freezer.is_none()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    items: Vec<CatalogItem>,
}

#[derive(Debug, Deserialize)]
struct CatalogItem {
    #[serde(default)]
    name: String,
    #[serde(default)]
    shelf_life: Option<ShelfLife>,
}

/// Ordered set of canonical item names plus optional shelf-life data.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    names: Vec<String>,
    members: HashSet<String>,
    shelf_life: HashMap<String, ShelfLife>,
}

impl Catalog {
    /// Builds a catalog from names, dropping repeats after their first occurrence.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = Self::default();
        for name in names {
            catalog.push(name.into(), None);
        }
        catalog
    }

    /// Loads `{"items": [{"name": ..., "shelf_life": {...}}]}`. Nameless items are skipped.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: CatalogFile =
            serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let total = file.items.len();
        let mut catalog = Self::default();
        for item in file.items {
            let name = item.name.trim();
            if name.is_empty() {
                debug!("Skipping catalog item without a name");
                continue;
            }
            catalog.push(name.to_string(), item.shelf_life);
        }

        info!(
            path = %path.display(),
            items = total,
            canonical = catalog.len(),
            "Catalog loaded"
        );

        Ok(catalog)
    }

    /// Small produce/dairy catalog used when no catalog file is configured.
    pub fn builtin() -> Self {
        let entries = [
            (
                "Onion, fresh",
                ShelfLife::new(
                    "1 month (dry), 1-2 weeks (green)",
                    "2 months (dry), 1-2 weeks (green)",
                    "10-12 months",
                ),
            ),
            (
                "Green Bell Pepper",
                ShelfLife::new("Not recommended", "1-2 weeks", "6-8 months"),
            ),
            (
                "Blueberries",
                ShelfLife::new("1 day", "7-14 days", "4-6 months"),
            ),
            (
                "Blackberries",
                ShelfLife::new("1 day", "3-6 days", "4-6 months"),
            ),
            (
                "Milk (pasteurized)",
                ShelfLife::new("Not recommended", "7 days", "3 months"),
            ),
            (
                "Bread, commercial",
                ShelfLife::new("2-4 days", "7-14 days", "3-5 months"),
            ),
            (
                "Chicken, raw",
                ShelfLife::new("Not recommended", "1-2 days", "9 months"),
            ),
            (
                "Apples",
                ShelfLife::new("3 weeks", "4-6 weeks", "8 months (cooked)"),
            ),
            (
                "Bananas",
                ShelfLife::new(
                    "Until ripe",
                    "3 days (skin will blacken)",
                    "2-3 months (whole peeled)",
                ),
            ),
            (
                "Carrots",
                ShelfLife::new("Not recommended", "3-4 weeks", "10-12 months"),
            ),
            (
                "Potatoes",
                ShelfLife::new(
                    "1-2 months",
                    "1-2 weeks",
                    "10-12 months (cooked and mashed)",
                ),
            ),
            (
                "Tomatoes",
                ShelfLife::new("Until ripe", "2-3 days (ripe)", "2 months"),
            ),
            (
                "Peanut Butter",
                ShelfLife::new(
                    "6-24 months (unopened), 2-3 months (opened)",
                    "6-9 months (opened)",
                    "Not recommended",
                ),
            ),
        ];

        let mut catalog = Self::default();
        for (name, shelf_life) in entries {
            catalog.push(name.to_string(), Some(shelf_life));
        }
        catalog
    }

    fn push(&mut self, name: String, shelf_life: Option<ShelfLife>) {
        if let Some(shelf_life) = shelf_life {
            self.shelf_life
                .entry(name.to_lowercase())
                .or_insert(shelf_life);
        }
        if self.members.insert(name.clone()) {
            self.names.push(name);
        }
    }

    /// Canonical names in insertion order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    /// Case-insensitive exact-name lookup of storage durations.
    pub fn shelf_life(&self, name: &str) -> Option<&ShelfLife> {
        self.shelf_life.get(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
