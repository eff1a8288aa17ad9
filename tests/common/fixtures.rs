use std::io::Write;
use std::path::PathBuf;

use tempfile::TempDir;

/// Catalog in the on-disk format, with shelf life for a few items.
pub const CATALOG_JSON: &str = r#"{
  "items": [
    {"name": "Onion, fresh", "shelf_life": {"pantry": "1 month", "fridge": "2 months", "freezer": "10-12 months"}},
    {"name": "Green Bell Pepper", "shelf_life": {"fridge": "1-2 weeks", "freezer": "6-8 months"}},
    {"name": "Blueberries", "shelf_life": {"pantry": "1 day", "fridge": "7-14 days"}},
    {"name": "Blackberries"},
    {"name": "Kale", "shelf_life": {"fridge": "5-7 days"}},
    {"name": "Onion, fresh"},
    {"shelf_life": {"fridge": "never"}}
  ]
}"#;

pub const RULES_JSON: &str = r#"[
  {"name": "kale", "when": {"token": "kale"}, "target": "Kale"},
  {"name": "onion", "when": {"contains": "onion"}, "target": "Onion, fresh"},
  {"name": "pepper", "when": {"all_of": [{"token": "bell"}, {"contains_any": ["pepper", "ppr"]}]}, "target": "Green Bell Pepper"},
  {"name": "missing", "when": {"contains": "leek"}, "target": "Leeks"}
]"#;

pub const ABBREVIATIONS_JSON: &str = r#"{"KLE": "kale", "BLBRY": "blueberries"}"#;

/// Temporary directory holding the fixture files.
pub struct Fixtures {
    dir: TempDir,
}

impl Fixtures {
    pub fn new() -> Self {
        let fixtures = Self {
            dir: tempfile::tempdir().expect("tempdir"),
        };
        fixtures.write("catalog.json", CATALOG_JSON);
        fixtures.write("rules.json", RULES_JSON);
        fixtures.write("abbreviations.json", ABBREVIATIONS_JSON);
        fixtures
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        let mut file = std::fs::File::create(&path).expect("create fixture");
        file.write_all(content.as_bytes()).expect("write fixture");
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// An existing directory with no model files in it.
    pub fn empty_model_dir(&self) -> PathBuf {
        let path = self.dir.path().join("model");
        std::fs::create_dir_all(&path).expect("create model dir");
        path
    }
}
