use super::*;
use std::io::Write;

#[test]
fn test_from_names_dedupes_preserving_order() {
    let catalog = Catalog::from_names(["Milk", "Milk", "Bread"]);
    assert_eq!(catalog.names(), ["Milk", "Bread"]);
    assert_eq!(catalog.len(), 2);
}

#[test]
fn test_from_names_keeps_first_occurrence_position() {
    let catalog = Catalog::from_names(["Bread", "Milk", "Bread", "Eggs", "Milk"]);
    assert_eq!(catalog.names(), ["Bread", "Milk", "Eggs"]);
}

#[test]
fn test_empty_catalog() {
    let catalog = Catalog::from_names(Vec::<String>::new());
    assert!(catalog.is_empty());
    assert!(catalog.shelf_life("Milk").is_none());
}

#[test]
fn test_contains_is_exact() {
    let catalog = Catalog::from_names(["Onion, fresh"]);
    assert!(catalog.contains("Onion, fresh"));
    assert!(!catalog.contains("onion, fresh"));
    assert!(!catalog.contains("Onion"));
}

#[test]
fn test_builtin_has_shelf_life_for_every_item() {
    let catalog = Catalog::builtin();
    assert!(!catalog.is_empty());
    for name in catalog.names() {
        let shelf = catalog.shelf_life(name).expect("builtin item has data");
        assert!(!shelf.is_empty(), "{name} has no durations");
    }
}

#[test]
fn test_builtin_contains_default_override_targets() {
    let catalog = Catalog::builtin();
    for rule in crate::rules::OverrideRules::default().iter() {
        assert!(catalog.contains(&rule.target), "missing {}", rule.target);
    }
}

#[test]
fn test_shelf_life_lookup_is_case_insensitive() {
    let catalog = Catalog::builtin();
    let shelf = catalog.shelf_life("onion, FRESH").expect("should find");
    assert_eq!(shelf.freezer.as_deref(), Some("10-12 months"));
}

#[test]
fn test_load_from_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "items": [
                {{"name": "Apples", "shelf_life": {{"pantry": "3 weeks", "fridge": "4-6 weeks"}}}},
                {{"name": "Bananas"}},
                {{"name": ""}},
                {{"shelf_life": {{"pantry": "orphan"}}}},
                {{"name": "Apples", "shelf_life": {{"pantry": "ignored"}}}}
            ]
        }}"#
    )
    .unwrap();

    let catalog = Catalog::load(file.path()).expect("should load");
    assert_eq!(catalog.names(), ["Apples", "Bananas"]);

    let apples = catalog.shelf_life("Apples").unwrap();
    assert_eq!(apples.pantry.as_deref(), Some("3 weeks"));
    assert_eq!(apples.fridge.as_deref(), Some("4-6 weeks"));
    assert!(apples.freezer.is_none());

    assert!(catalog.shelf_life("Bananas").is_none());
}

#[test]
fn test_load_without_items_key() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{}}").unwrap();

    let catalog = Catalog::load(file.path()).expect("should load");
    assert!(catalog.is_empty());
}

#[test]
fn test_load_invalid_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();

    let err = Catalog::load(file.path()).unwrap_err();
    assert!(matches!(err, CatalogError::Parse { .. }));
}

#[test]
fn test_load_missing_file() {
    let err = Catalog::load(Path::new("/nonexistent/catalog.json")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/catalog.json"));
}

#[test]
fn test_shelf_life_serializes_without_missing_fields() {
    let shelf = ShelfLife {
        pantry: Some("1 week".to_string()),
        fridge: None,
        freezer: None,
    };
    let json = serde_json::to_string(&shelf).unwrap();
    assert_eq!(json, r#"{"pantry":"1 week"}"#);
}
