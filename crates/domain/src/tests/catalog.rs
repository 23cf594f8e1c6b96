// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    CatalogDraft, CatalogEntry, DEFAULT_CATEGORY, DomainError, validate_catalog_draft,
    validate_catalog_name_unique,
};

fn draft(name: &str) -> CatalogDraft {
    CatalogDraft {
        name: name.to_string(),
        category: None,
        available: None,
        sort_order: None,
    }
}

fn entry(id: i64, name: &str) -> CatalogEntry {
    CatalogEntry {
        ingredient_id: Some(id),
        ..CatalogEntry::from_draft(draft(name))
    }
}

#[test]
fn test_from_draft_applies_defaults() {
    let entry: CatalogEntry = CatalogEntry::from_draft(draft("  Jamón  "));
    assert_eq!(entry.name, "Jamón");
    assert_eq!(entry.category, DEFAULT_CATEGORY);
    assert!(entry.available);
    assert_eq!(entry.sort_order, 0);
}

#[test]
fn test_updated_keeps_absent_fields() {
    let original: CatalogEntry = CatalogEntry {
        category: String::from("Embutidos"),
        available: false,
        sort_order: 4,
        ..entry(1, "Chorizo")
    };
    let updated: CatalogEntry = original.updated(draft("Chorizo picante"));
    assert_eq!(updated.name, "Chorizo picante");
    assert_eq!(updated.category, "Embutidos");
    assert!(!updated.available);
    assert_eq!(updated.sort_order, 4);
    assert_eq!(updated.ingredient_id, Some(1));
}

#[test]
fn test_validate_catalog_draft_rejects_blank_and_long_values() {
    assert!(matches!(
        validate_catalog_draft(&draft(" ")),
        Err(DomainError::InvalidCatalogName(_))
    ));
    assert!(validate_catalog_draft(&draft(&"x".repeat(101))).is_err());

    let mut long_category: CatalogDraft = draft("Queso");
    long_category.category = Some("c".repeat(51));
    assert!(matches!(
        validate_catalog_draft(&long_category),
        Err(DomainError::InvalidCategory(_))
    ));
}

#[test]
fn test_name_uniqueness_ignores_case() {
    let existing: Vec<CatalogEntry> = vec![entry(1, "Queso"), entry(2, "Tomate")];
    assert!(matches!(
        validate_catalog_name_unique("queso", &existing, None),
        Err(DomainError::DuplicateCatalogName(_))
    ));
    assert!(validate_catalog_name_unique("Lechuga", &existing, None).is_ok());
}

#[test]
fn test_name_uniqueness_skips_the_entry_being_updated() {
    let existing: Vec<CatalogEntry> = vec![entry(1, "Queso"), entry(2, "Tomate")];
    assert!(validate_catalog_name_unique("QUESO", &existing, Some(1)).is_ok());
    assert!(validate_catalog_name_unique("Tomate", &existing, Some(1)).is_err());
}
