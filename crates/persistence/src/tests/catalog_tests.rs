// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{create_test_actor, create_test_cause};
use crate::{CatalogFilter, Persistence, PersistenceError};
use bocadillo::{CatalogChange, CatalogCommand, CatalogTransition, apply_catalog};
use bocadillo_audit::{Action, AuditEvent, StateSnapshot};
use bocadillo_domain::{CatalogDraft, CatalogEntry};

fn add(persistence: &mut Persistence, name: &str, category: &str, available: bool) -> i64 {
    let entries: Vec<CatalogEntry> = persistence
        .list_catalog_entries(&CatalogFilter::default())
        .unwrap();
    let transition: CatalogTransition = apply_catalog(
        &entries,
        CatalogCommand::Add {
            draft: CatalogDraft {
                name: name.to_string(),
                category: Some(category.to_string()),
                available: Some(available),
                sort_order: None,
            },
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    persistence
        .persist_catalog_transition(&transition)
        .unwrap()
        .record_id
        .unwrap()
}

#[test]
fn test_filters_and_categories() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    add(&mut persistence, "Ham", "Meat", true);
    add(&mut persistence, "Chorizo", "Meat", false);
    add(&mut persistence, "Cheese", "Dairy", true);

    let meat: Vec<CatalogEntry> = persistence
        .list_catalog_entries(&CatalogFilter {
            category: Some(String::from("Meat")),
            available_only: false,
        })
        .unwrap();
    assert_eq!(meat.len(), 2);

    let available: Vec<CatalogEntry> = persistence
        .list_catalog_entries(&CatalogFilter {
            category: None,
            available_only: true,
        })
        .unwrap();
    let names: Vec<&str> = available.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Cheese", "Ham"]);

    assert_eq!(
        persistence.list_catalog_categories().unwrap(),
        vec!["Dairy", "Meat"]
    );
}

#[test]
fn test_duplicate_name_is_rejected_by_schema() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    add(&mut persistence, "Ham", "Meat", true);

    // Bypasses the core check, as a concurrent request would.
    let transition: CatalogTransition = CatalogTransition {
        change: CatalogChange::Insert(CatalogEntry::from_draft(CatalogDraft {
            name: String::from("HAM"),
            category: None,
            available: None,
            sort_order: None,
        })),
        audit_event: AuditEvent::new_global(
            create_test_actor(),
            create_test_cause(),
            Action::new(String::from("AddIngredient"), None),
            StateSnapshot::empty(),
            StateSnapshot::empty(),
        ),
    };

    assert!(matches!(
        persistence.persist_catalog_transition(&transition),
        Err(PersistenceError::UniqueViolation(_))
    ));
}

#[test]
fn test_update_and_remove_entry() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let ingredient_id: i64 = add(&mut persistence, "Ham", "Meat", true);
    let entries: Vec<CatalogEntry> = persistence
        .list_catalog_entries(&CatalogFilter::default())
        .unwrap();

    let revise: CatalogTransition = apply_catalog(
        &entries,
        CatalogCommand::Revise {
            ingredient_id,
            draft: CatalogDraft {
                name: String::from("Jamón"),
                category: None,
                available: Some(false),
                sort_order: Some(3),
            },
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    persistence.persist_catalog_transition(&revise).unwrap();

    let entry: CatalogEntry = persistence.get_catalog_entry(ingredient_id).unwrap();
    assert_eq!(entry.name, "Jamón");
    assert_eq!(entry.category, "Meat");
    assert!(!entry.available);
    assert_eq!(entry.sort_order, 3);

    let entries: Vec<CatalogEntry> = persistence
        .list_catalog_entries(&CatalogFilter::default())
        .unwrap();
    let remove: CatalogTransition = apply_catalog(
        &entries,
        CatalogCommand::Remove { ingredient_id },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    persistence.persist_catalog_transition(&remove).unwrap();

    assert!(matches!(
        persistence.get_catalog_entry(ingredient_id),
        Err(PersistenceError::NotFound(_))
    ));
}
