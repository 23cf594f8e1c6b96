// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ApiError, CatalogRequest, ListCatalogRequest, create_catalog_entry, delete_catalog_entry,
    list_catalog, list_catalog_categories, update_catalog_entry,
};

use super::helpers::{
    create_test_admin, create_test_cause, create_test_member, setup_test_persistence,
};

fn catalog_request(name: &str, category: Option<&str>) -> CatalogRequest {
    CatalogRequest {
        name: name.to_string(),
        category: category.map(str::to_string),
        available: None,
        sort_order: None,
    }
}

#[test]
fn test_create_entry_applies_defaults() {
    let mut persistence = setup_test_persistence();

    let response = create_catalog_entry(
        &mut persistence,
        catalog_request(" Jamon ", None),
        &create_test_admin(),
        create_test_cause(),
    )
    .unwrap();

    assert!(response.entry.ingredient_id > 0);
    assert_eq!(response.entry.name, "Jamon");
    assert_eq!(response.entry.category, "General");
    assert!(response.entry.available);
    assert_eq!(response.entry.sort_order, 0);
}

#[test]
fn test_duplicate_name_ignoring_case_is_a_conflict() {
    let mut persistence = setup_test_persistence();
    let admin = create_test_admin();
    create_catalog_entry(
        &mut persistence,
        catalog_request("Jamon", None),
        &admin,
        create_test_cause(),
    )
    .unwrap();

    let result = create_catalog_entry(
        &mut persistence,
        catalog_request("JAMON", None),
        &admin,
        create_test_cause(),
    );

    assert!(matches!(result, Err(ApiError::Conflict { .. })));
}

#[test]
fn test_members_cannot_edit_catalog() {
    let mut persistence = setup_test_persistence();

    let result = create_catalog_entry(
        &mut persistence,
        catalog_request("Jamon", None),
        &create_test_member("user-a"),
        create_test_cause(),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_update_keeps_unspecified_fields() {
    let mut persistence = setup_test_persistence();
    let admin = create_test_admin();
    let created = create_catalog_entry(
        &mut persistence,
        CatalogRequest {
            sort_order: Some(5),
            ..catalog_request("Queso", Some("Dairy"))
        },
        &admin,
        create_test_cause(),
    )
    .unwrap();

    let updated = update_catalog_entry(
        &mut persistence,
        created.entry.ingredient_id,
        CatalogRequest {
            available: Some(false),
            ..catalog_request("Queso curado", None)
        },
        &admin,
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(updated.entry.name, "Queso curado");
    assert_eq!(updated.entry.category, "Dairy");
    assert_eq!(updated.entry.sort_order, 5);
    assert!(!updated.entry.available);
}

#[test]
fn test_list_filters_and_categories() {
    let mut persistence = setup_test_persistence();
    let admin = create_test_admin();
    let member = create_test_member("user-a");
    for (name, category, available) in [
        ("Jamon", "Meat", true),
        ("Chorizo", "Meat", false),
        ("Queso", "Dairy", true),
    ] {
        create_catalog_entry(
            &mut persistence,
            CatalogRequest {
                available: Some(available),
                ..catalog_request(name, Some(category))
            },
            &admin,
            create_test_cause(),
        )
        .unwrap();
    }

    let meat = list_catalog(
        &mut persistence,
        ListCatalogRequest {
            category: Some(String::from("Meat")),
            available_only: true,
        },
        &member,
    )
    .unwrap();
    assert_eq!(meat.entries.len(), 1);
    assert_eq!(meat.entries[0].name, "Jamon");

    let all = list_catalog(&mut persistence, ListCatalogRequest::default(), &member).unwrap();
    assert_eq!(all.entries.len(), 3);

    let categories = list_catalog_categories(&mut persistence, &member).unwrap();
    assert_eq!(categories.categories, vec!["Dairy", "Meat"]);
}

#[test]
fn test_delete_missing_entry_is_not_found() {
    let mut persistence = setup_test_persistence();

    let result = delete_catalog_entry(
        &mut persistence,
        42,
        &create_test_admin(),
        create_test_cause(),
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}
