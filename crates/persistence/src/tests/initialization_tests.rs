// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use diesel::RunQueryDsl;

#[test]
fn test_in_memory_databases_are_isolated() {
    let mut first: Persistence = Persistence::new_in_memory().unwrap();
    let mut second: Persistence = Persistence::new_in_memory().unwrap();

    crate::tests::place_test_order(&mut first, "ana", &["Ham"], crate::tests::thursday_at(9));

    assert_eq!(first.list_orders().unwrap().len(), 1);
    assert!(second.list_orders().unwrap().is_empty());
}

#[test]
fn test_foreign_key_enforcement_is_enabled() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_schema_rejects_large_sandwiches_on_special_breads() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    for bread in ["WHOLEGRAIN", "SEEDED"] {
        let order = diesel::sql_query(format!(
            "INSERT INTO orders (owner_id, display_name, size, bread, ingredients_json, week, year, created_at) \
             VALUES ('ana', 'ANA', 'LARGE', '{bread}', '[\"Ham\"]', 10, 2025, '2025-03-06T09:00:00Z')"
        ))
        .execute(&mut persistence.conn);
        assert!(order.is_err(), "large {bread} order was accepted");

        let special = diesel::sql_query(format!(
            "INSERT INTO weekly_specials (size, bread, ingredients_json, week, year, created_at, updated_at) \
             VALUES ('LARGE', '{bread}', '[\"Ham\"]', 10, 2025, '2025-03-06T09:00:00Z', '2025-03-06T09:00:00Z')"
        ))
        .execute(&mut persistence.conn);
        assert!(special.is_err(), "large {bread} special was accepted");
    }

    let allowed = diesel::sql_query(
        "INSERT INTO weekly_specials (size, bread, ingredients_json, week, year, created_at, updated_at) \
         VALUES ('LARGE', 'NORMAL', '[\"Ham\"]', 10, 2025, '2025-03-06T09:00:00Z', '2025-03-06T09:00:00Z')",
    )
    .execute(&mut persistence.conn);
    assert!(allowed.is_ok());
}
