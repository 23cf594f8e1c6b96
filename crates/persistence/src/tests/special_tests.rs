// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{create_test_actor, create_test_cause, test_week, thursday_at};
use crate::{Persistence, PersistenceError, SpecialWriteMode};
use bocadillo::{SpecialCommand, SpecialTransition, apply_special};
use bocadillo_domain::{Bread, Size, SpecialDraft, WeekKey, WeeklySpecial};

fn draft(ingredients: &[&str]) -> SpecialDraft {
    SpecialDraft {
        size: Size::Large,
        bread: Bread::Normal,
        ingredients: ingredients.iter().map(|i| (*i).to_string()).collect(),
    }
}

fn create_transition(existing: Option<&WeeklySpecial>, ingredients: &[&str]) -> SpecialTransition {
    apply_special(
        test_week(),
        thursday_at(9),
        existing,
        SpecialCommand::Upsert {
            draft: draft(ingredients),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
}

#[test]
fn test_special_is_stored_per_week() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .persist_special_transition(&create_transition(None, &["Pork"]), SpecialWriteMode::Upsert)
        .unwrap();

    let stored: WeeklySpecial = persistence.get_weekly_special(test_week()).unwrap().unwrap();
    assert_eq!(stored.ingredients, vec!["Pork"]);
    assert_eq!(stored.size, Size::Large);

    assert_eq!(
        persistence
            .get_weekly_special(WeekKey::new(11, 2025).unwrap())
            .unwrap(),
        None
    );
}

#[test]
fn test_second_create_for_week_is_a_unique_violation() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let first: SpecialTransition = create_transition(None, &["Pork"]);
    // Built against the same empty state, as a concurrent request would be.
    let second: SpecialTransition = create_transition(None, &["Tuna"]);

    persistence
        .persist_special_transition(&first, SpecialWriteMode::CreateOnly)
        .unwrap();
    let result = persistence.persist_special_transition(&second, SpecialWriteMode::CreateOnly);

    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));
    let stored: WeeklySpecial = persistence.get_weekly_special(test_week()).unwrap().unwrap();
    assert_eq!(stored.ingredients, vec!["Pork"]);
}

#[test]
fn test_concurrent_upsert_replaces_in_place() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let first: SpecialTransition = create_transition(None, &["Pork"]);
    let second: SpecialTransition = create_transition(None, &["Tuna"]);

    let first_id = persistence
        .persist_special_transition(&first, SpecialWriteMode::Upsert)
        .unwrap()
        .record_id;
    let second_id = persistence
        .persist_special_transition(&second, SpecialWriteMode::Upsert)
        .unwrap()
        .record_id;

    assert_eq!(first_id, second_id);
    let stored: WeeklySpecial = persistence.get_weekly_special(test_week()).unwrap().unwrap();
    assert_eq!(stored.ingredients, vec!["Tuna"]);
}

#[test]
fn test_remove_deletes_the_special() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence
        .persist_special_transition(&create_transition(None, &["Pork"]), SpecialWriteMode::Upsert)
        .unwrap();
    let stored: WeeklySpecial = persistence.get_weekly_special(test_week()).unwrap().unwrap();

    let removal: SpecialTransition = apply_special(
        test_week(),
        thursday_at(10),
        Some(&stored),
        SpecialCommand::Remove,
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    persistence
        .persist_special_transition(&removal, SpecialWriteMode::Upsert)
        .unwrap();

    assert_eq!(persistence.get_weekly_special(test_week()).unwrap(), None);
}
