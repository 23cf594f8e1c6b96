// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_admin_actor, create_test_cause, thursday_at};
use crate::{ClosureCommand, ClosureTransition, CoreError, apply_closure};
use bocadillo_domain::{ClosureOverride, DEFAULT_CLOSURE_MESSAGE, DomainError};

#[test]
fn test_closing_stamps_admin_and_time() {
    let result: ClosureTransition = apply_closure(
        &ClosureOverride::default(),
        ClosureCommand {
            closed: true,
            message: Some(String::from("  Closed for the holidays  ")),
        },
        create_test_admin_actor(),
        create_test_cause(),
        thursday_at(9),
    )
    .unwrap();

    assert!(result.new_state.manually_closed);
    assert_eq!(result.new_state.closure_message, "Closed for the holidays");
    assert_eq!(result.new_state.closed_by.as_deref(), Some("admin-1"));
    assert_eq!(result.new_state.closed_at, Some(thursday_at(9)));
    assert!(result.new_state.is_consistent());
    assert_eq!(result.audit_event.week, None);
}

#[test]
fn test_reopening_clears_stamp_and_keeps_message() {
    let closed: ClosureOverride = ClosureOverride::default().with_state(
        true,
        Some(String::from("Back soon")),
        "admin-1",
        thursday_at(9),
    );

    let result: ClosureTransition = apply_closure(
        &closed,
        ClosureCommand {
            closed: false,
            message: None,
        },
        create_test_admin_actor(),
        create_test_cause(),
        thursday_at(10),
    )
    .unwrap();

    assert!(!result.new_state.manually_closed);
    assert_eq!(result.new_state.closed_by, None);
    assert_eq!(result.new_state.closed_at, None);
    assert_eq!(result.new_state.closure_message, "Back soon");
}

#[test]
fn test_default_message_is_used_when_none_was_set() {
    let result: ClosureTransition = apply_closure(
        &ClosureOverride::default(),
        ClosureCommand {
            closed: true,
            message: None,
        },
        create_test_admin_actor(),
        create_test_cause(),
        thursday_at(9),
    )
    .unwrap();

    assert_eq!(result.new_state.closure_message, DEFAULT_CLOSURE_MESSAGE);
}

#[test]
fn test_blank_message_is_rejected() {
    let result: Result<ClosureTransition, CoreError> = apply_closure(
        &ClosureOverride::default(),
        ClosureCommand {
            closed: true,
            message: Some(String::from("   ")),
        },
        create_test_admin_actor(),
        create_test_cause(),
        thursday_at(9),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidClosureMessage(_)
        ))
    ));
}
