// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use bocadillo_domain::WeekKey;

fn create_test_parts() -> (Actor, Cause, Action, StateSnapshot, StateSnapshot) {
    (
        Actor::with_display_name(
            String::from("user-123"),
            String::from("member"),
            String::from("ANA"),
        ),
        Cause::new(String::from("req-456"), String::from("Weekly order")),
        Action::new(String::from("PlaceOrder"), None),
        StateSnapshot::empty(),
        StateSnapshot::new(String::from("order=Ham,Cheese")),
    )
}

#[test]
fn test_actor_without_display_name() {
    let actor: Actor = Actor::new(String::from("user-123"), String::from("member"));

    assert_eq!(actor.id, "user-123");
    assert_eq!(actor.actor_type, "member");
    assert_eq!(actor.display_name, None);
}

#[test]
fn test_action_creation_with_details() {
    let action: Action = Action::new(
        String::from("SetPrice"),
        Some(String::from("Set price to 3.50")),
    );

    assert_eq!(action.name, "SetPrice");
    assert_eq!(action.details.as_deref(), Some("Set price to 3.50"));
}

#[test]
fn test_empty_snapshot() {
    assert_eq!(StateSnapshot::empty().data, "none");
}

#[test]
fn test_week_scoped_event_carries_week() {
    let (actor, cause, action, before, after) = create_test_parts();
    let week: WeekKey = WeekKey::new(10, 2025).unwrap();

    let event: AuditEvent = AuditEvent::new(actor.clone(), cause, action, before, after, week);

    assert_eq!(event.week, Some(week));
    assert_eq!(event.event_id, None);
    assert_eq!(event.actor, actor);
}

#[test]
fn test_global_event_has_no_week() {
    let (actor, cause, action, before, after) = create_test_parts();
    let event: AuditEvent = AuditEvent::new_global(actor, cause, action, before, after);
    assert_eq!(event.week, None);
}

#[test]
fn test_with_id_reconstructs_persisted_event() {
    let (actor, cause, action, before, after) = create_test_parts();
    let fresh: AuditEvent = AuditEvent::new_global(
        actor.clone(),
        cause.clone(),
        action.clone(),
        before.clone(),
        after.clone(),
    );
    let stored: AuditEvent = AuditEvent::with_id(7, actor, cause, action, before, after, None);

    assert_eq!(stored.event_id, Some(7));
    assert_ne!(fresh, stored);
    assert_eq!(fresh.action, stored.action);
}
