// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ApiError, ListAuditEventsRequest, SubscribeRequest, UnsubscribeRequest, list_audit_events,
    subscribe_push, unsubscribe_push,
};

use super::helpers::{
    create_test_admin, create_test_member, place_test_order, setup_test_persistence, thursday_at,
};

fn subscribe_request(endpoint: &str, p256dh: &str) -> SubscribeRequest {
    SubscribeRequest {
        endpoint: endpoint.to_string(),
        p256dh: p256dh.to_string(),
        auth: String::from("auth-secret"),
    }
}

#[test]
fn test_resubscribing_refreshes_keys() {
    let mut persistence = setup_test_persistence();
    let member = create_test_member("user-a");

    let first = subscribe_push(
        &mut persistence,
        thursday_at(8),
        &subscribe_request("https://push.example/1", "key-1"),
        &member,
    )
    .unwrap();
    let second = subscribe_push(
        &mut persistence,
        thursday_at(9),
        &subscribe_request("https://push.example/1", "key-2"),
        &member,
    )
    .unwrap();

    assert_eq!(first.subscription_id, second.subscription_id);
    let stored = persistence.list_push_subscriptions().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].p256dh, "key-2");
}

#[test]
fn test_subscribe_rejects_blank_endpoint() {
    let mut persistence = setup_test_persistence();

    let result = subscribe_push(
        &mut persistence,
        thursday_at(8),
        &subscribe_request("  ", "key-1"),
        &create_test_member("user-a"),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "endpoint"
    ));
}

#[test]
fn test_unsubscribe_only_removes_own_endpoint() {
    let mut persistence = setup_test_persistence();
    subscribe_push(
        &mut persistence,
        thursday_at(8),
        &subscribe_request("https://push.example/a", "key"),
        &create_test_member("user-a"),
    )
    .unwrap();

    let other = unsubscribe_push(
        &mut persistence,
        &UnsubscribeRequest {
            endpoint: String::from("https://push.example/a"),
        },
        &create_test_member("user-b"),
    )
    .unwrap();
    assert!(!other.removed);

    let own = unsubscribe_push(
        &mut persistence,
        &UnsubscribeRequest {
            endpoint: String::from("https://push.example/a"),
        },
        &create_test_member("user-a"),
    )
    .unwrap();
    assert!(own.removed);
    assert!(persistence.list_push_subscriptions().unwrap().is_empty());
}

#[test]
fn test_audit_listing_is_admin_only_and_newest_first() {
    let mut persistence = setup_test_persistence();
    place_test_order(&mut persistence, "user-a", &["Ham"], thursday_at(8));
    place_test_order(&mut persistence, "user-b", &["Cheese"], thursday_at(9));

    let denied = list_audit_events(
        &mut persistence,
        ListAuditEventsRequest::default(),
        &create_test_member("user-a"),
    );
    assert!(matches!(denied, Err(ApiError::Unauthorized { .. })));

    let events = list_audit_events(
        &mut persistence,
        ListAuditEventsRequest { limit: Some(1) },
        &create_test_admin(),
    )
    .unwrap();
    assert_eq!(events.events.len(), 1);
    assert_eq!(events.events[0].action, "PlaceOrder");
    assert_eq!(events.events[0].actor_id, "user-b");
    assert_eq!(events.events[0].week, Some(10));
}

#[test]
fn test_audit_listing_rejects_non_positive_limit() {
    let mut persistence = setup_test_persistence();

    let result = list_audit_events(
        &mut persistence,
        ListAuditEventsRequest { limit: Some(0) },
        &create_test_admin(),
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}
